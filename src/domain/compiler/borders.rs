// Border resolver: marks end and pre-end segments

use super::segment::Segment;

/// Mark the last segment as `end`, and the segment right before a trailing
/// run of optional segments as `pre_end`.
///
/// An optional segment followed by a required one keeps a mandatory
/// separator in front of it.
pub fn resolve_borders(segments: &mut [Segment]) {
    let count = segments.len();

    for i in 0..count {
        if segments[i].optional && i > 0 && segments[i..].iter().all(|s| s.optional) {
            segments[i - 1].pre_end = true;
        }

        if i + 1 == count {
            segments[i].end = true;
        }
    }
}
