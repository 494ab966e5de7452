//! In-memory cache provider

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

use super::{CacheProvider, ValueFactory};

const DEFAULT_REGION: &str = "";

#[derive(Clone)]
struct Entry<V> {
    value: V,
    expires_at: Instant,
}

impl<V> Entry<V> {
    fn new(value: V, duration: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now() + duration,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

type Regions<V> = HashMap<String, HashMap<String, Entry<V>>>;

/// In-memory cache provider.
///
/// Entries live in per-region maps. Expired entries are treated as missing
/// and dropped the next time they are touched.
pub struct MemoryCacheProvider<V> {
    regions: Arc<RwLock<Regions<V>>>,
}

impl<V> MemoryCacheProvider<V> {
    pub fn new() -> Self {
        Self {
            regions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of live entries across all regions
    pub async fn size(&self) -> usize {
        self.regions
            .read()
            .await
            .values()
            .flat_map(|entries| entries.values())
            .filter(|entry| !entry.is_expired())
            .count()
    }
}

impl<V> Default for MemoryCacheProvider<V> {
    fn default() -> Self {
        Self::new()
    }
}

fn region_key(region: Option<&str>) -> &str {
    region.unwrap_or(DEFAULT_REGION)
}

#[async_trait]
impl<V> CacheProvider<V> for MemoryCacheProvider<V>
where
    V: Clone + Send + Sync + 'static,
{
    async fn add(&self, key: &str, value: V, duration: Duration, region: Option<&str>) -> Result<()> {
        let mut regions = self.regions.write().await;
        regions
            .entry(region_key(region).to_string())
            .or_default()
            .insert(key.to_string(), Entry::new(value, duration));
        Ok(())
    }

    async fn get(&self, key: &str, region: Option<&str>) -> Result<Option<V>> {
        {
            let regions = self.regions.read().await;
            match regions.get(region_key(region)).and_then(|entries| entries.get(key)) {
                Some(entry) if !entry.is_expired() => return Ok(Some(entry.value.clone())),
                None => return Ok(None),
                Some(_) => {}
            }
        }

        // Expired: purge it
        self.remove(key, region).await?;
        Ok(None)
    }

    async fn remove(&self, key: &str, region: Option<&str>) -> Result<Option<V>> {
        let mut regions = self.regions.write().await;
        let removed = regions
            .get_mut(region_key(region))
            .and_then(|entries| entries.remove(key));
        Ok(removed.filter(|entry| !entry.is_expired()).map(|entry| entry.value))
    }

    async fn contains(&self, key: &str, region: Option<&str>) -> Result<bool> {
        Ok(self.get(key, region).await?.is_some())
    }

    async fn clear(&self, region: Option<&str>) -> Result<usize> {
        let mut regions = self.regions.write().await;
        let removed = match region {
            Some(name) => regions.remove(name).map(|entries| entries.len()).unwrap_or(0),
            None => {
                let count = regions.values().map(HashMap::len).sum();
                regions.clear();
                count
            }
        };
        Ok(removed)
    }

    async fn get_or_add(
        &self,
        key: &str,
        factory: ValueFactory<V>,
        duration: Duration,
        region: Option<&str>,
    ) -> Result<V> {
        let mut regions = self.regions.write().await;
        let entries = regions.entry(region_key(region).to_string()).or_default();

        if let Some(entry) = entries.get(key).filter(|entry| !entry.is_expired()) {
            return Ok(entry.value.clone());
        }

        let value = factory();
        entries.insert(key.to_string(), Entry::new(value.clone(), duration));
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_provider_basic() {
        let provider = MemoryCacheProvider::new();
        provider
            .add("key", 1u32, Duration::from_secs(60), None)
            .await
            .unwrap();

        assert_eq!(provider.get("key", None).await.unwrap(), Some(1));
        assert!(provider.contains("key", None).await.unwrap());
        assert!(!provider.contains("other", None).await.unwrap());
        assert_eq!(provider.size().await, 1);
    }

    #[tokio::test]
    async fn test_regions_are_separate() {
        let provider = MemoryCacheProvider::new();
        let ttl = Duration::from_secs(60);
        provider.add("key", "a", ttl, Some("one")).await.unwrap();
        provider.add("key", "b", ttl, Some("two")).await.unwrap();
        provider.add("key", "c", ttl, None).await.unwrap();

        assert_eq!(provider.get("key", Some("one")).await.unwrap(), Some("a"));
        assert_eq!(provider.get("key", Some("two")).await.unwrap(), Some("b"));
        assert_eq!(provider.get("key", None).await.unwrap(), Some("c"));

        assert_eq!(provider.clear(Some("one")).await.unwrap(), 1);
        assert!(!provider.contains("key", Some("one")).await.unwrap());
        assert!(provider.contains("key", Some("two")).await.unwrap());

        assert_eq!(provider.clear(None).await.unwrap(), 2);
        assert_eq!(provider.size().await, 0);
    }

    #[tokio::test]
    async fn test_expired_entries_are_missing() {
        let provider = MemoryCacheProvider::new();
        provider
            .add("key", "v", Duration::from_millis(0), None)
            .await
            .unwrap();

        assert_eq!(provider.get("key", None).await.unwrap(), None);
        assert!(!provider.contains("key", None).await.unwrap());
        assert_eq!(provider.size().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires_after_its_duration() {
        let provider = MemoryCacheProvider::new();
        provider
            .add("key", "v", Duration::from_secs(30), None)
            .await
            .unwrap();

        tokio::time::advance(Duration::from_secs(29)).await;
        assert_eq!(provider.get("key", None).await.unwrap(), Some("v"));

        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(provider.get("key", None).await.unwrap(), None);
        assert_eq!(provider.size().await, 0);
    }

    #[tokio::test]
    async fn test_get_or_add_replaces_expired_entry() {
        let provider = MemoryCacheProvider::new();
        provider
            .add("key", "old", Duration::from_millis(0), None)
            .await
            .unwrap();

        let value = provider
            .get_or_add("key", Box::new(|| "new"), Duration::from_secs(60), None)
            .await
            .unwrap();
        assert_eq!(value, "new");
        assert_eq!(provider.get("key", None).await.unwrap(), Some("new"));
    }
}
