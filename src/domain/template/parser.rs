// Route template parser using recursive descent

use anyhow::{bail, Result};

use super::ast::{InlineDefault, Placeholder, Template, TemplatePart};

pub struct TemplateParser {
    input: String,
    pos: usize,
}

impl TemplateParser {
    pub fn parse(template: &str) -> Result<Template> {
        let mut parser = Self {
            input: template.to_string(),
            pos: 0,
        };
        parser.parse_template()
    }

    fn parse_template(&mut self) -> Result<Template> {
        let mut parts = Vec::new();
        let mut literal_buf = String::new();

        while self.pos < self.input.len() {
            if self.peek_char() == Some('{') {
                if self.peek_ahead(1) == Some('{') {
                    // Escaped brace
                    self.pos += 2;
                    literal_buf.push('{');
                } else {
                    if !literal_buf.is_empty() {
                        parts.push(TemplatePart::Literal(std::mem::take(&mut literal_buf)));
                    }

                    let placeholder = self.parse_placeholder()?;
                    parts.push(TemplatePart::Placeholder(placeholder));
                }
            } else if self.peek_char() == Some('}') {
                if self.peek_ahead(1) == Some('}') {
                    self.pos += 2;
                    literal_buf.push('}');
                } else {
                    bail!("Unexpected closing brace at position {}", self.pos);
                }
            } else {
                literal_buf.push(self.consume_char()?);
            }
        }

        if !literal_buf.is_empty() {
            parts.push(TemplatePart::Literal(literal_buf));
        }

        Ok(Template::new(parts))
    }

    fn parse_placeholder(&mut self) -> Result<Placeholder> {
        let start = self.pos;
        self.expect_char('{')?;

        let name = self.parse_parameter_name()?;

        // The first '=' separates the default; a '?' only counts without one
        let default = match self.peek_char() {
            Some('=') => {
                self.consume_char()?;
                InlineDefault::Value(self.parse_default_value()?)
            }
            Some('?') => {
                self.consume_char()?;
                InlineDefault::Optional
            }
            _ => InlineDefault::None,
        };

        match self.peek_char() {
            Some('}') => {
                self.consume_char()?;
            }
            Some(ch) => bail!(
                "Expected '}}' but found '{}' at position {}",
                ch,
                self.pos
            ),
            None => bail!("Unclosed placeholder starting at position {}", start),
        }

        Ok(Placeholder { name, default })
    }

    fn parse_parameter_name(&mut self) -> Result<String> {
        let mut name = String::new();

        while let Some(ch) = self.peek_char() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                name.push(self.consume_char()?);
            } else if ch == '?' || ch == '=' || ch == '}' {
                break;
            } else {
                bail!(
                    "Invalid character '{}' in parameter name at position {}",
                    ch,
                    self.pos
                );
            }
        }

        if name.is_empty() {
            bail!("Empty parameter name at position {}", self.pos);
        }
        if name.starts_with(|c: char| c.is_ascii_digit()) {
            bail!("Parameter name '{}' must not start with a digit", name);
        }

        Ok(name)
    }

    fn parse_default_value(&mut self) -> Result<String> {
        let mut value = String::new();

        while let Some(ch) = self.peek_char() {
            match ch {
                '}' => break,
                '{' => bail!("Unexpected opening brace in default value at position {}", self.pos),
                _ => value.push(self.consume_char()?),
            }
        }

        Ok(value)
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_ahead(&self, offset: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(offset)
    }

    fn consume_char(&mut self) -> Result<char> {
        let ch = self
            .peek_char()
            .ok_or_else(|| anyhow::anyhow!("Unexpected end of input at position {}", self.pos))?;
        self.pos += ch.len_utf8();
        Ok(ch)
    }

    fn expect_char(&mut self, expected: char) -> Result<()> {
        match self.peek_char() {
            Some(ch) if ch == expected => {
                self.consume_char()?;
                Ok(())
            }
            Some(ch) => bail!(
                "Expected '{}' but found '{}' at position {}",
                expected,
                ch,
                self.pos
            ),
            None => bail!("Expected '{}' but found end of input", expected),
        }
    }
}
