// Template module for route templates
//
// This module provides parsing of `{name}`, `{name?}` and `{name=default}`
// placeholders and escaping of the literal text around them.

mod ast;
mod escaper;
mod parser;

pub use ast::{InlineDefault, Placeholder, Template, TemplatePart};
pub use escaper::{escape_parts, escape_template, unescape};
pub use parser::TemplateParser;
