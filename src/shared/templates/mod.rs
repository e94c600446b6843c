//! HTML page templates.
//!
//! Templates live in the configured template directory (`templates/pages` by
//! default) and use Jinja2 syntax. Output is always HTML-escaped.

mod engine;

pub use engine::{TemplateEngine, TemplateError};
