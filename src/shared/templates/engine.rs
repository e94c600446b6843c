use minijinja::{path_loader, AutoEscape, Environment, ErrorKind};
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template directory '{0}' does not exist")]
    MissingDirectory(String),

    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

/// Page renderer shared by all handlers.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create an engine that loads templates lazily from `dir`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, TemplateError> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(TemplateError::MissingDirectory(dir.display().to_string()));
        }

        let mut env = Environment::new();
        env.set_loader(path_loader(dir.to_path_buf()));
        env.set_auto_escape_callback(|_| AutoEscape::Html);

        tracing::debug!("Template loader rooted at {}", dir.display());

        Ok(Self { env })
    }

    /// Render `name` with the given context.
    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<String, TemplateError> {
        let template = self.env.get_template(name).map_err(|e| match e.kind() {
            ErrorKind::TemplateNotFound => TemplateError::NotFound(name.to_string()),
            _ => TemplateError::RenderError(e.to_string()),
        })?;

        template
            .render(ctx)
            .map_err(|e| TemplateError::RenderError(e.to_string()))
    }

    /// Check if a template exists
    #[allow(dead_code)]
    pub fn template_exists(&self, name: &str) -> bool {
        self.env.get_template(name).is_ok()
    }
}
