// src/presentation/templates.rs
//! HTML rendering for the public pages.

use std::path::Path;
use tera::{Context, Tera};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template not found: {0}")]
    NotFound(String),
    #[error("template rendering failed: {0}")]
    Failed(String),
}

/// Turns a template name and a context into an HTML document.
pub trait TemplateRenderer: Send + Sync {
    fn render(&self, template: &str, context: &Context) -> Result<String, RenderError>;
}

/// Tera templates loaded once from `<dir>/**/*.html`.
pub struct TeraRenderer {
    tera: Tera,
}

impl TeraRenderer {
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, RenderError> {
        let glob = format!("{}/**/*.html", dir.as_ref().display());
        let tera = Tera::new(&glob).map_err(|err| RenderError::Failed(describe(&err)))?;
        Ok(Self { tera })
    }

    /// Build from in-memory `(name, source)` pairs.
    pub fn from_sources<'a, I>(templates: I) -> Result<Self, RenderError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut tera = Tera::default();
        tera.add_raw_templates(templates)
            .map_err(|err| RenderError::Failed(describe(&err)))?;
        Ok(Self { tera })
    }

    pub fn template_names(&self) -> impl Iterator<Item = &str> {
        self.tera.get_template_names()
    }
}

impl TemplateRenderer for TeraRenderer {
    fn render(&self, template: &str, context: &Context) -> Result<String, RenderError> {
        if !self.tera.get_template_names().any(|name| name == template) {
            return Err(RenderError::NotFound(template.to_string()));
        }
        self.tera
            .render(template, context)
            .map_err(|err| RenderError::Failed(describe(&err)))
    }
}

/// Tera nests the useful message in the error's source chain.
fn describe(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
