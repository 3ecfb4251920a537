//! Page template renderer.

use std::path::Path;

use minijinja::{Environment, UndefinedBehavior};
use serde::Serialize;
use tracing::debug;

use crate::helpers;

/// File extension appended to template names (`pages/home` → `pages/home.html`).
///
/// The extension also switches on HTML auto-escaping.
pub const TEMPLATE_EXTENSION: &str = "html";

/// Error rendering a template.
#[derive(Debug, thiserror::Error)]
#[error("failed to render template {template}: {source}")]
pub struct RenderError {
    /// Template name as requested (without extension).
    pub template: String,
    #[source]
    pub source: minijinja::Error,
}

impl RenderError {
    /// Check if the template itself could not be found.
    #[must_use]
    pub fn is_template_not_found(&self) -> bool {
        self.source.kind() == minijinja::ErrorKind::TemplateNotFound
    }
}

/// Renders named page templates with the storefront helpers installed.
///
/// Cheap to share behind an `Arc`; rendering takes `&self`.
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    /// Create a renderer loading templates from a views directory.
    ///
    /// Templates are read lazily on first use and kept for the lifetime of
    /// the renderer.
    #[must_use]
    pub fn from_dir(views_dir: impl AsRef<Path>) -> Self {
        let mut env = Self::environment();
        env.set_loader(minijinja::path_loader(views_dir.as_ref().to_path_buf()));
        Self { env }
    }

    /// Create a renderer from in-memory templates.
    ///
    /// Names are given without extension, as passed to [`Renderer::render`].
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if a template fails to parse.
    pub fn from_templates<I, N, S>(templates: I) -> Result<Self, RenderError>
    where
        I: IntoIterator<Item = (N, S)>,
        N: Into<String>,
        S: Into<String>,
    {
        let mut env = Self::environment();
        for (name, source) in templates {
            let name = name.into();
            env.add_template_owned(template_file(&name), source.into())
                .map_err(|source| RenderError {
                    template: name,
                    source,
                })?;
        }
        Ok(Self { env })
    }

    /// Render a named template with the given context.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the template is missing, fails to parse, or
    /// raises an error while rendering.
    pub fn render<S: Serialize>(&self, name: &str, ctx: &S) -> Result<String, RenderError> {
        let wrap = |source| RenderError {
            template: name.to_owned(),
            source,
        };
        let template = self.env.get_template(&template_file(name)).map_err(wrap)?;
        let html = template.render(ctx).map_err(wrap)?;
        debug!(template = name, bytes = html.len(), "Rendered template");
        Ok(html)
    }

    /// Base environment with helpers installed.
    ///
    /// Content fields are optional, so lookups through missing fields render
    /// as empty instead of failing the page.
    fn environment() -> Environment<'static> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Chainable);
        helpers::install(&mut env);
        env
    }
}

fn template_file(name: &str) -> String {
    format!("{name}.{TEMPLATE_EXTENSION}")
}
