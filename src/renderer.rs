//! Template renderer and rendering functionality for stencil.
//! Wraps a MiniJinja environment that carries the custom filters and, when
//! configured, a loader rooted at the template directory.
use crate::error::{Error, Result};
use log::error;
use minijinja::Environment;
use std::path::Path;

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string with the given context.
    ///
    /// # Arguments
    /// * `template` - Template string to render
    /// * `context` - Context variables for rendering
    ///
    /// # Returns
    /// * `Result<String>` - Rendered template string
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String>;
}

/// MiniJinja-based template rendering engine.
pub struct MiniJinjaRenderer {
    /// MiniJinja environment instance
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a renderer with the stencil filters registered and no loader.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.add_filter("toFolder", to_folder);
        env.add_filter("toTitleCase", to_title_case);
        Self { env }
    }

    /// Creates a renderer whose `include`/`extends`/`import` tags resolve
    /// against `template_dir`.
    pub fn with_template_dir<P: AsRef<Path>>(template_dir: P) -> Self {
        let mut renderer = Self::new();
        renderer
            .env
            .set_loader(minijinja::path_loader(template_dir.as_ref().to_path_buf()));
        renderer
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        MiniJinjaRenderer::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    /// Renders a template string using MiniJinja.
    ///
    /// On failure the template source and the full context are logged before
    /// the error is returned, so the offending input can be inspected.
    ///
    /// # Errors
    /// * `Error::TemplateRenderError` on syntax errors or failed evaluation
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String> {
        self.env.render_str(template, context).map_err(|e| {
            error!("{}", render_failure_report(template, context, &e));
            Error::TemplateRenderError(e)
        })
    }
}

/// Diagnostic logged when rendering fails: the template source, the context
/// as pretty-printed JSON and the MiniJinja error with its detail.
pub fn render_failure_report(
    template: &str,
    context: &serde_json::Value,
    err: &minijinja::Error,
) -> String {
    let data = serde_json::to_string_pretty(context).unwrap_or_else(|_| context.to_string());
    format!("Error rendering template:\nTemplate: {template}\nData:\n{data}\nError: {err:#}")
}

/// `com.example.app` -> `com/example/app`
pub fn to_folder(value: String) -> String {
    value.replace('.', "/")
}

/// `hello_big_world` -> `Hello Big World`
///
/// Underscores become spaces, then every letter that follows a non-letter is
/// upper-cased and every other letter lower-cased.
pub fn to_title_case(value: String) -> String {
    let mut result = String::with_capacity(value.len());
    let mut previous_is_letter = false;
    for c in value.chars().map(|c| if c == '_' { ' ' } else { c }) {
        if previous_is_letter {
            result.extend(c.to_lowercase());
        } else {
            result.extend(c.to_uppercase());
        }
        previous_is_letter = c.is_alphabetic();
    }
    result
}
