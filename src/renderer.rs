//! Template rendering for envtemplate.
//! Binds a function set to a MiniJinja environment and renders templates
//! without any data context.
use crate::environment::EnvironmentAccessor;
use crate::error::{Error, Result};
use crate::resolver::{FunctionSet, TemplateFunction};
use minijinja::{AutoEscape, Environment, ErrorKind, UndefinedBehavior};
use std::ops::Range;
use std::sync::Arc;

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template.
    ///
    /// # Arguments
    /// * `name` - Name used in error messages, usually the input path
    /// * `template` - Template source
    ///
    /// # Returns
    /// * `Result<String>` - Rendered text
    fn render(&self, name: &str, template: &str) -> Result<String>;
}

/// MiniJinja-based template rendering engine.
pub struct MiniJinjaRenderer {
    /// MiniJinja environment with every function of the set registered
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a renderer exposing `functions` to templates.
    ///
    /// `env` and `envOrDefault` read variables through `environment` when the
    /// template calls them, not at construction.
    pub fn new(functions: &FunctionSet, environment: Arc<dyn EnvironmentAccessor>) -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        // The template name is the input path; values are never escaped by extension.
        env.set_auto_escape_callback(|_| AutoEscape::None);

        for (name, function) in functions.iter() {
            let name = name.to_string();
            match function {
                TemplateFunction::Env => {
                    let environment = Arc::clone(&environment);
                    env.add_function(name, move |key: String| {
                        lookup_required(environment.as_ref(), &key)
                    });
                }
                TemplateFunction::EnvOrDefault => {
                    let environment = Arc::clone(&environment);
                    env.add_function(name, move |key: String, default: String| {
                        environment.lookup(&key).unwrap_or_else(|| environment.expand(&default))
                    });
                }
                TemplateFunction::Value(value) => {
                    let value = value.clone();
                    env.add_function(name, move || value.clone());
                }
            }
        }

        Self { env }
    }
}

fn lookup_required(
    environment: &dyn EnvironmentAccessor,
    key: &str,
) -> std::result::Result<String, minijinja::Error> {
    environment.lookup(key).ok_or_else(|| {
        minijinja::Error::new(
            ErrorKind::InvalidOperation,
            format!("no value for ${key} in environment"),
        )
    })
}

impl TemplateRenderer for MiniJinjaRenderer {
    /// Renders a template string using MiniJinja.
    ///
    /// # Errors
    /// * `Error::TemplateError` if the template does not parse, calls an
    ///   unknown name, or a called function fails
    fn render(&self, name: &str, template: &str) -> Result<String> {
        self.env
            .render_named_str(name, template, ())
            .map_err(|err| template_error(name, template, &err))
    }
}

/// Converts an engine error into `Error::TemplateError`, resolving its byte
/// span in `source` to a column.
fn template_error(name: &str, source: &str, err: &minijinja::Error) -> Error {
    let column = err.line().map(|_| error_column(source, err.range()));
    let message = match err.detail() {
        Some(detail) => format!("{}: {}", err.kind(), detail),
        None => err.kind().to_string(),
    };

    Error::TemplateError { name: name.to_string(), line: err.line(), column, message }
}

/// Column of an error span, or the first column when the engine gave only a line.
fn error_column(source: &str, range: Option<Range<usize>>) -> usize {
    range.map_or(1, |range| column_at(source, range.start))
}

/// 1-based column of the byte `offset` in `source`, counted in characters.
fn column_at(source: &str, offset: usize) -> usize {
    let offset = offset.min(source.len());
    let prefix = source.get(..offset).unwrap_or(source);
    let line_start = prefix.rfind('\n').map_or(0, |i| i + 1);
    prefix[line_start..].chars().count() + 1
}
