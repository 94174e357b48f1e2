//! Access to environment variables for the `env` and `envOrDefault` template functions.

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// A `$` reference, alternatives tried in order:
/// `${?}` with a special character, `${}`, `${...}`, an unterminated `${`,
/// a bare special character (`$1`, `$*`, `$-`), then `$NAME`.
/// Only groups 1-4 carry a name; `${}` and unterminated `${` expand to nothing.
static VARIABLE_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\$(?:\{([*#$@!?\-0-9])\}|\{\}|\{([^}]+)\}|\{|([*#$@!?\-0-9])|([A-Za-z_][A-Za-z0-9_]*))",
    )
    .expect("valid expansion pattern")
});

/// Source of environment variables used while rendering a template.
pub trait EnvironmentAccessor: Send + Sync {
    /// Returns the value of `name`, or `None` when it is unset.
    fn lookup(&self, name: &str) -> Option<String>;

    /// Performs shell-style expansion of `text`.
    ///
    /// Every `$NAME` and `${NAME}` is replaced with the value of `NAME`, or with
    /// the empty string when `NAME` is unset. `${NAME}` takes everything up to
    /// the closing brace as the name, and single special characters
    /// (`$1`, `$*`, `$-`, ...) are names on their own. Malformed `${` and `${}`
    /// are dropped. A `$` that does not start a reference is kept as is.
    fn expand(&self, text: &str) -> String {
        VARIABLE_REFERENCE
            .replace_all(text, |caps: &Captures| {
                (1..=4)
                    .find_map(|group| caps.get(group))
                    .and_then(|name| self.lookup(name.as_str()))
                    .unwrap_or_default()
            })
            .into_owned()
    }
}

/// Reads the environment of the running process.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEnvironment;

impl EnvironmentAccessor for OsEnvironment {
    fn lookup(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}
