//! Builds the set of functions a template may call.
//!
//! Two built-ins are always present: `env` and `envOrDefault`. Every variable
//! given with `--vars name=value` (or loaded from `--vars-file`) becomes a
//! zero-argument function returning its value.

use indexmap::IndexMap;
use log::debug;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

use crate::constants::{ENV_FUNCTION, ENV_OR_DEFAULT_FUNCTION};
use crate::error::{Error, Result};

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid identifier pattern"));

/// Returns true if `name` can be called from a template.
pub fn is_valid_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name)
}

/// A function callable from a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateFunction {
    /// `env(key)`: required environment variable
    Env,
    /// `envOrDefault(key, default)`: optional environment variable with an expanded default
    EnvOrDefault,
    /// A user-supplied variable, fixed at construction
    Value(String),
}

/// A single `name=value` variable specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableSpec {
    pub name: String,
    pub value: String,
}

impl VariableSpec {
    /// Splits `spec` on its first `=`. Without an `=` the whole string is the
    /// name and the value is empty.
    pub fn parse(spec: &str) -> Self {
        let (name, value) = spec.split_once('=').unwrap_or((spec, ""));
        Self { name: name.to_string(), value: value.to_string() }
    }
}

/// The names available to a template, in registration order.
#[derive(Debug, Clone)]
pub struct FunctionSet {
    functions: IndexMap<String, TemplateFunction>,
}

impl FunctionSet {
    /// Creates a set holding only the built-in functions.
    pub fn builtins() -> Self {
        let mut functions = IndexMap::new();
        functions.insert(ENV_FUNCTION.to_string(), TemplateFunction::Env);
        functions.insert(ENV_OR_DEFAULT_FUNCTION.to_string(), TemplateFunction::EnvOrDefault);
        Self { functions }
    }

    /// Builds the full set from variable specifications, in order.
    ///
    /// # Errors
    /// * `Error::InvalidVariableName` if a name is not an identifier
    /// * `Error::ReservedVariableName` if a name is `env` or `envOrDefault`
    /// * `Error::DuplicateVariable` if a name is given twice
    pub fn from_specs<I>(specs: I) -> Result<Self>
    where
        I: IntoIterator<Item = VariableSpec>,
    {
        let mut set = Self::builtins();
        for spec in specs {
            set.add_variable(spec)?;
        }
        Ok(set)
    }

    /// Adds a user variable after validating its name.
    pub fn add_variable(&mut self, spec: VariableSpec) -> Result<()> {
        let VariableSpec { name, value } = spec;

        if !is_valid_identifier(&name) {
            return Err(Error::InvalidVariableName(name));
        }
        if is_builtin(&name) {
            return Err(Error::ReservedVariableName(name));
        }
        if self.functions.contains_key(&name) {
            return Err(Error::DuplicateVariable(name));
        }

        debug!("Registering template variable '{}'", name);
        self.functions.insert(name, TemplateFunction::Value(value));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&TemplateFunction> {
        self.functions.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TemplateFunction)> {
        self.functions.iter().map(|(name, function)| (name.as_str(), function))
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

fn is_builtin(name: &str) -> bool {
    name == ENV_FUNCTION || name == ENV_OR_DEFAULT_FUNCTION
}

/// Flattens raw `--vars` values into specifications.
///
/// Comma-joined values are already split by the argument parser, so each
/// entry here holds exactly one `name=value` pair.
pub fn parse_specs<S: AsRef<str>>(raw: &[S]) -> Vec<VariableSpec> {
    raw.iter().map(|s| VariableSpec::parse(s.as_ref())).collect()
}

/// Parses the contents of a vars file: a flat mapping of names to string values.
/// JSON is tried first, then YAML.
pub fn parse_vars_file(content: &str) -> std::result::Result<Vec<VariableSpec>, String> {
    let mapping: IndexMap<String, String> = match serde_json::from_str(content) {
        Ok(mapping) => mapping,
        Err(_) => serde_yaml::from_str(content).map_err(|e| e.to_string())?,
    };

    Ok(mapping.into_iter().map(|(name, value)| VariableSpec { name, value }).collect())
}

/// Reads variable specifications from a JSON or YAML file.
///
/// # Errors
/// * `Error::VarsFileError` if the file cannot be read or is not a flat
///   string-to-string mapping
pub fn load_vars_file<P: AsRef<Path>>(path: P) -> Result<Vec<VariableSpec>> {
    let path = path.as_ref();
    debug!("Loading variables from {}", path.display());

    let vars_file_error =
        |message: String| Error::VarsFileError { path: path.display().to_string(), message };

    let content = std::fs::read_to_string(path).map_err(|e| vars_file_error(e.to_string()))?;
    parse_vars_file(&content).map_err(vars_file_error)
}

/// Builds the function set from the command-line variables followed by the
/// variables of the optional vars file.
pub fn resolve<S: AsRef<str>>(vars: &[S], vars_file: Option<&Path>) -> Result<FunctionSet> {
    let mut specs = parse_specs(vars);
    if let Some(path) = vars_file {
        specs.extend(load_vars_file(path)?);
    }
    FunctionSet::from_specs(specs)
}
