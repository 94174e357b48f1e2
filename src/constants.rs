//! Common constants used throughout envtemplate.

/// Built-in function returning a required environment variable
pub const ENV_FUNCTION: &str = "env";

/// Built-in function returning an optional environment variable or an expanded default
pub const ENV_OR_DEFAULT_FUNCTION: &str = "envOrDefault";

/// Suffix of the backup written when input and output are the same file
pub const BACKUP_SUFFIX: &str = ".bak";

/// Template name used in diagnostics when the input is read from stdin
pub const STDIN_TEMPLATE_NAME: &str = "<stdin>";
