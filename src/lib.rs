//! envtemplate renders a template file, substituting values from the process
//! environment and from variables given on the command line. It is meant for
//! generating configuration files at deploy time.

/// Command-line interface module for the envtemplate application
pub mod cli;

/// Names shared across modules
pub mod constants;

/// Environment variable lookup and shell-style expansion
pub mod environment;

/// Error types and handling for the envtemplate application
pub mod error;

/// Logger initialization
pub mod logger;

/// Read, backup, render and write orchestration
pub mod pipeline;

/// Template rendering on top of MiniJinja
pub mod renderer;

/// Template function set construction and variable validation
/// Handles `--vars` specifications and vars files
pub mod resolver;
