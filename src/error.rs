//! Error handling for envtemplate.
//! Defines the error type shared by variable resolution and the render pipeline.

use std::{io, string::FromUtf8Error};
use thiserror::Error;

/// Custom error types for envtemplate operations.
///
/// Configuration errors (bad variable names, collisions, unreadable vars files)
/// are detected before any input is read. Everything else happens while the
/// template is being read, rendered or written.
#[derive(Error, Debug)]
pub enum Error {
    /// A `--vars` name does not match the template identifier syntax
    #[error("invalid template variable name: {0:?}")]
    InvalidVariableName(String),

    /// A `--vars` name collides with a built-in function
    #[error("{0:?} cannot be used as a variable name")]
    ReservedVariableName(String),

    /// The same variable name was supplied more than once
    #[error("variable {0:?} specified more than once")]
    DuplicateVariable(String),

    /// The file given with `--vars-file` could not be read or parsed
    #[error("invalid vars file {path}: {message}")]
    VarsFileError { path: String, message: String },

    /// File system and standard stream failures, reported as the system reports them
    #[error("{0}")]
    IoError(#[from] io::Error),

    /// The template input is not UTF-8 text
    #[error("template input is not valid UTF-8: {0}")]
    Utf8Error(#[from] FromUtf8Error),

    /// Parse or execution failure raised by the template engine
    #[error("template: {name}:{}: {message}", position(.line, .column))]
    TemplateError {
        name: String,
        line: Option<usize>,
        column: Option<usize>,
        message: String,
    },
}

impl Error {
    /// Returns true for errors caused by invalid command-line configuration
    /// rather than by a failure while rendering.
    pub fn is_bad_input(&self) -> bool {
        matches!(
            self,
            Error::InvalidVariableName(_)
                | Error::ReservedVariableName(_)
                | Error::DuplicateVariable(_)
                | Error::VarsFileError { .. }
        )
    }
}

fn position(line: &Option<usize>, column: &Option<usize>) -> String {
    match (*line, *column) {
        (Some(line), Some(column)) => format!("{line}:{column}"),
        (Some(line), None) => line.to_string(),
        _ => "?".to_string(),
    }
}

/// Convenience type alias for Results with Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// Bad input exits with status code 2, the code clap uses for usage errors.
/// All other failures exit with status code 1.
pub fn default_error_handler(err: Error) -> ! {
    eprintln!("Error: {err}");
    if err.is_bad_input() {
        eprintln!("Run with --help for usage.");
        std::process::exit(2);
    }
    std::process::exit(1);
}
