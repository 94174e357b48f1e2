//! Command-line interface implementation for envtemplate.
//! Provides argument parsing and help text formatting using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::pipeline::RunConfig;

const LONG_ABOUT: &str = r#"Process a templated file, using environment and command-line variables
for substitutions.

Two functions are made available to templates:

env: a required environment variable. Rendering fails if it is unset.
    {{ env("TBN_HOME") }}

envOrDefault: an optional environment variable with a default value. The
default may reference other environment variables:
    {{ envOrDefault("TBN_HOME", "~/$TBN_WORKSPACE/tbn") }}

Additional variables are given with --vars and called without arguments:
    envtemplate --vars region=us-east-1 renders {{ region() }} as us-east-1"#;

/// Command-line arguments structure for envtemplate.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Process a templated config file",
    long_about = LONG_ABOUT
)]
pub struct Args {
    /// Unused. Use --in to name the input file
    #[arg(value_name = "FILENAME", hide = true)]
    pub filename: Option<String>,

    /// The input filename. If empty, input is read from STDIN
    #[arg(long = "in", value_name = "FILENAME", default_value = "")]
    pub input: String,

    /// The output filename. If empty, output goes to STDOUT
    #[arg(long = "out", value_name = "FILENAME", default_value = "")]
    pub output: String,

    /// When --in and --out are the same file, don't keep a backup of the input file
    #[arg(long)]
    pub no_backup: bool,

    /// Additional variables referenced by the template, as `name=value`.
    /// Multiple values may be comma-separated or the flag may be repeated
    #[arg(long, value_name = "NAME=VALUE", value_delimiter = ',')]
    pub vars: Vec<String>,

    /// JSON or YAML file mapping additional variable names to string values
    #[arg(long, value_name = "FILENAME")]
    pub vars_file: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

impl From<Args> for RunConfig {
    fn from(args: Args) -> Self {
        Self {
            input: non_empty_path(args.input),
            output: non_empty_path(args.output),
            no_backup: args.no_backup,
            vars: args.vars,
            vars_file: args.vars_file,
        }
    }
}

fn non_empty_path(value: String) -> Option<PathBuf> {
    if value.is_empty() {
        None
    } else {
        Some(PathBuf::from(value))
    }
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With clap's default error handling for argument errors
pub fn get_args() -> Args {
    Args::parse()
}
