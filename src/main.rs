//! envtemplate's main application entry point.
//! Parses arguments, configures logging and runs the render pipeline once.

use std::io;
use std::sync::Arc;

use envtemplate::{
    cli::get_args,
    environment::OsEnvironment,
    error::default_error_handler,
    logger::init_logger,
    pipeline::{run, RunConfig},
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Some(filename) = &args.filename {
        log::warn!("Ignoring positional argument '{}'; use --in to name the input file", filename);
    }

    let config = RunConfig::from(args);
    if let Err(err) = run(&config, Arc::new(OsEnvironment), io::stdin().lock(), io::stdout().lock()) {
        default_error_handler(err);
    }
}
