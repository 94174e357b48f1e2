//! Reads a template, renders it and writes the result.
//!
//! The run is strictly sequential: resolve variables, read input, write the
//! backup (in-place runs only), render in memory, write output. Output is
//! written only once rendering has fully succeeded.

use log::debug;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::constants::{BACKUP_SUFFIX, STDIN_TEMPLATE_NAME};
use crate::environment::EnvironmentAccessor;
use crate::error::Result;
use crate::renderer::{MiniJinjaRenderer, TemplateRenderer};
use crate::resolver::resolve;

/// Settings for a single run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunConfig {
    /// Template file; `None` reads standard input
    pub input: Option<PathBuf>,
    /// Destination file; `None` writes standard output
    pub output: Option<PathBuf>,
    /// Skip the backup when input and output are the same file
    pub no_backup: bool,
    /// Raw `name=value` variable specifications
    pub vars: Vec<String>,
    /// Optional JSON or YAML file of additional variables
    pub vars_file: Option<PathBuf>,
}

impl RunConfig {
    /// Returns the backup path when this run renders a file in place.
    ///
    /// Paths are compared as given, so distinct paths that resolve to the same
    /// file through links are treated as different files.
    pub fn backup_path(&self) -> Option<PathBuf> {
        if self.no_backup {
            return None;
        }
        match (&self.input, &self.output) {
            (Some(input), Some(output)) if input == output => Some(backup_path_for(input)),
            _ => None,
        }
    }

    fn template_name(&self) -> String {
        self.input
            .as_ref()
            .map_or_else(|| STDIN_TEMPLATE_NAME.to_string(), |p| p.display().to_string())
    }
}

/// `<path>.bak`
pub fn backup_path_for(path: &Path) -> PathBuf {
    let mut backup = path.as_os_str().to_os_string();
    backup.push(BACKUP_SUFFIX);
    PathBuf::from(backup)
}

/// Executes one render.
///
/// # Arguments
/// * `config` - Run settings
/// * `environment` - Environment variable source for `env` and `envOrDefault`
/// * `stdin` - Read when `config.input` is `None`
/// * `stdout` - Written when `config.output` is `None`
///
/// # Errors
/// Configuration errors are returned before any input is read. I/O and
/// template errors abort the run without writing the output.
pub fn run<R: Read, W: Write>(
    config: &RunConfig,
    environment: Arc<dyn EnvironmentAccessor>,
    stdin: R,
    stdout: W,
) -> Result<()> {
    let functions = resolve(config.vars.as_slice(), config.vars_file.as_deref())?;
    debug!("Resolved {} template functions", functions.len());

    let input = read_input(config.input.as_deref(), stdin)?;

    if let Some(backup) = config.backup_path() {
        debug!("Writing backup: {}", backup.display());
        write_file(&backup, &input)?;
    }

    let source = String::from_utf8(input)?;
    let renderer = MiniJinjaRenderer::new(&functions, environment);
    let rendered = renderer.render(&config.template_name(), &source)?;

    write_output(config.output.as_deref(), rendered.as_bytes(), stdout)
}

fn read_input<R: Read>(path: Option<&Path>, mut stdin: R) -> Result<Vec<u8>> {
    match path {
        Some(path) => {
            debug!("Reading template: {}", path.display());
            Ok(fs::read(path)?)
        }
        None => {
            debug!("Reading template from stdin");
            let mut buffer = Vec::new();
            stdin.read_to_end(&mut buffer)?;
            Ok(buffer)
        }
    }
}

fn write_output<W: Write>(path: Option<&Path>, content: &[u8], mut stdout: W) -> Result<()> {
    match path {
        Some(path) => {
            debug!("Writing output: {}", path.display());
            write_file(path, content)
        }
        None => {
            stdout.write_all(content)?;
            stdout.flush()?;
            Ok(())
        }
    }
}

/// Creates or truncates `path`. New files are world-readable and owner-writable.
fn write_file(path: &Path, content: &[u8]) -> Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }

    let mut file = options.open(path)?;
    file.write_all(content)?;
    Ok(())
}
