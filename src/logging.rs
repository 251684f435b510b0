//! Logging setup
//!
//! Every run logs to the console and appends the same events, without ANSI
//! colors, to `<logs-dir>/<log-identifier>.log`.

use crate::config::OutputConfig;
use crate::TallyError;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Creates the output and logs directories when they are missing
///
/// # Returns
///
/// * `Ok(Vec<PathBuf>)` - The directories that did not exist before
/// * `Err(io::Error)` - A directory could not be created
pub fn prepare_directories(output: &OutputConfig) -> io::Result<Vec<PathBuf>> {
    let mut created = Vec::new();

    for dir in [&output.output_dir, &output.logs_dir] {
        if !dir.is_dir() {
            fs::create_dir_all(dir)?;
            created.push(dir.clone());
        }
    }

    Ok(created)
}

/// Builds the level filter for the given verbosity
fn level_filter(verbose: u8, quiet: bool) -> EnvFilter {
    if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("link_tally=info,warn"),
            1 => EnvFilter::new("link_tally=debug,info"),
            2 => EnvFilter::new("link_tally=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    }
}

/// Installs the global subscriber with a console layer and a log file layer
///
/// The logs directory must exist; see [`prepare_directories`].
pub fn init_logging(verbose: u8, quiet: bool, output: &OutputConfig) -> Result<(), TallyError> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(output.log_file_path())?;

    let console = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false);

    let file = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(Mutex::new(log_file));

    tracing_subscriber::registry()
        .with(level_filter(verbose, quiet))
        .with(console)
        .with(file)
        .try_init()
        .map_err(|e| TallyError::Logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn output_in(root: &std::path::Path) -> OutputConfig {
        OutputConfig {
            output_dir: root.join("output"),
            logs_dir: root.join("logs"),
            log_identifier: "test_run".to_string(),
        }
    }

    #[test]
    fn test_prepare_directories_creates_missing() {
        let dir = tempdir().unwrap();
        let output = output_in(dir.path());

        let created = prepare_directories(&output).unwrap();
        assert_eq!(created, vec![output.output_dir.clone(), output.logs_dir.clone()]);
        assert!(output.output_dir.is_dir());
        assert!(output.logs_dir.is_dir());
    }

    #[test]
    fn test_prepare_directories_is_idempotent() {
        let dir = tempdir().unwrap();
        let output = output_in(dir.path());

        prepare_directories(&output).unwrap();
        assert!(prepare_directories(&output).unwrap().is_empty());
    }

    #[test]
    fn test_prepare_directories_fails_on_file() {
        let dir = tempdir().unwrap();
        let output = output_in(dir.path());
        fs::write(&output.output_dir, "not a directory").unwrap();

        assert!(prepare_directories(&output).is_err());
    }

    #[test]
    fn test_level_filter_quiet() {
        assert_eq!(level_filter(0, true).to_string(), "error");
        assert_eq!(level_filter(3, false).to_string(), "trace");
    }
}
