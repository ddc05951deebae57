use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::app_dirs::AppDirs;
use crate::error::LoggingError;

/// Install the global subscriber, appending to the application log file.
///
/// The terminal belongs to the UI, so nothing is written to stdout or
/// stderr. `RUST_LOG` overrides the default `info` filter.
pub fn init_file_logging() -> Result<(), LoggingError> {
    let path = AppDirs::log_path().ok_or(LoggingError::NoStateDir)?;
    init_logging_at(&path)
}

pub fn init_logging_at(path: &Path) -> Result<(), LoggingError> {
    let open_err = |source: std::io::Error| LoggingError::Open {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(open_err)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(open_err)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|_| LoggingError::AlreadyInitialised)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_init_creates_log_file_and_refuses_second_install() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logs").join("tapwise.log");

        let first = init_logging_at(&path);
        assert!(path.exists());

        tracing::info!("logging test");
        if first.is_ok() {
            assert!(matches!(
                init_logging_at(&path),
                Err(LoggingError::AlreadyInitialised)
            ));
        }
    }
}
