use std::path::PathBuf;

/// Rejected session or stored configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid tempo {0} bpm: must be a positive, finite number")]
    InvalidBpm(f64),
    #[error("invalid session duration {0}s: must be at least one second")]
    InvalidDuration(u64),
    #[error("failed to access config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors emitted when configuring the log subscriber.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("no state directory available for the log file")]
    NoStateDir,
    #[error("failed to open log file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("a global subscriber is already installed")]
    AlreadyInitialised,
}
