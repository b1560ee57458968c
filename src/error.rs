use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the simulation crate.
///
/// Configuration problems are detected eagerly, before the first step runs;
/// `step()` itself has no error path.
#[derive(Debug, Error)]
pub enum Error {
    /// Rejected configuration value (arena size, speed, step count, jitter).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Propagated I/O errors from trace or config files.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Propagated (de)serialization errors from trace or config files.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
