use thiserror::Error;
use tokio::task::JoinError;

use ruttvakt_config::ConfigError;

#[derive(Debug, Error)]
pub enum MonitorError {
    /// The routing socket could not be opened. Fatal: there is nothing
    /// to observe without it.
    #[error("Route socket setup failed: {0}")]
    Setup(#[source] std::io::Error),

    #[error("Event processing error: {0}")]
    Processing(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<JoinError> for MonitorError {
    fn from(err: JoinError) -> Self {
        MonitorError::Processing(err.to_string())
    }
}
