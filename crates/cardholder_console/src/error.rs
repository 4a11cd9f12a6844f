//! Error types for the console binary.

use cardholder_client::ApiError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that stop the console from starting or keep running.
///
/// Failed requests during normal use are not errors at this level: the
/// controllers turn them into messages on screen.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The data clients could not be built
    #[error("API client error: {0}")]
    Api(#[from] ApiError),

    /// Terminal or log file IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The log subscriber could not be installed
    #[error("Logging setup error: {0}")]
    Logging(String),
}

impl ConsoleError {
    /// Create a logging setup error
    pub fn logging(msg: impl Into<String>) -> Self {
        Self::Logging(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConsoleError::from(ConfigError::Validation(vec![
            "Invalid log_level 'loud'".to_string(),
        ]));
        let text = err.to_string();
        assert!(text.starts_with("Configuration error"));
        assert!(text.contains("log_level"));
    }

    #[test]
    fn test_logging_error() {
        let err = ConsoleError::logging("directive rejected");
        assert!(err.to_string().contains("directive rejected"));
    }
}
