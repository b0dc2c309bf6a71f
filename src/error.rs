/// Error types for listwise
///
/// This module defines every failure the list assistant can report.
/// Uses thiserror for ergonomic error handling.
///
/// Malformed commands are not errors: the interpreter degrades them to
/// `Unknown` intents. Only blank input, oversized items and store failures
/// end up here.

use thiserror::Error;

/// Main error type for listwise operations
#[derive(Error, Debug)]
pub enum ListError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O errors (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Blank command or item text
    #[error("Input is empty")]
    EmptyInput,

    /// Item text exceeds maximum length
    #[error("Item exceeds maximum allowed length of {0} characters")]
    ItemTooLong(usize),

    /// Invalid CLI usage or command shape
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with message
    #[error("{0}")]
    Generic(String),
}

/// Result type alias for listwise operations
pub type Result<T> = std::result::Result<T, ListError>;

/// Convert ListError to a user-friendly error message
impl ListError {
    pub fn user_message(&self) -> String {
        match self {
            ListError::Database(e) => {
                format!("Database error occurred. Please try again. Details: {}", e)
            }
            ListError::Io(e) => {
                format!("File system error. Check permissions. Details: {}", e)
            }
            ListError::Serialization(e) => {
                format!("Data format error: {}", e)
            }
            ListError::EmptyInput => "Nothing to do: the command was empty".to_string(),
            ListError::ItemTooLong(max) => {
                format!("Item names are limited to {} characters", max)
            }
            ListError::InvalidCommand(reason) => {
                format!("Invalid command: {}", reason)
            }
            ListError::Config(msg) => {
                format!("Configuration issue: {}", msg)
            }
            ListError::Generic(msg) => msg.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_user_messages() {
        let err = ListError::EmptyInput;
        assert!(err.user_message().contains("empty"));

        let err = ListError::ItemTooLong(200);
        assert!(err.user_message().contains("200"));
    }

    #[test]
    fn test_error_display() {
        let err = ListError::InvalidCommand("missing query".to_string());
        let display = format!("{}", err);
        assert!(display.contains("Invalid command"));
    }

    #[test]
    fn test_io_error_converts() {
        fn fails() -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))?;
            Ok(())
        }

        assert!(matches!(fails(), Err(ListError::Io(_))));
    }
}
