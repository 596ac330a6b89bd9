//! Common error types for Bookshelf

use thiserror::Error;

/// Common result type for Bookshelf operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types shared between the library and the web service
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_name_their_source() {
        let err = Error::Config("session_ttl_hours must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: session_ttl_hours must be positive"
        );

        let err = Error::Internal("Failed to parse expires_at".to_string());
        assert_eq!(err.to_string(), "Internal error: Failed to parse expires_at");
    }

    #[test]
    fn io_errors_convert() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, Error::Io(_)));
    }
}
