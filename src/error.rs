//! Error types for quill.

use thiserror::Error;

/// The main error type for quill operations.
#[derive(Debug, Error)]
pub enum QuillError {
    /// A raw SQL fragment could not be tokenized.
    #[error("Parse error at position {position}: {message}")]
    Parse { position: usize, message: String },

    /// A builder or precompiler method received a value outside its contract.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The native client rejected a statement.
    #[error("SQL error: {0}")]
    Sql(String),

    /// Opening, closing or authenticating a connection failed.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl QuillError {
    /// Create a parse error at the given position.
    pub fn parse(position: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            position,
            message: message.into(),
        }
    }

    /// Create an invalid argument error.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}

impl From<sqlx::Error> for QuillError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db) => QuillError::Sql(db.message().to_string()),
            sqlx::Error::Io(e) => QuillError::Connection(e.to_string()),
            sqlx::Error::Tls(e) => QuillError::Connection(e.to_string()),
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                QuillError::Connection(err.to_string())
            }
            other => QuillError::Sql(other.to_string()),
        }
    }
}

/// Result type alias for quill operations.
pub type QuillResult<T> = Result<T, QuillError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = QuillError::parse(5, "unexpected character");
        assert_eq!(
            err.to_string(),
            "Parse error at position 5: unexpected character"
        );
    }

    #[test]
    fn test_invalid_display() {
        let err = QuillError::invalid("operator 'LIKE?' is not a COMPARISON operator");
        assert_eq!(
            err.to_string(),
            "Invalid argument: operator 'LIKE?' is not a COMPARISON operator"
        );
    }
}
