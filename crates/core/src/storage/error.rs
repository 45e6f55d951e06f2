use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
    /// An error reported by the remote database service.
    #[error("{operation} failed: {message}")]
    Remote {
        operation: &'static str,
        code: Option<String>,
        message: String,
    },
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    /// Builds a remote error without an error code.
    pub fn remote(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Remote {
            operation,
            code: None,
            message: message.into(),
        }
    }

    /// Builds a remote error carrying the service error code.
    pub fn remote_with_code(
        operation: &'static str,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Remote {
            operation,
            code: Some(code.into()),
            message: message.into(),
        }
    }

    /// The remote error code, if this error came from the database service.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Remote { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
