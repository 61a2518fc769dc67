use crate::codes;
use thiserror::Error;

/// Shared error type for OncoBill tools and services
#[derive(Error, Debug)]
pub enum OncoBillError {
    /// Input validation failures
    #[error("Validation error: {message}")]
    ValidationError { code: &'static str, message: String },

    /// Reference table errors
    #[error("Reference table error: {0}")]
    CatalogError(String),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    ConfigError { code: &'static str, message: String },

    /// File and stream errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Internal system errors
    #[error("Internal error: {0}")]
    InternalError(String),

    /// Wrapped external errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl OncoBillError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            code: codes::validation::INVALID_INPUT,
            message: message.into(),
        }
    }

    pub fn config(code: &'static str, message: impl Into<String>) -> Self {
        Self::ConfigError {
            code,
            message: message.into(),
        }
    }

    /// Stable error code for reports and exit handling
    pub fn code(&self) -> &'static str {
        match self {
            Self::ValidationError { code, .. } | Self::ConfigError { code, .. } => *code,
            Self::CatalogError(_) => codes::catalog::INVALID_REFERENCE_TABLE,
            Self::IoError(_) => codes::system::IO_FAILED,
            Self::SerializationError(_) => codes::system::SERIALIZATION_FAILED,
            Self::InternalError(_) | Self::Other(_) => codes::system::INTERNAL,
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            Self::ValidationError { .. } => "validation",
            Self::CatalogError(_) => "catalog",
            Self::ConfigError { .. } => "config",
            Self::IoError(_) => "io",
            Self::SerializationError(_) => "serialization",
            Self::InternalError(_) | Self::Other(_) => "internal",
        }
    }

    /// Caller-correctable errors, as opposed to system failures
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ValidationError { .. })
    }
}

/// Result type alias for OncoBill operations
pub type Result<T> = std::result::Result<T, OncoBillError>;
