//! Error types for store operations

use thiserror::Error;

use crate::format::Format;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Error taxonomy for store operations.
///
/// Every failure surfaces to the caller unchanged; the library performs no
/// retries and no silent recovery. `NotFound` is folded into a plain `false`
/// only inside [`Store::exists`](crate::Store::exists).
#[derive(Error, Debug)]
pub enum StoreError {
    /// Credential bundle is incomplete or invalid
    #[error("configuration error: {message}")]
    Config { message: String },

    /// A store operation was invoked before `init` installed a client handle
    #[error("store is not initialized: call init first")]
    NotInitialized,

    /// A required parameter was empty
    #[error("missing required parameter: {name}")]
    MissingParameter { name: String },

    /// Filename carries no `.`-separated extension
    #[error("no extension in filename: {filename}")]
    NoExtension { filename: String },

    /// Extension does not map to a supported format
    #[error("unsupported format: {extension}")]
    UnsupportedFormat { extension: String },

    /// Payload could not be serialized for the resolved format
    #[error("failed to encode {format} data: {message}")]
    Encode { format: Format, message: String },

    /// Stored bytes could not be parsed as the resolved format
    #[error("failed to decode {format} data: {message}")]
    Decode { format: Format, message: String },

    /// Object does not exist in the backend
    #[error("object not found: s3://{bucket}/{key}")]
    NotFound { bucket: String, key: String },

    /// Transport, auth or backend failure
    #[error("storage error: {message}")]
    Storage { message: String },
}

impl StoreError {
    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new missing-parameter error
    pub fn missing_parameter(name: impl Into<String>) -> Self {
        Self::MissingParameter { name: name.into() }
    }

    /// Create a new encode error
    pub fn encode(format: Format, message: impl Into<String>) -> Self {
        Self::Encode {
            format,
            message: message.into(),
        }
    }

    /// Create a new decode error
    pub fn decode(format: Format, message: impl Into<String>) -> Self {
        Self::Decode {
            format,
            message: message.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self::NotFound {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Create a new storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config { .. } => "configuration",
            Self::NotInitialized => "configuration",
            Self::MissingParameter { .. } => "validation",
            Self::NoExtension { .. } => "format",
            Self::UnsupportedFormat { .. } => "format",
            Self::Encode { .. } => "serialization",
            Self::Decode { .. } => "serialization",
            Self::NotFound { .. } => "not_found",
            Self::Storage { .. } => "storage",
        }
    }
}
