//! Error types for store operations.

use docseal_canonical::ReviewId;
use docseal_core::GatewayError;
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O error during read or write.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Record JSON could not be encoded or decoded.
    #[error("record JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Stored payload is not valid base64.
    #[error("payload decode error: {0}")]
    Decode(#[from] base64::DecodeError),
    /// Payload could not be canonicalized for its digest.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] docseal_canonical::CanonicalizationError),
    /// An identifier is unsafe to use as a path component.
    #[error("invalid identifier: {0}")]
    Validation(#[from] docseal_canonical::ValidationError),
    /// A record with this id and version already exists.
    #[error("review item {0} already exists")]
    AlreadyExists(ReviewId),
    /// No record with this id.
    #[error("review item {0} not found")]
    NotFound(ReviewId),
}

impl From<StoreError> for GatewayError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Io(e) => GatewayError::Io(e),
            StoreError::NotFound(id) => GatewayError::NotFound(id.to_string()),
            other => GatewayError::Encoding(other.to_string()),
        }
    }
}
