use thiserror::Error;

/// Core error types.
#[derive(Error, Debug)]
pub enum CoreError {
    /// The raw JSON could not be parsed into a document.
    #[error("invalid document: {0}")]
    Document(#[from] serde_json::Error),
}
