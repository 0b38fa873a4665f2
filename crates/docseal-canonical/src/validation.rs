use thiserror::Error;

/// Rejection of an identifier or digest that does not satisfy its format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The value does not match the type's pattern.
    #[error("invalid {field}: {value:?}")]
    PatternMismatch {
        /// Type or field that failed validation.
        field: &'static str,
        /// Offending value.
        value: String,
    },
    /// The value is empty.
    #[error("{field} is empty")]
    Empty {
        /// Type or field that was empty.
        field: &'static str,
    },
}

