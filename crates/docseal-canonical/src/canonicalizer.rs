use canonical_json::to_string;
use serde_json::Value;

use crate::digest::Digest;

/// Domain separator for document digests: `b"docseal:document:v1\0"`.
const DOCUMENT_DOMAIN_SEPARATOR: &[u8] = b"docseal:document:v1\0";

/// Error returned when canonicalization fails.
#[derive(thiserror::Error, Debug)]
pub enum CanonicalizationError {
    /// Input bytes were not valid JSON.
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    /// Non-finite number (NaN/Infinity) detected.
    #[error("non-finite number detected at {0}")]
    NonFiniteNumber(String),
    /// Generic failure from the RFC 8785 encoder.
    #[error("other error: {0}")]
    Other(String),
}

/// Produces RFC 8785 canonical bytes for a JSON value.
pub fn canonical_bytes(value: &Value) -> Result<Vec<u8>, CanonicalizationError> {
    reject_non_finite(value, &mut Vec::new())?;
    let canonical = to_string(value).map_err(|err| CanonicalizationError::Other(err.to_string()))?;
    Ok(canonical.into_bytes())
}

/// Computes the content digest of a raw JSON document.
///
/// Formula: `sha256(domain_separator || canonical_bytes(document))`, so two
/// renderings of the same document that differ only in whitespace or key
/// order share a digest.
pub fn document_digest(raw_json: &[u8]) -> Result<Digest, CanonicalizationError> {
    let value: Value = serde_json::from_slice(raw_json)?;
    let bytes = canonical_bytes(&value)?;
    Ok(Digest::sha256(DOCUMENT_DOMAIN_SEPARATOR, &bytes))
}

fn reject_non_finite(value: &Value, path: &mut Vec<String>) -> Result<(), CanonicalizationError> {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                path.push(key.clone());
                reject_non_finite(child, path)?;
                path.pop();
            }
            Ok(())
        }
        Value::Array(items) => {
            for (idx, item) in items.iter().enumerate() {
                path.push(format!("[{}]", idx));
                reject_non_finite(item, path)?;
                path.pop();
            }
            Ok(())
        }
        Value::Number(num) => match num.as_f64() {
            Some(f) if !f.is_finite() => {
                let at = if path.is_empty() {
                    "root".to_string()
                } else {
                    path.join(".")
                };
                Err(CanonicalizationError::NonFiniteNumber(at))
            }
            _ => Ok(()),
        },
        Value::String(_) | Value::Bool(_) | Value::Null => Ok(()),
    }
}
