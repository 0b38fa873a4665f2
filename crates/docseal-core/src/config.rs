//! JSON-file policy store.

use std::collections::BTreeMap;
use std::path::Path;

use docseal_canonical::{DocumentType, SignerUrl};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::policy::{DocumentTypePolicy, PolicyError, PolicyStore, SignerLists};

/// One document-type entry: either the structured record or the delimited
/// `"automatic,extractor_must_be_issuer,content_signable"` string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PolicyEntry {
    /// Structured form.
    Record(DocumentTypePolicy),
    /// Delimited form, e.g. `"true,true,false"`.
    Delimited(String),
}

/// Policy configuration loaded from a JSON file.
///
/// ```json
/// {
///   "documents": {
///     "national_id": { "automatic": true, "extractor_must_be_issuer": true, "content_signable": false },
///     "passport": "false,true,true"
///   },
///   "allow_list": ["https://validator.example/a"],
///   "deny_list": []
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Per-document-type entries.
    #[serde(default)]
    pub documents: BTreeMap<String, PolicyEntry>,
    /// Allow-listed signer URLs.
    #[serde(default)]
    pub allow_list: Vec<SignerUrl>,
    /// Deny-listed signer URLs.
    #[serde(default)]
    pub deny_list: Vec<SignerUrl>,
}

impl PolicyConfig {
    /// Reads and validates a configuration file.
    ///
    /// Every delimited entry is parsed eagerly so a malformed file fails here
    /// rather than during an authorization run.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PolicyError> {
        let bytes = std::fs::read(path.as_ref())?;
        let config = Self::from_slice(&bytes)?;
        debug!(
            path = %path.as_ref().display(),
            documents = config.documents.len(),
            allow = config.allow_list.len(),
            deny = config.deny_list.len(),
            "loaded policy configuration"
        );
        Ok(config)
    }

    /// Parses and validates configuration bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, PolicyError> {
        let config: Self = serde_json::from_slice(bytes)?;
        for (name, entry) in &config.documents {
            entry.resolve(name)?;
        }
        Ok(config)
    }
}

impl PolicyEntry {
    fn resolve(&self, document_type: &str) -> Result<DocumentTypePolicy, PolicyError> {
        match self {
            PolicyEntry::Record(policy) => Ok(*policy),
            PolicyEntry::Delimited(text) => {
                text.parse().map_err(|reason| PolicyError::Malformed {
                    document_type: document_type.to_string(),
                    reason,
                })
            }
        }
    }
}

impl PolicyStore for PolicyConfig {
    fn resolve_policy(
        &self,
        document_type: &DocumentType,
    ) -> Result<Option<DocumentTypePolicy>, PolicyError> {
        self.documents
            .get(document_type.as_str())
            .map(|entry| entry.resolve(document_type.as_str()))
            .transpose()
    }

    fn resolve_lists(&self) -> Result<SignerLists, PolicyError> {
        Ok(SignerLists::new(
            self.allow_list.iter().cloned(),
            self.deny_list.iter().cloned(),
        ))
    }
}
