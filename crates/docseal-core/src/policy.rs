use std::collections::BTreeSet;
use std::str::FromStr;

use docseal_canonical::{DocumentType, SignerUrl};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while resolving policy.
#[derive(Error, Debug)]
pub enum PolicyError {
    /// A policy entry could not be interpreted.
    #[error("malformed policy for '{document_type}': {reason}")]
    Malformed {
        /// Document type whose entry is malformed.
        document_type: String,
        /// What is wrong with it.
        reason: String,
    },
    /// I/O error while reading configuration.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Configuration is not valid JSON for the expected shape.
    #[error("configuration parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// The backing store could not be reached.
    #[error("policy store unavailable: {0}")]
    Unavailable(String),
}

/// Processing policy for one document type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DocumentTypePolicy {
    /// Documents of this type are signed without manual review.
    pub automatic: bool,
    /// The extractor must be the issuer recorded in the metadata.
    pub extractor_must_be_issuer: bool,
    /// The JSON body may carry its own content signature.
    pub content_signable: bool,
}

impl FromStr for DocumentTypePolicy {
    type Err = String;

    /// Parses the delimited form `automatic,extractor_must_be_issuer,content_signable`,
    /// e.g. `"true,false,true"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split(',').map(str::trim).collect();
        if fields.len() != 3 {
            return Err(format!("expected 3 comma-separated flags, found {}", fields.len()));
        }
        let flag = |idx: usize, name: &str| -> Result<bool, String> {
            match fields[idx].to_ascii_lowercase().as_str() {
                "true" => Ok(true),
                "false" => Ok(false),
                other => Err(format!("{} must be true or false, found '{}'", name, other)),
            }
        };
        Ok(Self {
            automatic: flag(0, "automatic")?,
            extractor_must_be_issuer: flag(1, "extractor_must_be_issuer")?,
            content_signable: flag(2, "content_signable")?,
        })
    }
}

/// Global allow and deny lists of signer URLs.
///
/// A URL present in both lists is treated as denied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerLists {
    /// Signers whose attestations may be propagated.
    pub allow: BTreeSet<SignerUrl>,
    /// Signers whose presence vetoes signing.
    pub deny: BTreeSet<SignerUrl>,
}

impl SignerLists {
    /// Builds lists from any URL iterators.
    pub fn new(
        allow: impl IntoIterator<Item = SignerUrl>,
        deny: impl IntoIterator<Item = SignerUrl>,
    ) -> Self {
        Self {
            allow: allow.into_iter().collect(),
            deny: deny.into_iter().collect(),
        }
    }

    /// Returns true if the signer is deny-listed.
    pub fn is_denied(&self, url: &SignerUrl) -> bool {
        self.deny.contains(url)
    }

    /// Returns true if the signer is allow-listed and not deny-listed.
    pub fn is_allowed(&self, url: &SignerUrl) -> bool {
        self.allow.contains(url) && !self.is_denied(url)
    }
}

/// Source of resolved policy values.
pub trait PolicyStore: Send + Sync {
    /// Resolves the policy for a document type; `None` if the type is unknown.
    fn resolve_policy(
        &self,
        document_type: &DocumentType,
    ) -> Result<Option<DocumentTypePolicy>, PolicyError>;

    /// Resolves the global allow and deny lists.
    fn resolve_lists(&self) -> Result<SignerLists, PolicyError>;
}
