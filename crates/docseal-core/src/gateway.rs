//! Collaborators consumed by the engine.
//!
//! The engine owns no cryptography, storage or transport. Everything it
//! needs from the outside world is expressed here as a trait, and an
//! implementer supplies a single [`Provider`] covering all of them.

use std::path::{Path, PathBuf};

use docseal_canonical::{DocumentType, ReviewId, SignatureId, SignerUrl};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::policy::PolicyStore;

/// Version assigned to a document when it is first held for manual review.
pub const INITIAL_REVIEW_VERSION: u32 = 1;

/// Fault reported by a collaborator.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Certificate or key material could not be used.
    #[error("certificate error: {0}")]
    Certificate(String),
    /// Data could not be encoded or decoded.
    #[error("encoding error: {0}")]
    Encoding(String),
    /// A referenced item does not exist.
    #[error("not found: {0}")]
    NotFound(String),
    /// The collaborator is unreachable or timed out.
    #[error("unavailable: {0}")]
    Unavailable(String),
}

/// Document held for manual review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewItem {
    /// Unique identifier, one per stored item.
    pub id: ReviewId,
    /// Document type the item was deferred under.
    pub document_type: DocumentType,
    /// Item version; starts at [`INITIAL_REVIEW_VERSION`].
    pub version: u32,
    /// Who submitted the document, when known.
    pub submitter: Option<String>,
    /// Where the PDF rendering can be fetched from once reviewed.
    pub pdf_source: String,
    /// Raw document bytes as submitted.
    pub payload: Vec<u8>,
}

/// Persists documents awaiting manual review.
pub trait ReviewStore: Send + Sync {
    /// Stores an item. Implementations must not overwrite an existing id.
    fn store_for_manual_review(&self, item: &ReviewItem) -> Result<(), GatewayError>;
}

/// Verifies the attestations embedded in the JSON record.
pub trait AttestationVerifier: Send + Sync {
    /// Verifies the extractor's signature over the raw JSON.
    fn verify_extractor_signature(&self, raw_json: &str, work_dir: &Path)
        -> Result<bool, GatewayError>;

    /// Verifies every validator signature over the raw JSON.
    ///
    /// Returns one entry per validator, in document order.
    fn verify_validator_signatures(
        &self,
        raw_json: &str,
        work_dir: &Path,
    ) -> Result<Vec<bool>, GatewayError>;
}

/// Retrieves the PDF rendering into a working directory.
pub trait PdfSource: Send + Sync {
    /// Fetches the PDF named by `source_ref` and returns its local path.
    fn fetch_pdf(&self, source_ref: &str, work_dir: &Path) -> Result<PathBuf, GatewayError>;

    /// Releases a fetched copy that will not be returned to the caller.
    fn discard(&self, _local_path: &Path) -> Result<(), GatewayError> {
        Ok(())
    }
}

/// Recomputes the content hash of a PDF rendering.
pub trait ContentHasher: Send + Sync {
    /// Hash of the original (pre-certification) content of the PDF.
    fn hash_pdf_content(&self, local_path: &Path) -> Result<String, GatewayError>;
}

/// Certificate operations on the PDF rendering.
pub trait PdfCertifier: Send + Sync {
    /// Verifies signatures already embedded in the PDF.
    fn verify_pdf_signatures(&self, local_path: &Path) -> Result<bool, GatewayError>;

    /// Applies a new certificate signature to the PDF in place.
    fn sign_pdf(&self, local_path: &Path, signature_id: &SignatureId) -> Result<(), GatewayError>;
}

/// Embeds the new signature into the JSON record.
pub trait JsonSigner: Send + Sync {
    /// Returns the signed JSON. `admissible_signers` are the prior signatures
    /// to propagate; `content_signable` adds a signature over the body.
    fn sign_json(
        &self,
        raw_json: &str,
        content_signable: bool,
        admissible_signers: &[SignerUrl],
    ) -> Result<String, GatewayError>;
}

/// Everything the engine consumes.
pub trait Provider:
    PolicyStore + ReviewStore + AttestationVerifier + PdfSource + ContentHasher + PdfCertifier + JsonSigner
{
}

impl<T> Provider for T where
    T: PolicyStore
        + ReviewStore
        + AttestationVerifier
        + PdfSource
        + ContentHasher
        + PdfCertifier
        + JsonSigner
{
}
