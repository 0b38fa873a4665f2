use std::fmt;
use std::path::PathBuf;

use docseal_canonical::{DocumentType, ReviewId, SignatureId, SignerUrl};
use serde::Serialize;
use thiserror::Error;

/// States of one authorization run.
///
/// `Deferred`, `Signed` and a rejection are terminal. A rejection records
/// the last state the run reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Nothing resolved yet.
    Start,
    /// Document-type policy resolved.
    PolicyResolved,
    /// Held for manual review.
    Deferred,
    /// Extractor/issuer requirement satisfied.
    ChainChecked,
    /// Deny/allow lists applied and admissible signers computed.
    SignerSetFiltered,
    /// Extractor signature verified.
    ExtractorVerified,
    /// Every validator signature verified.
    ValidatorsVerified,
    /// PDF content hash matches the JSON record.
    ContentBound,
    /// Existing PDF signatures verified.
    PdfVerified,
    /// Both artifacts signed.
    Signed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Start => "start",
            Stage::PolicyResolved => "policy_resolved",
            Stage::Deferred => "deferred",
            Stage::ChainChecked => "chain_checked",
            Stage::SignerSetFiltered => "signer_set_filtered",
            Stage::ExtractorVerified => "extractor_verified",
            Stage::ValidatorsVerified => "validators_verified",
            Stage::ContentBound => "content_bound",
            Stage::PdfVerified => "pdf_verified",
            Stage::Signed => "signed",
        };
        f.write_str(name)
    }
}

/// Why a run was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectionKind {
    /// Document type unknown or configuration missing.
    PolicyUnresolved,
    /// The extractor is not the issuer although policy requires it.
    ChainOfCustodyViolation,
    /// A prior signer is deny-listed.
    SignerDenied,
    /// No signable content and no allow-listed signer.
    NothingToSign,
    /// An extractor or validator signature failed verification.
    InvalidAttestation,
    /// The PDF content hash disagrees with the JSON record.
    ContentMismatch,
    /// A signature already in the PDF failed verification.
    InvalidExistingPdfSignature,
    /// A collaborator faulted while verifying, fetching, hashing or signing.
    SigningFailure,
    /// The manual-review store could not persist the document.
    StorageFailure,
}

impl RejectionKind {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            RejectionKind::PolicyUnresolved => "POLICY_UNRESOLVED",
            RejectionKind::ChainOfCustodyViolation => "CHAIN_OF_CUSTODY_VIOLATION",
            RejectionKind::SignerDenied => "SIGNER_DENIED",
            RejectionKind::NothingToSign => "NOTHING_TO_SIGN",
            RejectionKind::InvalidAttestation => "INVALID_ATTESTATION",
            RejectionKind::ContentMismatch => "CONTENT_MISMATCH",
            RejectionKind::InvalidExistingPdfSignature => "INVALID_EXISTING_PDF_SIGNATURE",
            RejectionKind::SigningFailure => "SIGNING_FAILURE",
            RejectionKind::StorageFailure => "STORAGE_FAILURE",
        }
    }
}

impl fmt::Display for RejectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Terminal failure of a run: a kind to branch on plus a human-readable reason.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{reason} ({kind})")]
pub struct Rejection {
    /// Error kind.
    pub kind: RejectionKind,
    /// Human-readable reason.
    pub reason: String,
    /// Last stage reached before the rejection.
    pub stage: Stage,
}

impl Rejection {
    /// Creates a rejection.
    pub fn new(kind: RejectionKind, reason: impl Into<String>, stage: Stage) -> Self {
        Self {
            kind,
            reason: reason.into(),
            stage,
        }
    }
}

/// Receipt for a document held for manual review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeferredReceipt {
    /// Identifier of the stored item.
    pub review_id: ReviewId,
    /// Document type it was stored under.
    pub document_type: DocumentType,
    /// Stored version.
    pub version: u32,
}

/// Artifacts produced by a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignedArtifacts {
    /// JSON record with the new signature embedded.
    pub signed_json: String,
    /// Local path of the certified PDF.
    pub signed_pdf_path: PathBuf,
    /// Identifier attached to the new PDF signature.
    pub signature_id: SignatureId,
    /// Prior signers propagated into the new signature.
    pub admissible_signers: Vec<SignerUrl>,
}

/// Result of one authorization run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AuthorizationOutcome {
    /// Stored for manual handling; nothing was verified or signed.
    Deferred(DeferredReceipt),
    /// Rejected; no artifact was mutated or returned.
    Rejected(Rejection),
    /// Both artifacts signed.
    Signed(SignedArtifacts),
}

impl AuthorizationOutcome {
    /// Returns the rejection, if any.
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            AuthorizationOutcome::Rejected(rejection) => Some(rejection),
            _ => None,
        }
    }

    /// Returns the rejection kind, if any.
    pub fn rejection_kind(&self) -> Option<RejectionKind> {
        self.rejection().map(|r| r.kind)
    }

    /// Returns the signed artifacts, if any.
    pub fn signed(&self) -> Option<&SignedArtifacts> {
        match self {
            AuthorizationOutcome::Signed(artifacts) => Some(artifacts),
            _ => None,
        }
    }

    /// Returns true for [`AuthorizationOutcome::Deferred`].
    pub fn is_deferred(&self) -> bool {
        matches!(self, AuthorizationOutcome::Deferred(_))
    }

    /// Terminal stage of the run.
    pub fn stage(&self) -> Stage {
        match self {
            AuthorizationOutcome::Deferred(_) => Stage::Deferred,
            AuthorizationOutcome::Rejected(rejection) => rejection.stage,
            AuthorizationOutcome::Signed(_) => Stage::Signed,
        }
    }
}

impl From<Rejection> for AuthorizationOutcome {
    fn from(rejection: Rejection) -> Self {
        AuthorizationOutcome::Rejected(rejection)
    }
}
