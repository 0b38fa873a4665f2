//! Signing authorization for machine-readable identity documents.
//!
//! A document arrives as a JSON record (with a PDF rendering held elsewhere)
//! that has already been attested by an extractor and zero or more
//! validators. This crate decides whether a new certification signature may be
//! applied and sequences the collaborators that apply it.
//!
//! This crate provides:
//! - The document model consumed by the engine
//! - Per-document-type policy and global allow/deny lists
//! - Signer-set resolution and allow-list filtering
//! - Collaborator traits for verification, PDF handling, signing and storage
//! - The [`AuthorizationEngine`] and its closed [`AuthorizationOutcome`]
//!
//! Core invariants:
//! - No signing side effect happens unless every upstream check passed
//! - The deny-list is an absolute veto, even for allow-listed signers
//! - Allow-list filtering keeps signer order and duplicates
//! - Every failure is terminal; nothing is retried inside the engine
//!
#![deny(missing_docs)]

/// Policy file loading.
pub mod config;
/// Parsed document model.
pub mod document;
/// The authorization engine.
pub mod engine;
/// Error types for library operations.
pub mod errors;
/// Collaborator traits consumed by the engine.
pub mod gateway;
/// Chain-of-custody and signer policy checks.
pub mod gate;
/// Terminal outcomes, rejection kinds and run stages.
pub mod outcome;
/// Document-type policy, signer lists and the policy store trait.
pub mod policy;
/// Signer-set resolution.
pub mod signers;

pub use config::{PolicyConfig, PolicyEntry};
pub use document::{Document, Extractor, Issuer, MetaData, Signature, Validator};
pub use engine::{AuthorizationEngine, AutomaticRequest, ManualRequest};
pub use errors::CoreError;
pub use gate::PolicyDecision;
pub use gateway::{
    AttestationVerifier, ContentHasher, GatewayError, JsonSigner, PdfCertifier, PdfSource,
    Provider, ReviewItem, ReviewStore, INITIAL_REVIEW_VERSION,
};
pub use outcome::{
    AuthorizationOutcome, DeferredReceipt, Rejection, RejectionKind, SignedArtifacts, Stage,
};
pub use policy::{DocumentTypePolicy, PolicyError, PolicyStore, SignerLists};
pub use signers::SignerSet;
