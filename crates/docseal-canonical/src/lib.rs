//! Canonical primitives for docseal documents and signing records.
//!
//! Everything that is compared, hashed or persisted by the authorization
//! engine is expressed with the types in this crate: validated identifiers for
//! signers and document types, base64url digests, and RFC 8785 canonical
//! bytes for JSON content.
//!
#![deny(missing_docs)]

/// Canonical JSON bytes and document digests.
pub mod canonicalizer;
/// Digest primitives.
pub mod digest;
/// Identifier newtypes (signer URLs, document types, review and signature ids).
pub mod identifiers;
/// Validation errors raised by canonical types.
pub mod validation;

pub use canonicalizer::{canonical_bytes, document_digest, CanonicalizationError};
pub use digest::{Digest, DigestAlg};
pub use identifiers::{DocumentType, ReviewId, SignatureId, SignerUrl};
pub use validation::ValidationError;
