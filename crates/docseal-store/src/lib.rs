//! Filesystem adapters for the docseal authorization engine.
//!
//! This crate provides:
//! - `FsReviewStore`, a write-once store for documents held for manual review
//! - A filter API for selecting pending review records
//! - `LocalPdfSource` and `Sha256ContentHasher` for PDFs on local disk
//!
//! Review records live at `<root>/<document_type>/<id>.v<version>.json`.

#![deny(missing_docs)]

/// Error types for store operations.
pub mod error;
/// Review record filtering.
pub mod filter;
/// Persisted review record format.
pub mod record;
/// Filesystem review store.
pub mod review;
/// Local PDF retrieval and hashing.
pub mod workdir;

pub use error::StoreError;
pub use filter::{AndFilter, DocumentTypeFilter, ReviewFilter, SubmitterFilter};
pub use record::ReviewRecord;
pub use review::FsReviewStore;
pub use workdir::{LocalPdfSource, Sha256ContentHasher};
