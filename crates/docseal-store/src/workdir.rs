//! Local PDF retrieval and hashing.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use docseal_canonical::Digest;
use docseal_core::{ContentHasher, GatewayError, PdfSource};
use tracing::debug;
use uuid::Uuid;

const FILE_SCHEME: &str = "file://";

/// Fetches PDFs from the local filesystem.
///
/// Accepts a plain path or a `file://` reference. Each fetch copies the
/// source into the working directory under a fresh name, so concurrent runs
/// sharing a working directory never touch each other's copies.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalPdfSource;

impl LocalPdfSource {
    fn resolve(source_ref: &str) -> Result<PathBuf, GatewayError> {
        if let Some(path) = source_ref.strip_prefix(FILE_SCHEME) {
            return Ok(PathBuf::from(path));
        }
        if source_ref.contains("://") {
            return Err(GatewayError::Unavailable(format!(
                "unsupported pdf source: {source_ref}"
            )));
        }
        Ok(PathBuf::from(source_ref))
    }
}

impl PdfSource for LocalPdfSource {
    fn fetch_pdf(&self, source_ref: &str, work_dir: &Path) -> Result<PathBuf, GatewayError> {
        let source = Self::resolve(source_ref)?;
        if !source.is_file() {
            return Err(GatewayError::NotFound(source.display().to_string()));
        }
        fs::create_dir_all(work_dir)?;
        let local = work_dir.join(format!("{}.pdf", Uuid::new_v4()));
        fs::copy(&source, &local)?;
        debug!(source = %source.display(), local = %local.display(), "fetched pdf");
        Ok(local)
    }

    fn discard(&self, local_path: &Path) -> Result<(), GatewayError> {
        match fs::remove_file(local_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Hashes the whole PDF file with SHA-256, base64url without padding.
///
/// Suitable for renderings that are hashed before any certificate is
/// embedded. Renderings that carry incremental signature updates need a
/// hasher that strips those first.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256ContentHasher;

impl ContentHasher for Sha256ContentHasher {
    fn hash_pdf_content(&self, local_path: &Path) -> Result<String, GatewayError> {
        let bytes = fs::read(local_path)?;
        Ok(Digest::sha256(b"", &bytes).b64)
    }
}
