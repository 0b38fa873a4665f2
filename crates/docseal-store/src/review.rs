//! Filesystem review store.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use docseal_canonical::{DocumentType, ReviewId};
use docseal_core::{GatewayError, ReviewItem, ReviewStore};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::StoreError;
use crate::filter::ReviewFilter;
use crate::record::ReviewRecord;

/// Write-once store for documents held for manual review.
///
/// Each item is one JSON file at `<root>/<document_type>/<id>.v<version>.json`.
/// Files are published by hard-linking a fully written temporary file into
/// place, so a reader never sees a partial record and an existing record is
/// never replaced.
///
/// # Example
///
/// ```rust,no_run
/// use docseal_store::{DocumentTypeFilter, FsReviewStore};
///
/// let store = FsReviewStore::open("reviews")?;
/// let filter = DocumentTypeFilter { document_type: "passport".to_string() };
/// for record in store.list_filtered(&filter)? {
///     println!("{} v{}", record.id, record.version);
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct FsReviewStore {
    root: PathBuf,
}

impl FsReviewStore {
    /// Opens a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Store root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persists `item` and returns the path of the new record.
    ///
    /// Fails with [`StoreError::AlreadyExists`] if the same id and version
    /// were stored before.
    pub fn write(&self, item: &ReviewItem) -> Result<PathBuf, StoreError> {
        // Document type and id become path components.
        let document_type = DocumentType::parse(item.document_type.as_str())?;
        ReviewId::parse(item.id.as_str())?;

        let record = ReviewRecord::from_item(item)?;
        let dir = self.root.join(document_type.as_str());
        fs::create_dir_all(&dir)?;

        let target = dir.join(record.file_name());
        if target.exists() {
            return Err(StoreError::AlreadyExists(record.id));
        }
        // Unique per attempt, so a staging file left by a crashed writer
        // never blocks a retry.
        let staging = dir.join(format!(".{}.{}.tmp", record.file_name(), Uuid::new_v4()));
        let bytes = serde_json::to_vec_pretty(&record)?;

        if let Err(e) = write_staging(&staging, &bytes) {
            let _ = fs::remove_file(&staging);
            return Err(e.into());
        }

        let published = fs::hard_link(&staging, &target);
        let cleanup = fs::remove_file(&staging);
        match published {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(StoreError::AlreadyExists(record.id));
            }
            Err(e) => return Err(e.into()),
        }
        cleanup?;

        info!(
            review_id = %record.id,
            document_type = %record.document_type,
            version = record.version,
            "stored review item"
        );
        Ok(target)
    }

    /// Lists every stored record, oldest first.
    pub fn list(&self) -> Result<Vec<ReviewRecord>, StoreError> {
        let mut records = Vec::new();
        for path in self.record_paths()? {
            match read_record(&path) {
                Ok(record) => records.push(record),
                Err(e) => warn!(path = %path.display(), error = %e, "skipping unreadable review record"),
            }
        }
        records.sort_by(|a, b| {
            a.stored_at
                .cmp(&b.stored_at)
                .then_with(|| a.id.cmp(&b.id))
                .then_with(|| a.version.cmp(&b.version))
        });
        Ok(records)
    }

    /// Lists the records matching `filter`, oldest first.
    pub fn list_filtered(&self, filter: &dyn ReviewFilter) -> Result<Vec<ReviewRecord>, StoreError> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|record| filter.matches(record))
            .collect())
    }

    /// Loads the latest version of the record with `id`.
    pub fn load(&self, id: &ReviewId) -> Result<ReviewRecord, StoreError> {
        let mut latest: Option<ReviewRecord> = None;
        for path in self.paths_for(id)? {
            let record = read_record(&path)?;
            if latest.as_ref().map_or(true, |l| record.version > l.version) {
                latest = Some(record);
            }
        }
        latest.ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    /// Removes every version of the record with `id`. Returns the number of
    /// files removed.
    pub fn remove(&self, id: &ReviewId) -> Result<usize, StoreError> {
        let paths = self.paths_for(id)?;
        if paths.is_empty() {
            return Err(StoreError::NotFound(id.clone()));
        }
        for path in &paths {
            fs::remove_file(path)?;
            debug!(path = %path.display(), "removed review record");
        }
        Ok(paths.len())
    }

    fn paths_for(&self, id: &ReviewId) -> Result<Vec<PathBuf>, StoreError> {
        let prefix = format!("{id}.v");
        Ok(self
            .record_paths()?
            .into_iter()
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(&prefix))
            })
            .collect())
    }

    fn record_paths(&self) -> Result<Vec<PathBuf>, StoreError> {
        let mut paths = Vec::new();
        for type_dir in fs::read_dir(&self.root)? {
            let type_dir = type_dir?;
            if !type_dir.file_type()?.is_dir() {
                continue;
            }
            for entry in fs::read_dir(type_dir.path())? {
                let path = entry?.path();
                let is_record = path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(is_record_name);
                if is_record {
                    paths.push(path);
                }
            }
        }
        Ok(paths)
    }
}

/// Matches `<uuid>.v<version>.json`.
fn is_record_name(name: &str) -> bool {
    let Some(stem) = name.strip_suffix(".json") else {
        return false;
    };
    match stem.rsplit_once(".v") {
        Some((id, version)) => ReviewId::parse(id).is_ok() && version.parse::<u32>().is_ok(),
        None => false,
    }
}

fn write_staging(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

fn read_record(path: &Path) -> Result<ReviewRecord, StoreError> {
    let bytes = fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}

impl ReviewStore for FsReviewStore {
    fn store_for_manual_review(&self, item: &ReviewItem) -> Result<(), GatewayError> {
        self.write(item)?;
        Ok(())
    }
}
