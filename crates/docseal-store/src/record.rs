use base64::Engine;
use chrono::{DateTime, Utc};
use docseal_canonical::{document_digest, Digest, DocumentType, ReviewId};
use docseal_core::ReviewItem;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// A review item as persisted on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRecord {
    /// Item identifier.
    pub id: ReviewId,
    /// Document type the item was deferred under.
    pub document_type: DocumentType,
    /// Item version.
    pub version: u32,
    /// Submitter, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitter: Option<String>,
    /// Reference the PDF rendering is fetched from.
    pub pdf_source: String,
    /// When the item was stored.
    pub stored_at: DateTime<Utc>,
    /// Canonical digest of the JSON payload.
    pub content_digest: Digest,
    /// Payload bytes, base64url without padding.
    pub payload_b64: String,
}

impl ReviewRecord {
    /// Builds a record for `item`, stamped with the current time.
    pub fn from_item(item: &ReviewItem) -> Result<Self, StoreError> {
        Ok(Self {
            id: item.id.clone(),
            document_type: item.document_type.clone(),
            version: item.version,
            submitter: item.submitter.clone(),
            pdf_source: item.pdf_source.clone(),
            stored_at: Utc::now(),
            content_digest: document_digest(&item.payload)?,
            payload_b64: base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(&item.payload),
        })
    }

    /// Decodes the stored payload.
    pub fn payload(&self) -> Result<Vec<u8>, StoreError> {
        Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.decode(&self.payload_b64)?)
    }

    /// Converts back into the engine's review item.
    pub fn into_item(self) -> Result<ReviewItem, StoreError> {
        let payload = self.payload()?;
        Ok(ReviewItem {
            id: self.id,
            document_type: self.document_type,
            version: self.version,
            submitter: self.submitter,
            pdf_source: self.pdf_source,
            payload,
        })
    }

    /// File name of this record inside its document-type directory.
    pub fn file_name(&self) -> String {
        format!("{}.v{}.json", self.id, self.version)
    }
}
