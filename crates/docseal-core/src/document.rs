use docseal_canonical::{DocumentType, SignerUrl};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::CoreError;

/// Signature attached by a prior signer.
///
/// Only `url` takes part in policy decisions; the remaining members are the
/// opaque payload checked by the verification collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signature {
    /// Identity URL of the signer.
    pub url: SignerUrl,
    /// Opaque signature payload.
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

/// Authoritative source of the document recorded in its metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issuer {
    /// Identity URL of the issuer.
    pub url: SignerUrl,
    /// Remaining issuer members (name, address, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Document metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaData {
    /// Document type key used for policy lookup.
    pub document_type: DocumentType,
    /// Recorded issuer.
    pub issuer: Issuer,
    /// Content hash of the PDF rendering declared by the JSON record.
    pub pdf_hash: String,
    /// Remaining metadata members.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Attestation by the party that digitized the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extractor {
    /// Extractor signature.
    pub signature: Signature,
    /// Remaining extractor members.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Attestation by a party that confirmed facts after extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Validator {
    /// Validator signature.
    pub signature: Signature,
    /// Remaining validator members.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Parsed machine-readable document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Document metadata.
    pub meta_data: MetaData,
    /// Extractor attestation.
    pub extractor: Extractor,
    /// Validator attestations in document order.
    #[serde(default)]
    pub validators: Vec<Validator>,
    /// Document content, opaque to the engine.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub content: Value,
}

impl Document {
    /// Parses a raw JSON record.
    pub fn parse(raw_json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(raw_json)?)
    }

    /// Document type declared in the metadata.
    pub fn document_type(&self) -> &DocumentType {
        &self.meta_data.document_type
    }
}
