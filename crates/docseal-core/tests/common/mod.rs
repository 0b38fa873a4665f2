//! Recording test double for every engine collaborator.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use docseal_canonical::{DocumentType, SignatureId, SignerUrl};
use docseal_core::{
    AttestationVerifier, ContentHasher, Document, DocumentTypePolicy, GatewayError, JsonSigner,
    PdfCertifier, PdfSource, PolicyError, PolicyStore, ReviewItem, ReviewStore, SignerLists,
};
use serde_json::json;

pub const ISSUER: &str = "https://registry.example/issuer";
pub const EXTRACTOR_OTHER: &str = "https://scanner.example/extractor";
pub const V1: &str = "https://bank.example/validator";
pub const V2: &str = "https://telco.example/validator";
pub const V3: &str = "https://utility.example/validator";
pub const PDF_HASH: &str = "abc123";
pub const PDF_SOURCE: &str = "file:///incoming/national_id.pdf";

/// Collaborator call, recorded in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ResolvePolicy(String),
    ResolveLists,
    Store(ReviewItem),
    VerifyExtractor,
    VerifyValidators,
    FetchPdf(String),
    Discard(PathBuf),
    HashPdf(PathBuf),
    VerifyPdf(PathBuf),
    SignPdf(PathBuf, SignatureId),
    SignJson {
        content_signable: bool,
        admissible: Vec<SignerUrl>,
    },
}

pub struct MockProvider {
    pub policies: HashMap<String, DocumentTypePolicy>,
    pub lists: SignerLists,
    pub policy_store_down: bool,
    pub extractor_valid: bool,
    pub extractor_check_fails: bool,
    pub validator_check_fails: bool,
    pub hash_fails: bool,
    pub pdf_check_fails: bool,
    pub validator_results: Vec<bool>,
    pub pdf_hash: String,
    pub fetch_fails: bool,
    pub pdf_signatures_valid: bool,
    pub sign_pdf_fails: bool,
    pub sign_json_fails: bool,
    pub store_fails: bool,
    calls: Mutex<Vec<Call>>,
}

pub fn national_id_policy() -> DocumentTypePolicy {
    DocumentTypePolicy {
        automatic: true,
        extractor_must_be_issuer: true,
        content_signable: false,
    }
}

impl MockProvider {
    /// A provider under which a national_id document by `ISSUER` with
    /// validators `V1` and `V2` signs successfully.
    pub fn new() -> Self {
        let mut policies = HashMap::new();
        policies.insert("national_id".to_string(), national_id_policy());
        Self {
            policies,
            lists: SignerLists::new([SignerUrl::new(V1)], Vec::<SignerUrl>::new()),
            policy_store_down: false,
            extractor_valid: true,
            extractor_check_fails: false,
            validator_check_fails: false,
            hash_fails: false,
            pdf_check_fails: false,
            validator_results: vec![true, true],
            pdf_hash: PDF_HASH.to_string(),
            fetch_fails: false,
            pdf_signatures_valid: true,
            sign_pdf_fails: false,
            sign_json_fails: false,
            store_fails: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_policy(mut self, document_type: &str, policy: DocumentTypePolicy) -> Self {
        self.policies.insert(document_type.to_string(), policy);
        self
    }

    pub fn with_lists(mut self, allow: &[&str], deny: &[&str]) -> Self {
        self.lists = SignerLists::new(
            allow.iter().map(|u| SignerUrl::new(*u)),
            deny.iter().map(|u| SignerUrl::new(*u)),
        );
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn called(&self, pred: impl Fn(&Call) -> bool) -> bool {
        self.calls().iter().any(pred)
    }

    pub fn stored_items(&self) -> Vec<ReviewItem> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Store(item) => Some(item),
                _ => None,
            })
            .collect()
    }

    pub fn touched_verification_or_signing(&self) -> bool {
        self.called(|c| {
            matches!(
                c,
                Call::VerifyExtractor
                    | Call::VerifyValidators
                    | Call::FetchPdf(_)
                    | Call::HashPdf(_)
                    | Call::VerifyPdf(_)
                    | Call::SignPdf(..)
                    | Call::SignJson { .. }
            )
        })
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl PolicyStore for MockProvider {
    fn resolve_policy(
        &self,
        document_type: &DocumentType,
    ) -> Result<Option<DocumentTypePolicy>, PolicyError> {
        self.record(Call::ResolvePolicy(document_type.to_string()));
        if self.policy_store_down {
            return Err(PolicyError::Unavailable("config volume not mounted".into()));
        }
        Ok(self.policies.get(document_type.as_str()).copied())
    }

    fn resolve_lists(&self) -> Result<SignerLists, PolicyError> {
        self.record(Call::ResolveLists);
        Ok(self.lists.clone())
    }
}

impl ReviewStore for MockProvider {
    fn store_for_manual_review(&self, item: &ReviewItem) -> Result<(), GatewayError> {
        self.record(Call::Store(item.clone()));
        if self.store_fails {
            return Err(GatewayError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only store",
            )));
        }
        Ok(())
    }
}

impl AttestationVerifier for MockProvider {
    fn verify_extractor_signature(
        &self,
        _raw_json: &str,
        _work_dir: &Path,
    ) -> Result<bool, GatewayError> {
        self.record(Call::VerifyExtractor);
        if self.extractor_check_fails {
            return Err(GatewayError::Unavailable("certificate endpoint timed out".into()));
        }
        Ok(self.extractor_valid)
    }

    fn verify_validator_signatures(
        &self,
        _raw_json: &str,
        _work_dir: &Path,
    ) -> Result<Vec<bool>, GatewayError> {
        self.record(Call::VerifyValidators);
        if self.validator_check_fails {
            return Err(GatewayError::Certificate("trust store unreadable".into()));
        }
        Ok(self.validator_results.clone())
    }
}

impl PdfSource for MockProvider {
    fn fetch_pdf(&self, source_ref: &str, work_dir: &Path) -> Result<PathBuf, GatewayError> {
        self.record(Call::FetchPdf(source_ref.to_string()));
        if self.fetch_fails {
            return Err(GatewayError::Unavailable("connection reset".into()));
        }
        Ok(work_dir.join("fetched.pdf"))
    }

    fn discard(&self, local_path: &Path) -> Result<(), GatewayError> {
        self.record(Call::Discard(local_path.to_path_buf()));
        Ok(())
    }
}

impl ContentHasher for MockProvider {
    fn hash_pdf_content(&self, local_path: &Path) -> Result<String, GatewayError> {
        self.record(Call::HashPdf(local_path.to_path_buf()));
        if self.hash_fails {
            return Err(GatewayError::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "truncated pdf",
            )));
        }
        Ok(self.pdf_hash.clone())
    }
}

impl PdfCertifier for MockProvider {
    fn verify_pdf_signatures(&self, local_path: &Path) -> Result<bool, GatewayError> {
        self.record(Call::VerifyPdf(local_path.to_path_buf()));
        if self.pdf_check_fails {
            return Err(GatewayError::Unavailable("revocation list unreachable".into()));
        }
        Ok(self.pdf_signatures_valid)
    }

    fn sign_pdf(&self, local_path: &Path, signature_id: &SignatureId) -> Result<(), GatewayError> {
        self.record(Call::SignPdf(local_path.to_path_buf(), signature_id.clone()));
        if self.sign_pdf_fails {
            return Err(GatewayError::Certificate("keystore password rejected".into()));
        }
        Ok(())
    }
}

impl JsonSigner for MockProvider {
    fn sign_json(
        &self,
        raw_json: &str,
        content_signable: bool,
        admissible_signers: &[SignerUrl],
    ) -> Result<String, GatewayError> {
        self.record(Call::SignJson {
            content_signable,
            admissible: admissible_signers.to_vec(),
        });
        if self.sign_json_fails {
            return Err(GatewayError::Encoding("unexpected end of input".into()));
        }
        let mut value: serde_json::Value = serde_json::from_str(raw_json)
            .map_err(|e| GatewayError::Encoding(e.to_string()))?;
        value["certification"] = json!({ "signers": admissible_signers, "contentSigned": content_signable });
        Ok(value.to_string())
    }
}

/// Builds a document of `document_type` issued by `ISSUER`.
pub fn document(
    document_type: &str,
    extractor: &str,
    validators: &[&str],
    pdf_hash: &str,
) -> (Document, String) {
    let validators: Vec<_> = validators
        .iter()
        .enumerate()
        .map(|(i, url)| json!({ "signature": { "url": url, "signedHash": format!("v{}", i) } }))
        .collect();
    let raw = json!({
        "metaData": {
            "documentType": document_type,
            "issuer": { "name": "National Registry", "url": ISSUER },
            "pdfHash": pdf_hash
        },
        "extractor": { "signature": { "url": extractor, "signedHash": "e0" } },
        "validators": validators,
        "content": { "name": "A. Person", "number": "901234567V" }
    })
    .to_string();
    let document = Document::parse(&raw).unwrap();
    (document, raw)
}
