//! Authorization engine.
//!
//! One run moves a document through
//! `Start → PolicyResolved → (Deferred | ChainChecked) → SignerSetFiltered →
//! ExtractorVerified → ValidatorsVerified → ContentBound → PdfVerified → Signed`.
//! Every check either advances the run or ends it with a [`Rejection`]; no
//! collaborator is called after a failed check.

use std::path::{Path, PathBuf};

use docseal_canonical::{ReviewId, SignatureId};
use tracing::{debug, info, instrument, warn};

use crate::document::Document;
use crate::gate::{self, PolicyDecision};
use crate::gateway::{Provider, ReviewItem, INITIAL_REVIEW_VERSION};
use crate::outcome::{
    AuthorizationOutcome, DeferredReceipt, Rejection, RejectionKind, SignedArtifacts, Stage,
};
use crate::policy::DocumentTypePolicy;

/// Input for a document submitted for automatic processing.
#[derive(Debug, Clone)]
pub struct AutomaticRequest {
    /// Parsed document.
    pub document: Document,
    /// Raw JSON the document was parsed from.
    pub raw_json: String,
    /// Reference the PDF rendering is fetched from.
    pub pdf_source: String,
    /// Working directory for fetched and signed files.
    pub work_dir: PathBuf,
    /// Who submitted the document, recorded if it is deferred.
    pub submitter: Option<String>,
}

/// Input for a document released from manual review.
#[derive(Debug, Clone)]
pub struct ManualRequest {
    /// Parsed document.
    pub document: Document,
    /// Raw JSON the document was parsed from.
    pub raw_json: String,
    /// Reference the PDF rendering is fetched from.
    pub pdf_source: String,
    /// Working directory for fetched and signed files.
    pub work_dir: PathBuf,
}

struct SigningInputs<'a> {
    document: &'a Document,
    raw_json: &'a str,
    pdf_source: &'a str,
    work_dir: &'a Path,
}

/// Orchestrates policy, verification, content binding and signing.
///
/// The engine holds no mutable state; independent runs may share one engine
/// across threads when the provider allows it.
#[derive(Debug)]
pub struct AuthorizationEngine<P: Provider> {
    provider: P,
}

impl<P: Provider> AuthorizationEngine<P> {
    /// Creates an engine over the given collaborators.
    pub const fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Borrows the provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Authorizes a document submitted for automatic processing.
    ///
    /// Document types whose policy is not automatic are stored for manual
    /// review and returned as [`AuthorizationOutcome::Deferred`].
    #[instrument(level = "debug", skip_all, fields(document_type = %request.document.document_type()))]
    pub fn authorize_automatic(&self, request: &AutomaticRequest) -> AuthorizationOutcome {
        let outcome = self.run_automatic(request).unwrap_or_else(AuthorizationOutcome::Rejected);
        log_outcome(&outcome);
        outcome
    }

    /// Authorizes a document an operator released from manual review.
    ///
    /// The document-type policy still applies, except that it is never
    /// deferred again.
    #[instrument(level = "debug", skip_all, fields(document_type = %request.document.document_type()))]
    pub fn authorize_manual(&self, request: &ManualRequest) -> AuthorizationOutcome {
        let outcome = gate::resolve_policy(&self.provider, request.document.document_type())
            .and_then(|policy| {
                let inputs = SigningInputs {
                    document: &request.document,
                    raw_json: &request.raw_json,
                    pdf_source: &request.pdf_source,
                    work_dir: &request.work_dir,
                };
                self.certify(&inputs, &policy)
            })
            .map(AuthorizationOutcome::Signed)
            .unwrap_or_else(AuthorizationOutcome::Rejected);
        log_outcome(&outcome);
        outcome
    }

    /// Runs the policy gate only, without verification or signing.
    pub fn evaluate_policy(&self, document: &Document) -> Result<PolicyDecision, Rejection> {
        gate::evaluate(&self.provider, document)
    }

    fn run_automatic(&self, request: &AutomaticRequest) -> Result<AuthorizationOutcome, Rejection> {
        let policy = gate::resolve_policy(&self.provider, request.document.document_type())?;
        debug!(stage = %Stage::PolicyResolved, automatic = policy.automatic);

        if !policy.automatic {
            return self.defer(request).map(AuthorizationOutcome::Deferred);
        }

        let inputs = SigningInputs {
            document: &request.document,
            raw_json: &request.raw_json,
            pdf_source: &request.pdf_source,
            work_dir: &request.work_dir,
        };
        self.certify(&inputs, &policy).map(AuthorizationOutcome::Signed)
    }

    fn defer(&self, request: &AutomaticRequest) -> Result<DeferredReceipt, Rejection> {
        let item = ReviewItem {
            id: ReviewId::generate(),
            document_type: request.document.document_type().clone(),
            version: INITIAL_REVIEW_VERSION,
            submitter: request.submitter.clone(),
            pdf_source: request.pdf_source.clone(),
            payload: request.raw_json.as_bytes().to_vec(),
        };
        self.provider.store_for_manual_review(&item).map_err(|e| {
            Rejection::new(
                RejectionKind::StorageFailure,
                format!("document could not be stored for manual review: {}", e),
                Stage::PolicyResolved,
            )
        })?;
        Ok(DeferredReceipt {
            review_id: item.id,
            document_type: item.document_type,
            version: item.version,
        })
    }

    fn certify(
        &self,
        inputs: &SigningInputs<'_>,
        policy: &DocumentTypePolicy,
    ) -> Result<SignedArtifacts, Rejection> {
        gate::check_chain_of_custody(inputs.document, policy)?;
        debug!(stage = %Stage::ChainChecked);

        let lists = gate::resolve_lists(&self.provider)?;
        let decision = gate::filter_signers(inputs.document, policy, &lists)?;
        debug!(stage = %Stage::SignerSetFiltered);

        self.verify_attestations(inputs)?;

        let pdf_path = self.bind_content(inputs)?;
        debug!(stage = %Stage::ContentBound, pdf = %pdf_path.display());

        match self.certify_pdf(inputs, &decision, &pdf_path) {
            Ok(artifacts) => Ok(artifacts),
            Err(rejection) => {
                self.discard(&pdf_path);
                Err(rejection)
            }
        }
    }

    fn verify_attestations(&self, inputs: &SigningInputs<'_>) -> Result<(), Rejection> {
        let extractor_valid = self
            .provider
            .verify_extractor_signature(inputs.raw_json, inputs.work_dir)
            .map_err(|e| {
                Rejection::new(
                    RejectionKind::SigningFailure,
                    format!("extractor's signature could not be verified: {}", e),
                    Stage::SignerSetFiltered,
                )
            })?;
        if !extractor_valid {
            return Err(Rejection::new(
                RejectionKind::InvalidAttestation,
                "extractor's signature is not valid",
                Stage::SignerSetFiltered,
            ));
        }
        debug!(stage = %Stage::ExtractorVerified);

        let results = self
            .provider
            .verify_validator_signatures(inputs.raw_json, inputs.work_dir)
            .map_err(|e| {
                Rejection::new(
                    RejectionKind::SigningFailure,
                    format!("validator signatures could not be verified: {}", e),
                    Stage::ExtractorVerified,
                )
            })?;
        let expected = inputs.document.validators.len();
        if results.len() != expected || results.contains(&false) {
            if results.len() != expected {
                warn!(
                    expected,
                    received = results.len(),
                    "validator result count does not match document"
                );
            }
            return Err(Rejection::new(
                RejectionKind::InvalidAttestation,
                "one or more validator signatures are not valid",
                Stage::ExtractorVerified,
            ));
        }
        debug!(stage = %Stage::ValidatorsVerified, validators = expected);
        Ok(())
    }

    /// Fetches the PDF and checks its content hash against the JSON record.
    fn bind_content(&self, inputs: &SigningInputs<'_>) -> Result<PathBuf, Rejection> {
        let pdf_path = self
            .provider
            .fetch_pdf(inputs.pdf_source, inputs.work_dir)
            .map_err(|e| {
                Rejection::new(
                    RejectionKind::SigningFailure,
                    format!("pdf could not be fetched: {}", e),
                    Stage::ValidatorsVerified,
                )
            })?;

        let hash_in_pdf = match self.provider.hash_pdf_content(&pdf_path) {
            Ok(hash) => hash,
            Err(e) => {
                self.discard(&pdf_path);
                return Err(Rejection::new(
                    RejectionKind::SigningFailure,
                    format!("pdf content could not be hashed: {}", e),
                    Stage::ValidatorsVerified,
                ));
            }
        };

        if hash_in_pdf != inputs.document.meta_data.pdf_hash {
            self.discard(&pdf_path);
            return Err(Rejection::new(
                RejectionKind::ContentMismatch,
                "pdf and the machine readable file do not match",
                Stage::ValidatorsVerified,
            ));
        }
        Ok(pdf_path)
    }

    fn certify_pdf(
        &self,
        inputs: &SigningInputs<'_>,
        decision: &PolicyDecision,
        pdf_path: &Path,
    ) -> Result<SignedArtifacts, Rejection> {
        let pdf_valid = self.provider.verify_pdf_signatures(pdf_path).map_err(|e| {
            Rejection::new(
                RejectionKind::SigningFailure,
                format!("signatures in the pdf could not be verified: {}", e),
                Stage::ContentBound,
            )
        })?;
        if !pdf_valid {
            return Err(Rejection::new(
                RejectionKind::InvalidExistingPdfSignature,
                "one or more signatures in the pdf are invalid",
                Stage::ContentBound,
            ));
        }
        debug!(stage = %Stage::PdfVerified);

        let signature_id = SignatureId::generate();
        self.provider
            .sign_pdf(pdf_path, &signature_id)
            .map_err(|e| {
                Rejection::new(
                    RejectionKind::SigningFailure,
                    format!("pdf could not be signed: {}", e),
                    Stage::PdfVerified,
                )
            })?;

        let signed_json = self
            .provider
            .sign_json(
                inputs.raw_json,
                decision.policy.content_signable,
                &decision.admissible_signers,
            )
            .map_err(|e| {
                Rejection::new(
                    RejectionKind::SigningFailure,
                    format!("json could not be signed: {}", e),
                    Stage::PdfVerified,
                )
            })?;

        Ok(SignedArtifacts {
            signed_json,
            signed_pdf_path: pdf_path.to_path_buf(),
            signature_id,
            admissible_signers: decision.admissible_signers.clone(),
        })
    }

    fn discard(&self, pdf_path: &Path) {
        if let Err(e) = self.provider.discard(pdf_path) {
            warn!(pdf = %pdf_path.display(), error = %e, "failed to discard working copy");
        }
    }
}

fn log_outcome(outcome: &AuthorizationOutcome) {
    match outcome {
        AuthorizationOutcome::Deferred(receipt) => {
            info!(review_id = %receipt.review_id, "document held for manual review")
        }
        AuthorizationOutcome::Rejected(rejection) => warn!(
            kind = %rejection.kind,
            stage = %rejection.stage,
            reason = %rejection.reason,
            "document rejected"
        ),
        AuthorizationOutcome::Signed(artifacts) => info!(
            signature_id = %artifacts.signature_id,
            propagated = artifacts.admissible_signers.len(),
            "document signed"
        ),
    }
}
