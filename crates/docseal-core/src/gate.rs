//! Policy checks that run before any cryptographic verification.

use docseal_canonical::{DocumentType, SignerUrl};
use serde::Serialize;
use tracing::debug;

use crate::document::Document;
use crate::outcome::{Rejection, RejectionKind, Stage};
use crate::policy::{DocumentTypePolicy, PolicyStore, SignerLists};
use crate::signers::SignerSet;

/// Result of the policy gate for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyDecision {
    /// Policy that was applied.
    pub policy: DocumentTypePolicy,
    /// Every prior signer, in document order.
    pub signer_set: SignerSet,
    /// Allow-listed subset propagated into the new signature.
    pub admissible_signers: Vec<SignerUrl>,
}

/// Resolves the document-type policy.
pub fn resolve_policy<S: PolicyStore + ?Sized>(
    store: &S,
    document_type: &DocumentType,
) -> Result<DocumentTypePolicy, Rejection> {
    match store.resolve_policy(document_type) {
        Ok(Some(policy)) => Ok(policy),
        Ok(None) => Err(Rejection::new(
            RejectionKind::PolicyUnresolved,
            format!("unsupported document type: {}", document_type),
            Stage::Start,
        )),
        Err(e) => Err(Rejection::new(
            RejectionKind::PolicyUnresolved,
            format!("policy for {} could not be resolved: {}", document_type, e),
            Stage::Start,
        )),
    }
}

/// Enforces the extractor-is-issuer requirement.
pub fn check_chain_of_custody(
    document: &Document,
    policy: &DocumentTypePolicy,
) -> Result<(), Rejection> {
    if policy.extractor_must_be_issuer
        && document.extractor.signature.url != document.meta_data.issuer.url
    {
        return Err(Rejection::new(
            RejectionKind::ChainOfCustodyViolation,
            "extractor should be the issuer",
            Stage::PolicyResolved,
        ));
    }
    Ok(())
}

/// Resolves the global signer lists.
pub fn resolve_lists<S: PolicyStore + ?Sized>(store: &S) -> Result<SignerLists, Rejection> {
    store.resolve_lists().map_err(|e| {
        Rejection::new(
            RejectionKind::PolicyUnresolved,
            format!("signer lists could not be resolved: {}", e),
            Stage::ChainChecked,
        )
    })
}

/// Applies the deny and allow lists to the document's signer set.
pub fn filter_signers(
    document: &Document,
    policy: &DocumentTypePolicy,
    lists: &SignerLists,
) -> Result<PolicyDecision, Rejection> {
    let signer_set = SignerSet::from_document(document);

    if signer_set.is_denied(lists) {
        return Err(Rejection::new(
            RejectionKind::SignerDenied,
            "one or more signatures are denied",
            Stage::ChainChecked,
        ));
    }

    if !policy.content_signable && !signer_set.is_allowed(lists) {
        return Err(Rejection::new(
            RejectionKind::NothingToSign,
            "nothing to be signed",
            Stage::ChainChecked,
        ));
    }

    let admissible_signers = signer_set.admissible(lists);
    debug!(
        signers = signer_set.len(),
        admissible = admissible_signers.len(),
        "signer set filtered"
    );
    Ok(PolicyDecision {
        policy: *policy,
        signer_set,
        admissible_signers,
    })
}

/// Runs policy resolution, the chain-of-custody check and list filtering.
///
/// Does not look at `automatic`; callers that dispatch on it do so first.
pub fn evaluate<S: PolicyStore + ?Sized>(
    store: &S,
    document: &Document,
) -> Result<PolicyDecision, Rejection> {
    let policy = resolve_policy(store, document.document_type())?;
    check_chain_of_custody(document, &policy)?;
    let lists = resolve_lists(store)?;
    filter_signers(document, &policy, &lists)
}
