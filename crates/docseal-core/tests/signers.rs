mod common;

use common::*;
use docseal_canonical::SignerUrl;
use docseal_core::gate::{check_chain_of_custody, filter_signers};
use docseal_core::{DocumentTypePolicy, RejectionKind, SignerLists, SignerSet};

fn lists(allow: &[&str], deny: &[&str]) -> SignerLists {
    SignerLists::new(
        allow.iter().map(|u| SignerUrl::new(*u)),
        deny.iter().map(|u| SignerUrl::new(*u)),
    )
}

static POOL: [&str; 4] = [ISSUER, V1, V2, V3];

/// Every sequence over `POOL` of length `len`.
fn sequences(len: usize) -> Vec<Vec<&'static str>> {
    let mut out = vec![Vec::new()];
    for _ in 0..len {
        out = out
            .into_iter()
            .flat_map(|prefix| {
                POOL.iter().map(move |url| {
                    let mut next = prefix.clone();
                    next.push(*url);
                    next
                })
            })
            .collect();
    }
    out
}

#[test]
fn signer_set_is_extractor_then_validators_in_order() {
    let (doc, _) = document("national_id", ISSUER, &[V2, V1, V2], PDF_HASH);
    let set = SignerSet::from_document(&doc);
    let expected: Vec<SignerUrl> = [ISSUER, V2, V1, V2].iter().map(|u| SignerUrl::new(*u)).collect();
    assert_eq!(set.urls(), expected.as_slice());
    assert_eq!(set.len(), 4);
}

#[test]
fn admissible_is_ordered_allow_listed_subsequence() {
    let allow = lists(&[V1, ISSUER], &[]);
    for validators in sequences(3) {
        let (doc, _) = document("national_id", V2, &validators, PDF_HASH);
        let set = SignerSet::from_document(&doc);
        let admissible = set.admissible(&allow);

        let expected: Vec<SignerUrl> = set
            .urls()
            .iter()
            .filter(|u| allow.allow.contains(*u))
            .cloned()
            .collect();
        assert_eq!(admissible, expected, "validators: {:?}", validators);

        // Subsequence of the signer set.
        let mut rest = set.urls().iter();
        for url in &admissible {
            assert!(rest.any(|candidate| candidate == url));
        }
    }
}

#[test]
fn admissible_keeps_duplicates() {
    let (doc, _) = document("national_id", V1, &[V1, V2, V1], PDF_HASH);
    let set = SignerSet::from_document(&doc);
    assert_eq!(
        set.admissible(&lists(&[V1], &[])),
        vec![SignerUrl::new(V1); 3]
    );
}

#[test]
fn signer_on_both_lists_is_never_admissible() {
    let (doc, _) = document("national_id", ISSUER, &[V1, V2, V1], PDF_HASH);
    let set = SignerSet::from_document(&doc);
    let both = lists(&[V1, V2], &[V1]);

    assert_eq!(set.admissible(&both), vec![SignerUrl::new(V2)]);
    assert!(set.is_allowed(&both));
    assert!(!set.is_allowed(&lists(&[V1], &[V1])));
}

#[test]
fn any_deny_listed_signer_rejects() {
    let policy = DocumentTypePolicy {
        automatic: true,
        extractor_must_be_issuer: false,
        content_signable: true,
    };
    let deny = lists(&[V1, V2, V3], &[V3]);
    for validators in sequences(2) {
        let (doc, _) = document("national_id", ISSUER, &validators, PDF_HASH);
        let result = filter_signers(&doc, &policy, &deny);
        if validators.contains(&V3) {
            assert_eq!(result.unwrap_err().kind, RejectionKind::SignerDenied);
        } else {
            assert!(result.is_ok());
        }
    }
}

#[test]
fn nothing_to_sign_only_when_content_unsignable_and_none_allowed() {
    let (doc, _) = document("national_id", ISSUER, &[V1], PDF_HASH);
    let none_allowed = lists(&[V3], &[]);
    let mut policy = DocumentTypePolicy {
        automatic: true,
        extractor_must_be_issuer: false,
        content_signable: false,
    };

    assert_eq!(
        filter_signers(&doc, &policy, &none_allowed).unwrap_err().kind,
        RejectionKind::NothingToSign
    );

    policy.content_signable = true;
    let decision = filter_signers(&doc, &policy, &none_allowed).unwrap();
    assert!(decision.admissible_signers.is_empty());
}

#[test]
fn chain_of_custody_compares_urls_only() {
    let policy = DocumentTypePolicy {
        automatic: true,
        extractor_must_be_issuer: true,
        content_signable: false,
    };
    let (same, _) = document("national_id", ISSUER, &[], PDF_HASH);
    let (other, _) = document("national_id", EXTRACTOR_OTHER, &[], PDF_HASH);

    assert!(check_chain_of_custody(&same, &policy).is_ok());
    assert_eq!(
        check_chain_of_custody(&other, &policy).unwrap_err().kind,
        RejectionKind::ChainOfCustodyViolation
    );
}
