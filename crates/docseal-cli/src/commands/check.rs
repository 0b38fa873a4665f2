//! Check command implementation.

use docseal_core::{gate, PolicyDecision, Rejection};
use serde_json::json;
use tracing::debug;

use crate::output::{format_json, load_config, load_document};

/// Where a document would go if submitted now.
enum Verdict {
    Deferred,
    Signable(PolicyDecision),
    Rejected(Rejection),
}

pub fn run(
    document: String,
    config: String,
    manual: bool,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load_document(&document)?;
    let config = load_config(&config)?;

    let verdict = match gate::resolve_policy(&config, doc.document_type()) {
        Err(rejection) => Verdict::Rejected(rejection),
        Ok(policy) if !policy.automatic && !manual => Verdict::Deferred,
        Ok(_) => match gate::evaluate(&config, &doc) {
            Ok(decision) => Verdict::Signable(decision),
            Err(rejection) => Verdict::Rejected(rejection),
        },
    };

    let rejected = matches!(verdict, Verdict::Rejected(_));
    debug!(document = %document, manual, rejected, "policy check finished");

    if json_output {
        let value = match &verdict {
            Verdict::Deferred => json!({
                "document_type": doc.document_type(),
                "verdict": "deferred",
            }),
            Verdict::Signable(decision) => json!({
                "document_type": doc.document_type(),
                "verdict": "signable",
                "policy": decision.policy,
                "signer_set": decision.signer_set,
                "admissible_signers": decision.admissible_signers,
            }),
            Verdict::Rejected(rejection) => json!({
                "document_type": doc.document_type(),
                "verdict": "rejected",
                "code": rejection.kind.code(),
                "reason": rejection.reason,
                "stage": rejection.stage,
            }),
        };
        println!("{}", format_json(&value));
    } else {
        match &verdict {
            Verdict::Deferred => {
                println!("deferred: {} requires manual review", doc.document_type());
            }
            Verdict::Signable(decision) => {
                println!(
                    "signable: {} admissible signer(s), content signable: {}",
                    decision.admissible_signers.len(),
                    decision.policy.content_signable
                );
                for url in &decision.admissible_signers {
                    println!("  {}", url);
                }
            }
            Verdict::Rejected(rejection) => {
                println!("rejected: {} at {}", rejection, rejection.stage);
            }
        }
    }

    if rejected {
        std::process::exit(1);
    }

    Ok(())
}
