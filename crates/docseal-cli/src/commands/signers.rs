//! Signers command implementation.

use docseal_core::{PolicyStore, SignerSet};
use serde_json::json;

use crate::output::{format_json, load_config, load_document, print_table_header, truncate};

pub fn run(document: String, config: String, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load_document(&document)?;
    let config = load_config(&config)?;
    let lists = config.resolve_lists()?;

    let signer_set = SignerSet::from_document(&doc);
    let admissible = signer_set.admissible(&lists);

    let rows: Vec<_> = signer_set
        .urls()
        .iter()
        .enumerate()
        .map(|(position, url)| {
            let role = if position == 0 { "extractor" } else { "validator" };
            let status = if lists.is_denied(url) {
                "denied"
            } else if lists.is_allowed(url) {
                "allowed"
            } else {
                "unlisted"
            };
            (url, role, status)
        })
        .collect();

    if json_output {
        let signers: Vec<_> = rows
            .iter()
            .map(|(url, role, status)| json!({ "url": url, "role": role, "status": status }))
            .collect();
        let value = json!({
            "document_type": doc.document_type(),
            "signers": signers,
            "denied": signer_set.is_denied(&lists),
            "admissible_signers": admissible,
        });
        println!("{}", format_json(&value));
    } else {
        print_table_header(&format!("{:<60} {:<10} {}", "SIGNER", "ROLE", "STATUS"), 80);
        for (url, role, status) in &rows {
            println!("{:<60} {:<10} {}", truncate(url.as_str(), 60), role, status);
        }
        println!();
        println!("admissible: {} of {}", admissible.len(), signer_set.len());
    }

    Ok(())
}
