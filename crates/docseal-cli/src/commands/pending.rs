//! Pending command implementation.

use std::path::Path;

use chrono::SecondsFormat;
use docseal_store::{AndFilter, DocumentTypeFilter, FsReviewStore, ReviewFilter, SubmitterFilter};
use serde_json::json;
use tracing::debug;

use crate::output::{print_table_header, truncate};

pub fn run(
    store: String,
    document_type: Option<String>,
    submitter: Option<String>,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !Path::new(&store).is_dir() {
        return Err(format!("Review store not found: {}", store).into());
    }
    let reviews = FsReviewStore::open(&store)?;

    let mut filters: Vec<Box<dyn ReviewFilter>> = Vec::new();
    if let Some(document_type) = document_type {
        filters.push(Box::new(DocumentTypeFilter { document_type }));
    }
    if let Some(submitter) = submitter {
        filters.push(Box::new(SubmitterFilter { submitter }));
    }
    let records = reviews.list_filtered(&AndFilter { filters })?;
    debug!(store = %store, count = records.len(), "listed pending reviews");

    if json_output {
        for record in &records {
            let value = json!({
                "id": record.id,
                "document_type": record.document_type,
                "version": record.version,
                "submitter": record.submitter,
                "pdf_source": record.pdf_source,
                "stored_at": record.stored_at.to_rfc3339_opts(SecondsFormat::Secs, true),
                "content_digest": record.content_digest,
            });
            println!("{}", serde_json::to_string(&value)?);
        }
    } else {
        print_table_header(
            &format!(
                "{:<36} {:<16} {:<4} {:<20} {}",
                "ID", "TYPE", "VER", "STORED_AT", "SUBMITTER"
            ),
            100,
        );
        for record in &records {
            println!(
                "{:<36} {:<16} {:<4} {:<20} {}",
                record.id,
                truncate(record.document_type.as_str(), 16),
                record.version,
                record.stored_at.to_rfc3339_opts(SecondsFormat::Secs, true),
                record.submitter.as_deref().unwrap_or("-")
            );
        }
    }

    Ok(())
}
