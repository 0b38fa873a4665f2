//! Output formatting utilities.

use docseal_core::{Document, PolicyConfig};
use serde_json::Value;

/// Formats a value as pretty JSON.
pub fn format_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Prints a table header followed by a rule of the given width.
pub fn print_table_header(header: &str, width: usize) {
    println!("{}", header);
    println!("{}", "-".repeat(width));
}

/// Truncates `s` to at most `max_len` characters, marking the cut.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Reads and parses a document file.
pub fn load_document(path: &str) -> Result<Document, Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read document {}: {}", path, e))?;
    Ok(Document::parse(&raw).map_err(|e| format!("Invalid document {}: {}", path, e))?)
}

/// Reads a policy config file.
pub fn load_config(path: &str) -> Result<PolicyConfig, Box<dyn std::error::Error>> {
    Ok(PolicyConfig::load(path).map_err(|e| format!("Failed to load config {}: {}", path, e))?)
}
