//! Review record filtering.

use crate::record::ReviewRecord;

/// Trait for selecting review records.
pub trait ReviewFilter {
    /// Returns true if the record matches the filter criteria.
    fn matches(&self, record: &ReviewRecord) -> bool;
}

/// Filter by document type.
#[derive(Debug, Clone)]
pub struct DocumentTypeFilter {
    /// Document type to match (e.g. "passport").
    pub document_type: String,
}

impl ReviewFilter for DocumentTypeFilter {
    fn matches(&self, record: &ReviewRecord) -> bool {
        record.document_type.as_str() == self.document_type
    }
}

/// Filter by submitter.
#[derive(Debug, Clone)]
pub struct SubmitterFilter {
    /// Submitter to match.
    pub submitter: String,
}

impl ReviewFilter for SubmitterFilter {
    fn matches(&self, record: &ReviewRecord) -> bool {
        record.submitter.as_deref() == Some(self.submitter.as_str())
    }
}

/// Composite filter: all filters must match (AND). Empty matches everything.
#[derive(Default)]
pub struct AndFilter {
    /// Filters to combine with AND logic.
    pub filters: Vec<Box<dyn ReviewFilter>>,
}

impl ReviewFilter for AndFilter {
    fn matches(&self, record: &ReviewRecord) -> bool {
        self.filters.iter().all(|f| f.matches(record))
    }
}
