use docseal_canonical::SignerUrl;
use serde::Serialize;

use crate::document::Document;
use crate::policy::SignerLists;

/// Ordered prior signers of a document: the extractor, then each validator.
///
/// Order follows the document and duplicates are kept; list policy operates
/// on this raw sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SignerSet(Vec<SignerUrl>);

impl SignerSet {
    /// Resolves the signer set of a document.
    pub fn from_document(document: &Document) -> Self {
        let urls = std::iter::once(&document.extractor.signature.url)
            .chain(document.validators.iter().map(|v| &v.signature.url))
            .cloned()
            .collect();
        Self(urls)
    }

    /// Signer URLs in document order.
    pub fn urls(&self) -> &[SignerUrl] {
        &self.0
    }

    /// Number of signers, counting duplicates.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no signers.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if any signer is deny-listed.
    pub fn is_denied(&self, lists: &SignerLists) -> bool {
        self.0.iter().any(|url| lists.is_denied(url))
    }

    /// Returns true if any signer is allow-listed and not deny-listed.
    pub fn is_allowed(&self, lists: &SignerLists) -> bool {
        self.0.iter().any(|url| lists.is_allowed(url))
    }

    /// Allow-listed signers whose attestations are propagated into the new
    /// signature. Keeps document order and duplicates.
    pub fn admissible(&self, lists: &SignerLists) -> Vec<SignerUrl> {
        let mut urls = self.0.clone();
        urls.retain(|url| lists.is_allowed(url));
        urls
    }
}

impl<'a> IntoIterator for &'a SignerSet {
    type Item = &'a SignerUrl;
    type IntoIter = std::slice::Iter<'a, SignerUrl>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
