//! Per-document analysis inputs and their content-addressed cache.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::catalog::RuleCatalog;
use crate::document::Document;
use crate::suppression::SuppressionMap;

/// The immutable structures every check run shares for one document text.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub document: Document,
    pub suppressions: SuppressionMap,
}

impl Analysis {
    /// Builds the document model and suppression map for `text`.
    pub fn new(text: impl Into<String>, catalog: &RuleCatalog) -> Self {
        let document = Document::new(text);
        let suppressions = SuppressionMap::from_document(&document, catalog);
        Self {
            document,
            suppressions,
        }
    }
}

/// Reuses analyses across runs while a document's content is unchanged.
///
/// Entries are keyed by document (usually its path) and validated against a
/// BLAKE3 hash of the content.
#[derive(Debug, Default)]
pub struct DocumentCache {
    entries: Mutex<HashMap<String, (blake3::Hash, Arc<Analysis>)>>,
}

impl DocumentCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached analysis for `key` if `text` is unchanged, otherwise
    /// builds and stores a new one.
    pub fn get_or_build(&self, key: &str, text: &str, catalog: &RuleCatalog) -> Arc<Analysis> {
        let hash = blake3::hash(text.as_bytes());
        if let Some((cached_hash, analysis)) = self.entries.lock().get(key)
            && *cached_hash == hash
        {
            debug!("Document cache hit: {}", key);
            return Arc::clone(analysis);
        }

        let analysis = Arc::new(Analysis::new(text, catalog));
        self.entries
            .lock()
            .insert(key.to_string(), (hash, Arc::clone(&analysis)));
        analysis
    }

    /// Forgets a document, e.g. when it is closed.
    pub fn remove(&self, key: &str) {
        self.entries.lock().remove(key);
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
