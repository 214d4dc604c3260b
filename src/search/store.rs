use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::models::IndexedDocument;

/// Key-value storage for indexed documents.
///
/// Entries are replaced wholesale; readers get a shared snapshot that a
/// concurrent `put` never mutates.
pub trait DocumentStore: Send + Sync {
    fn get(&self, doc_id: &str) -> Option<Arc<IndexedDocument>>;

    /// Insert or replace the entry for `document.doc_id`.
    fn put(&self, document: IndexedDocument);

    /// Number of documents currently indexed.
    fn document_count(&self) -> usize;
}

/// Process-lifetime document index. Nothing is evicted or persisted.
#[derive(Default)]
pub struct InMemoryDocumentStore {
    docs: RwLock<HashMap<String, Arc<IndexedDocument>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn get(&self, doc_id: &str) -> Option<Arc<IndexedDocument>> {
        self.docs.read().get(doc_id).cloned()
    }

    fn put(&self, document: IndexedDocument) {
        let doc_id = document.doc_id.clone();
        self.docs.write().insert(doc_id, Arc::new(document));
    }

    fn document_count(&self) -> usize {
        self.docs.read().len()
    }
}
