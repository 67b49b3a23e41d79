//! In-process entry store
//!
//! Holds entries in their stored document form so reads go through the same
//! decode path as MongoDB. `_id` is unique, like the primary key there.

use async_trait::async_trait;
use bson::Document;
use tokio::sync::RwLock;

use motionapi_core::{Entry, EntryUpdate};

use super::{EntryStore, StoreError, StoreResult};

#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<Vec<Document>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with raw documents, bypassing the duplicate check.
    pub fn with_documents(documents: Vec<Document>) -> Self {
        Self {
            documents: RwLock::new(documents),
        }
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }

    /// Snapshot of the stored documents
    pub async fn documents(&self) -> Vec<Document> {
        self.documents.read().await.clone()
    }
}

fn has_id(document: &Document, id: &str) -> bool {
    document.get_str("_id").is_ok_and(|stored| stored == id)
}

#[async_trait]
impl EntryStore for MemoryStore {
    async fn find_all(&self) -> StoreResult<Vec<Entry>> {
        let documents = self.documents.read().await;
        documents
            .iter()
            .cloned()
            .map(|document| Entry::from_document(document).map_err(StoreError::from))
            .collect()
    }

    async fn insert_one(&self, entry: &Entry) -> StoreResult<()> {
        let mut documents = self.documents.write().await;
        if documents.iter().any(|d| has_id(d, &entry.id)) {
            return Err(StoreError::DuplicateKey {
                id: entry.id.clone(),
            });
        }
        documents.push(entry.to_document());
        Ok(())
    }

    async fn update_one(&self, id: &str, update: EntryUpdate) -> StoreResult<u64> {
        let mut documents = self.documents.write().await;
        let Some(slot) = documents.iter_mut().find(|d| has_id(d, id)) else {
            return Ok(0);
        };

        let mut entry = Entry::from_document(slot.clone())?;
        update.apply_to(&mut entry);
        *slot = entry.to_document();
        Ok(1)
    }

    async fn delete_one(&self, id: &str) -> StoreResult<u64> {
        let mut documents = self.documents.write().await;
        match documents.iter().position(|d| has_id(d, id)) {
            Some(index) => {
                documents.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}
