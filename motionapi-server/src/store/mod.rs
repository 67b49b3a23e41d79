//! Entry store abstraction
//!
//! Handlers only see `EntryStore`. `MongoStore` is the production backend;
//! `MemoryStore` keeps documents in process for tests and local runs.
//!
//! Not-found is never an error here: `update_one` and `delete_one` report
//! how many documents they touched and callers decide what zero means.

pub mod memory;
pub mod mongo;

use async_trait::async_trait;
use motionapi_core::{CoreError, Entry, EntryUpdate};

pub use memory::MemoryStore;
pub use mongo::MongoStore;

/// Store error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("document decode error: {0}")]
    Decode(#[from] CoreError),

    #[error("duplicate key: _id '{id}' already exists")]
    DuplicateKey { id: String },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Operations the collection controller needs from the store
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Every entry, in store order.
    async fn find_all(&self) -> StoreResult<Vec<Entry>>;

    /// Insert verbatim; fails if the `_id` already exists.
    async fn insert_one(&self, entry: &Entry) -> StoreResult<()>;

    /// Apply `update` to the entry with `_id == id`. Returns the match count.
    async fn update_one(&self, id: &str, update: EntryUpdate) -> StoreResult<u64>;

    /// Remove the entry with `_id == id`. Returns the delete count.
    async fn delete_one(&self, id: &str) -> StoreResult<u64>;
}
