//! MongoDB-backed entry store
//!
//! One `Client` is created at startup and shared; the driver pools
//! connections internally. TLS is negotiated by rustls, which only speaks
//! TLS 1.2 and newer.

use std::time::Duration;

use async_trait::async_trait;
use bson::{doc, Document};
use futures::TryStreamExt;
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};

use motionapi_core::{Entry, EntryUpdate, StoreConfig};

use super::{EntryStore, StoreError, StoreResult};

const APP_NAME: &str = "motionapi";
const DUPLICATE_KEY_CODE: i32 = 11000;

/// Entry store over one MongoDB collection
#[derive(Clone)]
pub struct MongoStore {
    collection: Collection<Document>,
}

impl MongoStore {
    /// Parse the connection URL and build a client for the configured collection.
    ///
    /// The driver connects lazily, so an unreachable server surfaces on the
    /// first operation rather than here, once `timeout` has run out.
    pub async fn connect(config: &StoreConfig, timeout: Duration) -> StoreResult<Self> {
        let mut options = ClientOptions::parse(&config.connection_url).await?;
        options.app_name = Some(APP_NAME.to_string());
        options.connect_timeout = Some(timeout);
        options.server_selection_timeout = Some(timeout);

        let client = Client::with_options(options)?;
        Ok(Self::from_client(&client, config))
    }

    pub fn from_client(client: &Client, config: &StoreConfig) -> Self {
        let collection = client
            .database(&config.default_database)
            .collection::<Document>(&config.collection_name);
        Self { collection }
    }
}

#[async_trait]
impl EntryStore for MongoStore {
    async fn find_all(&self) -> StoreResult<Vec<Entry>> {
        let documents: Vec<Document> = self.collection.find(doc! {}).await?.try_collect().await?;

        documents
            .into_iter()
            .map(|document| Entry::from_document(document).map_err(StoreError::from))
            .collect()
    }

    async fn insert_one(&self, entry: &Entry) -> StoreResult<()> {
        match self.collection.insert_one(entry.to_document()).await {
            Ok(_) => Ok(()),
            Err(e) if is_duplicate_key(&e) => Err(StoreError::DuplicateKey {
                id: entry.id.clone(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    async fn update_one(&self, id: &str, update: EntryUpdate) -> StoreResult<u64> {
        let result = self
            .collection
            .update_one(doc! { "_id": id }, update.to_set_document())
            .await?;
        Ok(result.matched_count)
    }

    async fn delete_one(&self, id: &str) -> StoreResult<u64> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count)
    }
}

fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    matches!(
        &*error.kind,
        ErrorKind::Write(WriteFailure::WriteError(e)) if e.code == DUPLICATE_KEY_CODE
    )
}
