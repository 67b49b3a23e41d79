mod tracing_setup;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use motionapi_core::ApiConfig;
use motionapi_server::{run_server, EntryStore, MemoryStore, MongoStore, ServerArgs};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = ServerArgs::parse();
    tracing_setup::init(args.debug).ok();

    let mut config = ApiConfig::load(args.config.as_deref()).context("Failed to load config")?;
    args.apply_to(&mut config);

    let store: Arc<dyn EntryStore> = if args.memory {
        tracing::warn!("Using in-memory store; entries are lost on shutdown");
        Arc::new(MemoryStore::new())
    } else {
        tracing::info!(
            url = %config.store.redacted_url(),
            database = %config.store.default_database,
            collection = %config.store.collection_name,
            "Using MongoDB store"
        );
        let store = MongoStore::connect(&config.store, config.store_timeout())
            .await
            .context("Failed to create MongoDB client")?;
        Arc::new(store)
    };

    run_server(config, store).await?;
    Ok(())
}
