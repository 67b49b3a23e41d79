//! motionapi-server: HTTP API over the deleted motions collection
//!
//! Exposes list, update, insert and delete for one MongoDB collection.
//! Handlers talk to an injected `EntryStore`, so tests run against
//! `MemoryStore` without a database.

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;
pub mod state;
pub mod store;

pub use error::{ApiError, ApiResult};
pub use server::{build_router, run_server, ServerArgs, ServerError};
pub use state::AppState;
pub use store::{EntryStore, MemoryStore, MongoStore, StoreError};
