//! motionapi-core: the motion entry model, its stored document form, and
//! configuration shared by the server and its tests.

pub mod config;
pub mod entry;
pub mod error;
pub mod update;

pub use config::{ApiConfig, ServerConfig, StoreConfig};
pub use entry::{new_identifier, Entry};
pub use error::{CoreError, Result};
pub use update::EntryUpdate;
