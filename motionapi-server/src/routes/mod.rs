//! Route handlers
//!
//! - deleted: CRUD over the deleted motions collection
//! - health: liveness probe

pub mod deleted;
pub mod health;
