//! Persistence layer for the client records manager.
//!
//! This crate contains:
//! - Database and schema bootstrap over a single connection
//! - Entity definitions (database row mappings)
//! - The client store repository
//! - Store error classification

pub mod db;
pub mod entities;
pub mod error;
pub mod metrics;
pub mod repositories;

pub use db::ConnectionConfig;
pub use error::StoreError;
pub use repositories::ClientStore;
