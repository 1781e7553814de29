//! Domain layer for the client records manager.
//!
//! This crate contains:
//! - Domain models (Client, Phone)
//! - Validated inputs for creating and updating clients

pub mod models;
