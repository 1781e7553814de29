//! Domain models for the client records manager.

pub mod client;
pub mod phone;

pub use client::{Client, ClientField, ClientUpdate, NewClient};
pub use phone::Phone;
