//! Shared utilities and common types for the client records workspace.
//!
//! This crate provides common functionality used across all other crates:
//! - Column length limits of the client and phone tables
//! - Common validation logic

pub mod validation;
