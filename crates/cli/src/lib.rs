//! Command line front end for the client records manager.

pub mod commands;
pub mod config;
pub mod demo;
pub mod logging;
