//! Common test utilities for integration tests.
//!
//! Integration tests run against a real PostgreSQL server. Connection
//! parameters come from `TEST_DATABASE_USER`, `TEST_DATABASE_PASSWORD`,
//! `TEST_DATABASE_HOST`, `TEST_DATABASE_PORT` and `TEST_DATABASE_NAME`; when
//! `TEST_DATABASE_USER` is unset the tests return early.

#![allow(dead_code)]

use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use persistence::{ClientStore, ConnectionConfig};
use tokio::sync::Mutex;
use uuid::Uuid;

/// Serializes database/schema bootstrap across concurrently running tests.
static CONNECT_LOCK: Mutex<()> = Mutex::const_new(());

/// Test connection configuration, or `None` when no test server is configured.
pub fn test_config() -> Option<ConnectionConfig> {
    let user = std::env::var("TEST_DATABASE_USER").ok()?;
    let password = std::env::var("TEST_DATABASE_PASSWORD").unwrap_or_default();
    let name =
        std::env::var("TEST_DATABASE_NAME").unwrap_or_else(|_| "client_records_test".to_string());

    let mut config = ConnectionConfig::new(user, password, name);
    if let Ok(host) = std::env::var("TEST_DATABASE_HOST") {
        config.host = host;
    }
    if let Some(port) = std::env::var("TEST_DATABASE_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
    {
        config.port = port;
    }
    Some(config)
}

/// Connects a store to the test database.
pub async fn connect_test_store() -> Option<ClientStore> {
    let Some(config) = test_config() else {
        eprintln!("TEST_DATABASE_USER not set, skipping database test");
        return None;
    };

    let _guard = CONNECT_LOCK.lock().await;
    Some(
        ClientStore::connect(&config)
            .await
            .expect("Failed to connect to test database"),
    )
}

/// Random token, unique enough to keep parallel tests apart.
pub fn unique_token() -> String {
    Uuid::new_v4().simple().to_string()[..12].to_string()
}

/// Unique email that fits VARCHAR(40).
pub fn unique_email() -> String {
    format!("{}@test.example", unique_token())
}

/// Unique 13-digit phone number.
pub fn unique_phone() -> String {
    format!("{:013}", Uuid::new_v4().as_u128() % 10_000_000_000_000)
}

pub fn first_name() -> String {
    FirstName().fake()
}

pub fn last_name() -> String {
    LastName().fake()
}
