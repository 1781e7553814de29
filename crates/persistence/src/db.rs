//! Database and schema bootstrap over a single connection.

use serde::Deserialize;
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::{Connection, Executor};
use tracing::{debug, error, info};

use crate::error::{sqlstate, StoreError, DUPLICATE_DATABASE};

/// DDL for the client table.
pub const CREATE_CLIENT_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS client(
        client_id SERIAL PRIMARY KEY,
        name VARCHAR(40) NOT NULL,
        surname VARCHAR(40),
        email VARCHAR(40) NOT NULL UNIQUE
    )
"#;

/// DDL for the phone table. Rows reference `client` without cascading.
pub const CREATE_PHONE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS phone(
        phone_id SERIAL PRIMARY KEY,
        number VARCHAR(15) NOT NULL UNIQUE,
        client_id INTEGER NOT NULL REFERENCES client(client_id)
    )
"#;

/// Connection parameters for the client database.
#[derive(Clone, Deserialize)]
pub struct ConnectionConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    pub user: String,

    #[serde(default)]
    pub password: String,

    /// Database used to issue `CREATE DATABASE`.
    #[serde(default = "default_admin_database")]
    pub admin_database: String,

    /// Target database holding the client and phone tables.
    pub name: String,
}

impl std::fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("admin_database", &self.admin_database)
            .field("name", &self.name)
            .finish()
    }
}

fn default_host() -> String {
    "localhost".to_string()
}
fn default_port() -> u16 {
    5432
}
fn default_admin_database() -> String {
    "postgres".to_string()
}

impl ConnectionConfig {
    pub fn new(
        user: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            user: user.into(),
            password: password.into(),
            admin_database: default_admin_database(),
            name: name.into(),
        }
    }

    /// Connect options for the given database on the configured server.
    pub fn connect_options(&self, database: &str) -> PgConnectOptions {
        let options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .database(database);

        if self.password.is_empty() {
            options
        } else {
            options.password(&self.password)
        }
    }
}

/// Opens a single connection to `database`.
///
/// Statements issued outside an explicit transaction auto-commit.
pub async fn open(config: &ConnectionConfig, database: &str) -> Result<PgConnection, StoreError> {
    debug!(host = %config.host, port = config.port, database, "Connecting");
    PgConnection::connect_with(&config.connect_options(database))
        .await
        .map_err(|e| {
            error!(database, error = %e, "Connection error");
            StoreError::Connect(e)
        })
}

/// Double-quotes an identifier for use in statement text.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Creates `name` unless it already exists.
///
/// Returns `true` when the database was created and `false` when it was
/// already present. Only the duplicate-database SQLSTATE is treated as
/// success; every other failure is returned.
pub async fn create_database(conn: &mut PgConnection, name: &str) -> Result<bool, StoreError> {
    let statement = format!("CREATE DATABASE {}", quote_identifier(name));

    // Sent as a simple query; CREATE DATABASE must run outside a transaction block
    match (&mut *conn).execute(statement.as_str()).await {
        Ok(_) => {
            info!(database = name, "Database created");
            Ok(true)
        }
        Err(e) if sqlstate(&e).as_deref() == Some(DUPLICATE_DATABASE) => {
            debug!(database = name, "Database already exists");
            Ok(false)
        }
        Err(e) => {
            error!(database = name, error = %e, "Create database error");
            Err(StoreError::CreateDatabase(e))
        }
    }
}

/// Creates the client and phone tables if absent, in one transaction.
pub async fn create_schema(conn: &mut PgConnection) -> Result<(), StoreError> {
    let result: Result<(), sqlx::Error> = async {
        let mut tx = conn.begin().await?;
        sqlx::query(CREATE_CLIENT_TABLE).execute(&mut *tx).await?;
        sqlx::query(CREATE_PHONE_TABLE).execute(&mut *tx).await?;
        tx.commit().await
    }
    .await;

    result.map_err(|e| {
        error!(error = %e, "Create tables error");
        StoreError::CreateTables(e)
    })?;

    debug!("Schema ready");
    Ok(())
}
