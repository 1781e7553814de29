//! Client store: one owned connection and the client/phone operations.

use domain::models::{Client, ClientField, ClientUpdate, NewClient, Phone};
use shared::validation::{validate_database_name, validate_phone_number};
use sqlx::postgres::{PgConnection, Postgres};
use sqlx::{Connection, QueryBuilder};
use tracing::{debug, info, warn};
use validator::Validate;

use crate::db::{self, ConnectionConfig};
use crate::entities::{ClientEntity, PhoneEntity};
use crate::error::StoreError;
use crate::metrics::QueryTimer;

/// Client records over a single PostgreSQL connection.
///
/// Every operation takes `&mut self`; the store is meant for one caller
/// issuing one statement at a time. Nothing is cached in memory.
pub struct ClientStore {
    conn: PgConnection,
    database: String,
}

impl ClientStore {
    /// Connects, creates the target database if needed, reconnects to it and
    /// creates the schema.
    ///
    /// Fails without leaving a usable store when any of these steps fail.
    pub async fn connect(config: &ConnectionConfig) -> Result<Self, StoreError> {
        validate_database_name(&config.name)
            .map_err(|_| StoreError::InvalidDatabaseName(config.name.clone()))?;

        let mut admin = db::open(config, &config.admin_database).await?;
        let created = db::create_database(&mut admin, &config.name).await?;
        if let Err(e) = admin.close().await {
            warn!(error = %e, "Failed to close administrative connection");
        }

        let mut conn = db::open(config, &config.name).await?;
        db::create_schema(&mut conn).await?;

        info!(database = %config.name, created, "Client store connected");
        Ok(Self {
            conn,
            database: config.name.clone(),
        })
    }

    /// Name of the database this store is connected to.
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Re-runs the idempotent schema creation.
    pub async fn ensure_schema(&mut self) -> Result<(), StoreError> {
        db::create_schema(&mut self.conn).await
    }

    /// Inserts a client and then each of its phone numbers.
    ///
    /// The client insert and the phone inserts are separate statements: if a
    /// phone insert fails, the client and the phones inserted before it stay.
    pub async fn add_client(&mut self, client: &NewClient) -> Result<i32, StoreError> {
        client.validate()?;

        let timer = QueryTimer::new("add_client");
        let result = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO client (name, surname, email)
            VALUES ($1, $2, $3)
            RETURNING client_id
            "#,
        )
        .bind(&client.name)
        .bind(&client.surname)
        .bind(&client.email)
        .fetch_one(&mut self.conn)
        .await;
        timer.finish(&result);
        let client_id = result?;

        debug!(client_id, phones = client.phones.len(), "Client inserted");

        for number in &client.phones {
            self.add_phone(client_id, number).await?;
        }

        Ok(client_id)
    }

    /// Inserts one phone number for an existing client.
    pub async fn add_phone(&mut self, client_id: i32, number: &str) -> Result<Phone, StoreError> {
        validate_phone_number(number)?;

        let timer = QueryTimer::new("add_phone");
        let result = sqlx::query_as::<_, PhoneEntity>(
            r#"
            INSERT INTO phone (client_id, number)
            VALUES ($1, $2)
            RETURNING phone_id, number, client_id
            "#,
        )
        .bind(client_id)
        .bind(number)
        .fetch_one(&mut self.conn)
        .await;
        timer.finish(&result);

        let phone: Phone = result?.into();
        debug!(client_id, phone_id = phone.phone_id, "Phone inserted");
        Ok(phone)
    }

    /// Writes the provided fields of a client.
    ///
    /// Returns the number of rows updated. An empty update executes nothing
    /// and returns 0.
    pub async fn update_client(
        &mut self,
        client_id: i32,
        update: &ClientUpdate,
    ) -> Result<u64, StoreError> {
        if update.is_empty() {
            debug!(client_id, "Empty client update, nothing to do");
            return Ok(0);
        }
        update.validate()?;

        let mut builder = update_statement(client_id, &update.fields());

        let timer = QueryTimer::new("update_client");
        let result = builder.build().execute(&mut self.conn).await;
        timer.finish(&result);

        let rows = result?.rows_affected();
        debug!(client_id, rows, "Client updated");
        Ok(rows)
    }

    /// Deletes the phone matching both client and number.
    ///
    /// Returns the number of rows deleted; 0 when nothing matched.
    pub async fn del_phone(&mut self, client_id: i32, number: &str) -> Result<u64, StoreError> {
        let timer = QueryTimer::new("del_phone");
        let result = sqlx::query(
            r#"
            DELETE FROM phone
            WHERE client_id = $1 AND number = $2
            "#,
        )
        .bind(client_id)
        .bind(number)
        .execute(&mut self.conn)
        .await;
        timer.finish(&result);

        let rows = result?.rows_affected();
        debug!(client_id, rows, "Phone deleted");
        Ok(rows)
    }

    /// Deletes a client and all of its phones in one transaction.
    ///
    /// Phones go first since the foreign key does not cascade. Returns the
    /// number of client rows deleted; 0 when the client does not exist.
    pub async fn del_client(&mut self, client_id: i32) -> Result<u64, StoreError> {
        let timer = QueryTimer::new("del_client");
        let result = async {
            let mut tx = self.conn.begin().await?;

            let phones = sqlx::query("DELETE FROM phone WHERE client_id = $1")
                .bind(client_id)
                .execute(&mut *tx)
                .await?
                .rows_affected();

            let clients = sqlx::query("DELETE FROM client WHERE client_id = $1")
                .bind(client_id)
                .execute(&mut *tx)
                .await?
                .rows_affected();

            tx.commit().await?;
            Ok::<_, sqlx::Error>((phones, clients))
        }
        .await;
        timer.finish(&result);

        let (phones, clients) = result?;
        debug!(client_id, phones, clients, "Client deleted");
        Ok(clients)
    }

    /// Ids of clients whose name, surname, email or any phone number contains
    /// `needle`. Matching is case-sensitive and literal; ids are distinct and
    /// ascending.
    pub async fn find_client(&mut self, needle: &str) -> Result<Vec<i32>, StoreError> {
        let timer = QueryTimer::new("find_client");
        let result = sqlx::query_scalar::<_, i32>(
            r#"
            SELECT client_id
            FROM client
            WHERE strpos(name, $1) > 0 OR strpos(surname, $1) > 0 OR strpos(email, $1) > 0

            UNION

            SELECT client_id
            FROM phone
            WHERE strpos(number, $1) > 0

            ORDER BY client_id
            "#,
        )
        .bind(needle)
        .fetch_all(&mut self.conn)
        .await;
        timer.finish(&result);

        let ids = result?;
        debug!(needle, matches = ids.len(), "Client search");
        Ok(ids)
    }

    /// Finds a client by id.
    pub async fn get_client(&mut self, client_id: i32) -> Result<Option<Client>, StoreError> {
        let timer = QueryTimer::new("get_client");
        let result = sqlx::query_as::<_, ClientEntity>(
            r#"
            SELECT client_id, name, surname, email
            FROM client
            WHERE client_id = $1
            "#,
        )
        .bind(client_id)
        .fetch_optional(&mut self.conn)
        .await;
        timer.finish(&result);

        Ok(result?.map(Into::into))
    }

    /// Lists a client's phones ordered by id.
    pub async fn list_phones(&mut self, client_id: i32) -> Result<Vec<Phone>, StoreError> {
        let timer = QueryTimer::new("list_phones");
        let result = sqlx::query_as::<_, PhoneEntity>(
            r#"
            SELECT phone_id, number, client_id
            FROM phone
            WHERE client_id = $1
            ORDER BY phone_id
            "#,
        )
        .bind(client_id)
        .fetch_all(&mut self.conn)
        .await;
        timer.finish(&result);

        Ok(result?.into_iter().map(Into::into).collect())
    }

    /// Closes the connection.
    pub async fn close(self) -> Result<(), StoreError> {
        self.conn.close().await.map_err(StoreError::Database)?;
        info!(database = %self.database, "Connection closed");
        Ok(())
    }
}

/// Builds `UPDATE client SET ... WHERE client_id = ...` for the given fields.
///
/// Column names come from [`ClientField::column`]; every value is bound.
fn update_statement(client_id: i32, fields: &[ClientField]) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::<Postgres>::new("UPDATE client SET ");
    {
        let mut assignments = builder.separated(", ");
        for field in fields {
            assignments.push(field.column());
            assignments.push_unseparated(" = ");
            assignments.push_bind_unseparated(field.value().map(str::to_string));
        }
    }
    builder.push(" WHERE client_id = ");
    builder.push_bind(client_id);
    builder
}
