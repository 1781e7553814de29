//! Command line definition and dispatch.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use domain::models::{Client, ClientUpdate, NewClient, Phone};
use persistence::ClientStore;
use serde::Serialize;

use crate::demo;

#[derive(Debug, Parser)]
#[command(name = "client-records", version, about = "Client and phone records in PostgreSQL")]
pub struct Cli {
    /// Database user (overrides database.user)
    #[arg(long, global = true)]
    pub user: Option<String>,

    /// Database password (overrides database.password)
    #[arg(long, global = true)]
    pub password: Option<String>,

    /// Target database name (overrides database.name)
    #[arg(long = "database", global = true)]
    pub database: Option<String>,

    /// Database server host (overrides database.host)
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Database server port (overrides database.port)
    #[arg(long, global = true)]
    pub port: Option<u16>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Configuration overrides for the flags that were given.
    pub fn overrides(&self) -> Vec<(&'static str, String)> {
        let mut overrides = Vec::new();
        if let Some(user) = &self.user {
            overrides.push(("database.user", user.clone()));
        }
        if let Some(password) = &self.password {
            overrides.push(("database.password", password.clone()));
        }
        if let Some(database) = &self.database {
            overrides.push(("database.name", database.clone()));
        }
        if let Some(host) = &self.host {
            overrides.push(("database.host", host.clone()));
        }
        if let Some(port) = self.port {
            overrides.push(("database.port", port.to_string()));
        }
        overrides
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Run the demonstration sequence (default)
    Demo,

    /// Add a client with optional phone numbers
    AddClient {
        #[arg(long)]
        name: String,
        #[arg(long)]
        surname: Option<String>,
        #[arg(long)]
        email: String,
        /// Phone number; repeat for several
        #[arg(long = "phone")]
        phones: Vec<String>,
    },

    /// Add a phone number to an existing client
    AddPhone { client_id: i32, number: String },

    /// Update the given fields of a client
    UpdateClient {
        client_id: i32,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, conflicts_with = "clear_surname")]
        surname: Option<String>,
        /// Set the surname to NULL
        #[arg(long)]
        clear_surname: bool,
        #[arg(long)]
        email: Option<String>,
    },

    /// Delete one phone number of a client
    DelPhone { client_id: i32, number: String },

    /// Delete a client and all of its phone numbers
    DelClient { client_id: i32 },

    /// Print ids of clients whose name, surname, email or phone contains SUBSTRING
    Find {
        #[arg(value_name = "SUBSTRING")]
        needle: String,
    },

    /// Print a client and its phone numbers as JSON
    Show { client_id: i32 },
}

/// A client with its phones, as printed by `show`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientDetails {
    #[serde(flatten)]
    pub client: Client,
    pub phones: Vec<Phone>,
}

impl Command {
    /// Runs the command against the store, printing results to stdout.
    pub async fn run(self, store: &mut ClientStore) -> Result<()> {
        match self {
            Command::Demo => {
                for found in demo::run(store).await? {
                    println!("{:?}", found);
                }
            }
            Command::AddClient {
                name,
                surname,
                email,
                phones,
            } => {
                let client = NewClient {
                    name,
                    surname,
                    email,
                    phones,
                };
                let client_id = store.add_client(&client).await?;
                println!("{}", client_id);
            }
            Command::AddPhone { client_id, number } => {
                let phone = store.add_phone(client_id, &number).await?;
                println!("{}", phone.phone_id);
            }
            Command::UpdateClient {
                client_id,
                name,
                surname,
                clear_surname,
                email,
            } => {
                let update = client_update(name, surname, clear_surname, email);
                let rows = store.update_client(client_id, &update).await?;
                println!("{}", rows);
            }
            Command::DelPhone { client_id, number } => {
                let rows = store.del_phone(client_id, &number).await?;
                println!("{}", rows);
            }
            Command::DelClient { client_id } => {
                let rows = store.del_client(client_id).await?;
                println!("{}", rows);
            }
            Command::Find { needle } => {
                let ids = store.find_client(&needle).await?;
                println!("{:?}", ids);
            }
            Command::Show { client_id } => {
                let Some(client) = store.get_client(client_id).await? else {
                    bail!("client {} not found", client_id);
                };
                let phones = store.list_phones(client_id).await?;
                let details = ClientDetails { client, phones };
                println!("{}", serde_json::to_string_pretty(&details)?);
            }
        }
        Ok(())
    }
}

/// Maps `update-client` flags onto a [`ClientUpdate`].
fn client_update(
    name: Option<String>,
    surname: Option<String>,
    clear_surname: bool,
    email: Option<String>,
) -> ClientUpdate {
    let surname = if clear_surname {
        Some(None)
    } else {
        surname.map(Some)
    };
    ClientUpdate {
        name,
        surname,
        email,
    }
}
