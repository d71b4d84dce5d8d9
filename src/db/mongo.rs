//! MongoDB driver for the connection manager

use async_trait::async_trait;
use mongodb::{bson::doc, options::ClientOptions, Client, Database};
use std::time::Duration;

use super::connection::{ConnectionManager, DatabaseDriver};

/// Used when the connection string names no database
pub const DEFAULT_DATABASE: &str = "storage";

pub const UNITS: &str = "units";
pub const TENANTS: &str = "tenants";
pub const PAYMENTS: &str = "payments";
pub const OCCUPATION_LOGS: &str = "occupationlogs";

pub const ALL_COLLECTIONS: [&str; 4] = [UNITS, TENANTS, PAYMENTS, OCCUPATION_LOGS];

pub type MongoConnection = ConnectionManager<MongoDriver>;

#[derive(Debug, Clone)]
pub struct MongoDriver {
    app_name: String,
    server_selection_timeout: Duration,
}

impl Default for MongoDriver {
    fn default() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_string(),
            server_selection_timeout: Duration::from_secs(5),
        }
    }
}

impl MongoDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_server_selection_timeout(mut self, timeout: Duration) -> Self {
        self.server_selection_timeout = timeout;
        self
    }
}

#[async_trait]
impl DatabaseDriver for MongoDriver {
    type Handle = Client;
    type Error = mongodb::error::Error;

    /// Build a client and confirm the deployment answers a `ping`
    async fn connect(&self, uri: &str) -> Result<Client, Self::Error> {
        let mut options = ClientOptions::parse(uri).await?;
        options.app_name = Some(self.app_name.clone());
        options.server_selection_timeout = Some(self.server_selection_timeout);

        let client = Client::with_options(options)?;
        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(client)
    }

    async fn disconnect(&self, client: Client) -> Result<(), Self::Error> {
        client.shutdown().await;
        Ok(())
    }
}

/// The database named in the connection string, or [`DEFAULT_DATABASE`]
pub fn default_database(client: &Client) -> Database {
    client
        .default_database()
        .unwrap_or_else(|| client.database(DEFAULT_DATABASE))
}
