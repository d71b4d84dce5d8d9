//! Check that the configured MongoDB deployment is reachable

use dotenvy::dotenv;
use std::process::ExitCode;
use storage_api::config::{Config, Environment};
use storage_api::db::{default_database, redact_uri, MongoConnection, MongoDriver};
use storage_api::logging;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            logging::init_logging(Environment::default());
            error!("{}", err);
            return ExitCode::FAILURE;
        }
    };
    logging::init_logging(config.environment);

    info!("Testing MongoDB connection...");
    info!(environment = %config.environment, "Environment");
    info!(database = %redact_uri(&config.mongodb_uri), "Database");

    let database = MongoConnection::new(MongoDriver::new());
    if let Err(err) = database.connect(&config.mongodb_uri).await {
        error!(error = %err, "Connection failed");
        return ExitCode::FAILURE;
    }

    info!(state = ?database.state(), "Connection state");
    if let Some(client) = database.handle().await {
        info!(name = %default_database(&client).name(), "Database name");
    }

    if let Err(err) = database.disconnect().await {
        error!(error = %err, "Disconnect failed");
        return ExitCode::FAILURE;
    }
    info!("Connection test passed");
    ExitCode::SUCCESS
}
