//! Delete every document from the application collections
//!
//! Refuses to run against a production environment.

use dotenvy::dotenv;
use mongodb::bson::{doc, Document};
use std::process::ExitCode;
use storage_api::config::{Config, Environment};
use storage_api::db::mongo::ALL_COLLECTIONS;
use storage_api::db::{default_database, redact_uri, MongoConnection, MongoDriver};
use storage_api::logging;
use tracing::{error, info};

async fn reset(database: &MongoConnection) -> Result<(), mongodb::error::Error> {
    let Some(client) = database.handle().await else {
        return Ok(());
    };
    let db = default_database(&client);

    for name in ALL_COLLECTIONS {
        let deleted = db.collection::<Document>(name).delete_many(doc! {}).await?;
        info!(
            collection = name,
            count = deleted.deleted_count,
            "Deleted {} {}",
            deleted.deleted_count,
            name
        );
    }
    info!("Database reset complete. Run the seed binary to populate fresh data.");
    Ok(())
}

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

    info!("Starting database reset...");
    info!(environment = %config.environment, "Environment");
    info!(database = %redact_uri(&config.mongodb_uri), "Database");

    if config.environment.is_production() {
        error!("Cannot reset production database! Reset is only for development and demo data.");
        return ExitCode::FAILURE;
    }

    let database = MongoConnection::new(MongoDriver::new());
    if let Err(err) = database.connect(&config.mongodb_uri).await {
        error!(error = %err, "Reset failed");
        return ExitCode::FAILURE;
    }

    let outcome = reset(&database).await;
    let _ = database.disconnect().await;

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Reset failed");
            ExitCode::FAILURE
        }
    }
}
