//! Replace the `units` collection with the demo catalogue

use dotenvy::dotenv;
use mongodb::bson::{doc, DateTime};
use std::process::ExitCode;
use storage_api::config::{Config, Environment};
use storage_api::db::mongo::UNITS;
use storage_api::db::seed::{demo_units, size_summary, UnitRecord};
use storage_api::db::{default_database, redact_uri, MongoConnection, MongoDriver};
use storage_api::logging;
use tracing::{error, info};

async fn seed(database: &MongoConnection) -> Result<(), mongodb::error::Error> {
    let Some(client) = database.handle().await else {
        return Ok(());
    };
    let units = default_database(&client).collection::<UnitRecord>(UNITS);

    let deleted = units.delete_many(doc! {}).await?;
    info!(count = deleted.deleted_count, "Cleared existing units");

    let records = demo_units(DateTime::now());
    let inserted = units.insert_many(&records).await?;
    info!(count = inserted.inserted_ids.len(), "Created units");

    for (size, count) in size_summary(&records) {
        info!(
            size = size.as_str(),
            count,
            monthly_rate = size.monthly_rate(),
            "{} units: {} @ ${}/month",
            size.as_str(),
            count,
            size.monthly_rate()
        );
    }
    info!(total = records.len(), "Seed complete");
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

    info!("Starting database seed...");
    info!(environment = %config.environment, "Environment");
    info!(database = %redact_uri(&config.mongodb_uri), "Database");

    let database = MongoConnection::new(MongoDriver::new());
    if let Err(err) = database.connect(&config.mongodb_uri).await {
        error!(error = %err, "Seed failed");
        return ExitCode::FAILURE;
    }

    let outcome = seed(&database).await;
    let _ = database.disconnect().await;

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Seed failed");
            ExitCode::FAILURE
        }
    }
}
