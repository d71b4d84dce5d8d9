//! Storage Management API server
//!
//! Connects to MongoDB (with retries), serves the HTTP API and shuts down
//! gracefully on SIGINT/SIGTERM, panics or a failed server task.

use dotenvy::dotenv;
use std::io;
use std::process::ExitCode;
use std::sync::Arc;
use storage_api::config::{Config, Environment};
use storage_api::core::{
    create_router, guard_startup, serve, AppState, ShutdownCoordinator, EXIT_FAILURE,
};
use storage_api::db::{redact_uri, MongoConnection, MongoDriver};
use storage_api::logging;
use storage_api::metrics::Metrics;
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env if present
    dotenv().ok();

    ExitCode::from(guard_startup(run()).await)
}

async fn run() -> u8 {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            logging::init_logging(Environment::default());
            for issue in err.issues() {
                error!(variable = issue.variable, "{}", issue.message);
            }
            error!("{}", err);
            return EXIT_FAILURE;
        }
    };

    logging::init_logging(config.environment);
    info!("Starting Storage Management API");
    info!(environment = %config.environment, "Environment");
    info!(database = %redact_uri(&config.mongodb_uri), "Database");

    let database = Arc::new(MongoConnection::new(MongoDriver::new()));
    database.spawn_event_logger();
    if let Err(err) = database.connect(&config.mongodb_uri).await {
        error!(error = %err, "Failed to connect to the database");
        return EXIT_FAILURE;
    }

    let metrics = match Metrics::new() {
        Ok(metrics) => Arc::new(metrics),
        Err(err) => {
            error!(error = %err, "Failed to register metrics");
            let _ = database.disconnect().await;
            return EXIT_FAILURE;
        }
    };

    let address = format!("0.0.0.0:{}", config.port);
    let listener = match TcpListener::bind(&address).await {
        Ok(listener) => listener,
        Err(err) => {
            if err.kind() == io::ErrorKind::AddrInUse {
                error!(port = config.port, "Port {} is already in use", config.port);
            } else {
                error!(error = %err, port = config.port, "Failed to bind HTTP listener");
            }
            let _ = database.disconnect().await;
            return EXIT_FAILURE;
        }
    };

    let coordinator = ShutdownCoordinator::new();
    coordinator.install_panic_hook();
    coordinator.supervise("signal listener", coordinator.listen_for_signals());

    let state = AppState::new(&config, database.clone(), metrics);
    let router = create_router(state);

    info!(port = config.port, "HTTP Server: http://0.0.0.0:{}", config.port);
    info!("Health check: http://localhost:{}/api/health", config.port);
    info!(
        "Metrics endpoint available at http://0.0.0.0:{}/metrics",
        config.port
    );

    let server = tokio::spawn(serve(listener, router, coordinator.draining()));
    let drain = async move {
        match server.await {
            Ok(result) => result.map_err(|err| err.to_string()),
            Err(err) => Err(err.to_string()),
        }
    };

    let report = coordinator.run(drain, database.as_ref()).await;
    report.exit_code
}
