//! HTTP endpoint server using Axum

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{from_fn, from_fn_with_state, Next},
    response::{Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{warn, Level};

use crate::config::{Config, Environment};
use crate::db::ConnectionProbe;
use crate::error::{ApiError, AppError};
use crate::metrics::Metrics;
use crate::middleware::{
    add_security_headers, rate_limit, request_logger, translate_errors, RateLimiter,
};
use crate::models::HealthResponse;

pub const SERVICE_NAME: &str = "Storage Management API";

#[derive(Clone)]
pub struct AppState {
    pub environment: Environment,
    pub client_url: String,
    pub database: Arc<dyn ConnectionProbe>,
    pub metrics: Arc<Metrics>,
    pub rate_limiter: Arc<RateLimiter>,
}

impl AppState {
    pub fn new(config: &Config, database: Arc<dyn ConnectionProbe>, metrics: Arc<Metrics>) -> Self {
        Self {
            environment: config.environment,
            client_url: config.client_url.clone(),
            database,
            metrics,
            rate_limiter: Arc::new(RateLimiter::default()),
        }
    }

    pub fn with_rate_limiter(mut self, rate_limiter: RateLimiter) -> Self {
        self.rate_limiter = Arc::new(rate_limiter);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub message: String,
    pub version: String,
    pub status: String,
}

pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        status: "running".to_string(),
    })
}

/// Liveness: the process is up
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::liveness())
}

/// Readiness: the database is reachable
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let connected = state.database.is_connected();
    let status = if connected {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(HealthResponse::readiness(connected)))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, AppError> {
    let connected = if state.database.is_connected() { 1.0 } else { 0.0 };
    state.metrics.database_connected.set(connected);
    state
        .metrics
        .export()
        .map_err(|err| AppError::unexpected(err.to_string()))
}

pub async fn not_found() -> AppError {
    ApiError::not_found("Route not found").into()
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();

    state.metrics.http_requests_in_flight.inc();
    let response = next.run(request).await;
    state.metrics.http_requests_in_flight.dec();

    let duration = start.elapsed();
    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    response
}

fn cors_layer(client_url: &str) -> CorsLayer {
    let origin = match HeaderValue::from_str(client_url.trim_end_matches('/')) {
        Ok(origin) => AllowOrigin::exact(origin),
        Err(err) => {
            warn!(error = %err, client_url, "CLIENT_URL is not a valid origin, CORS disabled");
            AllowOrigin::list(Vec::<HeaderValue>::new())
        }
    };
    CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Routes mounted under `/api`; every request, matched or not, is rate limited
fn api_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/ready", get(readiness_check))
        .fallback(not_found)
        .layer(from_fn_with_state(state.rate_limiter.clone(), rate_limit))
}

pub fn create_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/", get(root))
        .route("/metrics", get(metrics_handler))
        .nest("/api", api_router(&state))
        .fallback(not_found)
        .layer(from_fn_with_state(state.environment, translate_errors));

    if state.environment != Environment::Test {
        router = router.layer(from_fn(request_logger));
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(from_fn_with_state(state.clone(), metrics_middleware))
                .layer(from_fn(add_security_headers))
                .layer(cors_layer(&state.client_url)),
        )
        .with_state(state)
}

/// Serve until `shutdown` resolves, then finish in-flight requests
pub async fn serve<F>(listener: TcpListener, router: Router, shutdown: F) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown)
    .await
}
