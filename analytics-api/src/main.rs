//! Movie theater analytics API.
//!
//! A read-only query service over the theater ticketing database:
//! - theater and movie listings
//! - best-performing theater for a sale date
//! - trailing six-month sales performance per company

mod handlers;
mod routes;
mod service;
mod state;

use std::net::SocketAddr;

use axum::{middleware, routing::get, Json, Router};
use common::config::AppConfig;
use common::middleware::rate_limit::{rate_limit_middleware, RateLimiter};
use common::middleware::request_id::request_id_middleware;
use state::AppState;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;

const SERVICE_NAME: &str = "analytics-api";
const DEFAULT_PORT: u16 = 4000;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Theater Analytics API",
        version = "0.1.0",
        description = "Read-only movie theater sales analytics"
    ),
    paths(
        handlers::list_theaters,
        handlers::list_movies,
        handlers::best_theater,
        handlers::company_sales_performance,
        handlers::health_check,
    ),
    components(schemas(
        common::models::Theater,
        common::models::Movie,
        common::models::BestTheater,
        common::models::CompanyPerformance,
        common::models::MonthlySales,
        handlers::HealthResponse,
    )),
    tags(
        (name = "theaters", description = "Theater listing"),
        (name = "movies", description = "Movie listing"),
        (name = "sales", description = "Sales analytics"),
        (name = "health", description = "Health check")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() {
    // Load .env file (if present) before anything else
    load_dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Load configuration
    let mut config = AppConfig::load_with_service(SERVICE_NAME);
    config.port = std::env::var("SERVER_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    // Create application state (lazy PostgreSQL pool)
    let state = AppState::new(config.clone())
        .expect("Failed to initialize application state (check DATABASE_URL)");

    // Build the router
    let app = create_router(state);

    // Start the server
    let addr = format!("{}:{}", config.host, config.port);
    info!(service = SERVICE_NAME, address = %addr, "starting service");

    let listener = TcpListener::bind(&addr).await.expect("failed to bind address");
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("server failed");
}

fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let limiter = RateLimiter::new(state.config.rate_limit_per_minute);

    Router::new()
        .merge(routes::router())
        .route("/api-docs/openapi.json", get(openapi_json))
        .layer(middleware::from_fn_with_state(limiter, rate_limit_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Load .env file from the working directory (best-effort, no error if missing).
fn load_dotenv() {
    let env_path = std::path::Path::new(".env");
    if env_path.exists() {
        if let Ok(content) = std::fs::read_to_string(env_path) {
            for line in content.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                if let Some((key, value)) = line.split_once('=') {
                    let key = key.trim();
                    let value = value.trim();
                    // Only set if not already set by the environment
                    if std::env::var(key).is_err() {
                        std::env::set_var(key, value);
                    }
                }
            }
        }
    }
}
