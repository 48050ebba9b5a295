//! Route table for the analytics API.
//!
//! Each endpoint is registered with and without a trailing slash; existing
//! reporting clients use both forms.

use axum::{routing::get, Router};

use crate::handlers;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/theaters", get(handlers::list_theaters))
        .route("/api/theaters/", get(handlers::list_theaters))
        .route("/api/movies", get(handlers::list_movies))
        .route("/api/movies/", get(handlers::list_movies))
        .route("/api/best_theater", get(handlers::best_theater))
        .route("/api/best_theater/", get(handlers::best_theater))
        .route(
            "/api/company_sales_performance",
            get(handlers::company_sales_performance),
        )
        .route(
            "/api/company_sales_performance/",
            get(handlers::company_sales_performance),
        )
        .route("/api/health", get(handlers::health_check))
        .route("/api/health/", get(handlers::health_check))
}
