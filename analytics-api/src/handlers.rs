//! HTTP handlers for the analytics endpoints.
//!
//! Parameter validation happens here, before any query runs; the exact error
//! strings are part of the API contract and consumed by reporting clients.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use common::errors::{AppError, AppResult};
use common::models::{BestTheater, CompanyPerformance, Movie, Theater};

use crate::service::AnalyticsService;
use crate::state::AppState;

const MISSING_DATE_MSG: &str = "Please provide a sale_date parameter (YYYY-MM-DD).";
const INVALID_DATE_MSG: &str = "Invalid date format. Date should be of type YYYY-MM-DD";
const NO_DATE_DATA_MSG: &str = "No data found for the given date.";
const MISSING_COMPANY_MSG: &str = "Please provide a company parameter.";
const NO_COMPANY_DATA_MSG: &str = "No sales data found for the given company.";

/// Query parameters of the best-theater endpoint.
#[derive(Debug, Deserialize)]
pub struct BestTheaterParams {
    sale_date: Option<String>,
}

/// Query parameters of the company performance endpoint.
#[derive(Debug, Deserialize)]
pub struct CompanyParams {
    company: Option<String>,
}

/// List all theaters, ascending by id.
#[utoipa::path(
    get,
    path = "/api/theaters",
    tag = "theaters",
    responses(
        (status = 200, description = "All theaters", body = Vec<Theater>),
        (status = 500, description = "Store failure")
    )
)]
pub async fn list_theaters(State(state): State<AppState>) -> AppResult<Json<Vec<Theater>>> {
    let service = AnalyticsService::new(state.pool.clone(), state.config.ticket_price);
    Ok(Json(service.list_theaters().await?))
}

/// List all movies, ascending by id.
#[utoipa::path(
    get,
    path = "/api/movies",
    tag = "movies",
    responses(
        (status = 200, description = "All movies", body = Vec<Movie>),
        (status = 500, description = "Store failure")
    )
)]
pub async fn list_movies(State(state): State<AppState>) -> AppResult<Json<Vec<Movie>>> {
    let service = AnalyticsService::new(state.pool.clone(), state.config.ticket_price);
    Ok(Json(service.list_movies().await?))
}

/// Best-performing theater on a given sale date.
#[utoipa::path(
    get,
    path = "/api/best_theater",
    tag = "sales",
    params(
        ("sale_date" = String, Query, description = "Sale date in YYYY-MM-DD form")
    ),
    responses(
        (status = 200, description = "Top theater for the date", body = BestTheater),
        (status = 400, description = "Missing or malformed sale_date"),
        (status = 404, description = "No tickets sold on the date")
    )
)]
pub async fn best_theater(
    State(state): State<AppState>,
    Query(params): Query<BestTheaterParams>,
) -> AppResult<Json<BestTheater>> {
    let raw = params
        .sale_date
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::MissingParameter(MISSING_DATE_MSG.to_string()))?;
    let sale_date = parse_sale_date(&raw)?;

    let service = AnalyticsService::new(state.pool.clone(), state.config.ticket_price);
    match service.best_theater(sale_date).await? {
        Some(best) => Ok(Json(best)),
        None => Err(AppError::NotFound(NO_DATE_DATA_MSG.to_string())),
    }
}

/// Per-theater monthly sales of a company over the trailing six months.
#[utoipa::path(
    get,
    path = "/api/company_sales_performance",
    tag = "sales",
    params(
        ("company" = String, Query, description = "Exact company name")
    ),
    responses(
        (status = 200, description = "One report entry per theater", body = Vec<CompanyPerformance>),
        (status = 400, description = "Missing company parameter"),
        (status = 404, description = "No sales for the company in the window"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn company_sales_performance(
    State(state): State<AppState>,
    Query(params): Query<CompanyParams>,
) -> AppResult<Json<Vec<CompanyPerformance>>> {
    let company = params
        .company
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::MissingParameter(MISSING_COMPANY_MSG.to_string()))?;

    let service = AnalyticsService::new(state.pool.clone(), state.config.ticket_price);
    let reports = service.company_performance(&company).await?;
    if reports.is_empty() {
        return Err(AppError::NotFound(NO_COMPANY_DATA_MSG.to_string()));
    }
    Ok(Json(reports))
}

/// Health check endpoint.
///
/// Always 200 when the process is up; `db_time` is null when the store is
/// unreachable, so probes can tell process health from store health.
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is running", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let service = AnalyticsService::new(state.pool.clone(), state.config.ticket_price);
    let db_time = service.db_time().await.ok();

    Json(HealthResponse {
        status: "healthy".to_string(),
        service: state.config.service_name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
        db_time,
    })
}

/// Health check response.
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service name.
    pub service: String,
    /// Service version.
    pub version: String,
    /// Current timestamp.
    pub timestamp: DateTime<Utc>,
    /// Store timestamp, null when the store is unreachable.
    pub db_time: Option<DateTime<Utc>>,
}

fn parse_sale_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::InvalidParameter(INVALID_DATE_MSG.to_string()))
}
