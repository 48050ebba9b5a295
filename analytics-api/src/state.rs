//! Application state for the analytics API.

use std::time::Duration;

use common::config::AppConfig;
use common::errors::AppResult;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub pool: PgPool,
}

impl AppState {
    /// Creates the application state with a lazily-connected PostgreSQL pool.
    ///
    /// The pool dials the store on first use, so the service starts even when
    /// the database is still coming up; individual queries fail with a store
    /// error until it is reachable.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
            .connect_lazy(&config.database_url)?;

        Ok(Self { config, pool })
    }
}
