//! Service configuration.
//!
//! All settings come from environment variables with sensible defaults,
//! so the service runs out of the box against a local PostgreSQL.

/// Ticket price applied when deriving revenue from a count of sold tickets.
/// Prices are not stored per sale; this is the uniform multiplier, and it can
/// be overridden with the `TICKET_PRICE` environment variable.
pub const FIXED_TICKET_PRICE: f64 = 10.00;

/// Application configuration shared across handlers.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Service name, used in logs and health responses.
    pub service_name: String,
    /// Bind host.
    pub host: String,
    /// Bind port (services override this with `SERVER_PORT`).
    pub port: u16,
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Maximum connections in the sqlx pool.
    pub max_connections: u32,
    /// Pool acquire timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Revenue multiplier per sold ticket.
    pub ticket_price: f64,
    /// Per-client-IP request budget per minute; 0 disables rate limiting.
    pub rate_limit_per_minute: u32,
}

impl AppConfig {
    /// Loads configuration from the environment for the given service.
    pub fn load_with_service(service_name: &str) -> Self {
        Self {
            service_name: service_name.to_string(),
            host: env_or("HOST", "0.0.0.0"),
            port: env_parse_or("SERVER_PORT", 8080),
            database_url: env_or(
                "DATABASE_URL",
                "postgres://admin@localhost:5432/movie_theater_analytics",
            ),
            max_connections: env_parse_or("DB_MAX_CONNECTIONS", 10),
            connect_timeout_secs: env_parse_or("DB_CONNECT_TIMEOUT_SECS", 5),
            ticket_price: env_parse_or("TICKET_PRICE", FIXED_TICKET_PRICE),
            rate_limit_per_minute: env_parse_or("RATE_LIMIT_PER_MINUTE", 60),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = AppConfig::load_with_service("analytics-api");
        assert_eq!(config.service_name, "analytics-api");
        assert!(config.max_connections > 0);
        assert_eq!(config.ticket_price, FIXED_TICKET_PRICE);
    }

    #[test]
    fn env_parse_falls_back_on_garbage() {
        // No such variable set, so the default must come through.
        let port: u16 = env_parse_or("NONEXISTENT_TEST_PORT", 8082);
        assert_eq!(port, 8082);
    }
}
