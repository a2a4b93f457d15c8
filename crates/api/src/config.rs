use perfectme_core::calendar::DayClock;

use crate::auth::jwt::JwtConfig;
use crate::background::auto_close::DEFAULT_SWEEP_INTERVAL;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Upper bound on pooled database connections (default: `10`).
    pub database_max_connections: u32,
    /// Calendar used to resolve "today" and "yesterday".
    pub clock: DayClock,
    /// Seconds between auto-close sweeps (default: `3600`).
    pub auto_close_interval_secs: u64,
    /// JWT token configuration.
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                       | Default                 |
    /// |-------------------------------|-------------------------|
    /// | `HOST`                        | `0.0.0.0`               |
    /// | `PORT`                        | `3000`                  |
    /// | `CORS_ORIGINS`                | `http://localhost:3001` |
    /// | `REQUEST_TIMEOUT_SECS`        | `30`                    |
    /// | `DATABASE_MAX_CONNECTIONS`    | `10`                    |
    /// | `DAY_BOUNDARY_OFFSET_MINUTES` | `0`                     |
    /// | `AUTO_CLOSE_INTERVAL_SECS`    | `3600`                  |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3001".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let database_max_connections: u32 = std::env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| perfectme_db::DEFAULT_MAX_CONNECTIONS.to_string())
            .parse()
            .expect("DATABASE_MAX_CONNECTIONS must be a valid u32");

        let offset_minutes: i32 = std::env::var("DAY_BOUNDARY_OFFSET_MINUTES")
            .unwrap_or_else(|_| "0".into())
            .parse()
            .expect("DAY_BOUNDARY_OFFSET_MINUTES must be a valid i32");
        let clock = DayClock::with_offset_minutes(offset_minutes)
            .unwrap_or_else(|e| panic!("Invalid DAY_BOUNDARY_OFFSET_MINUTES: {e}"));

        let auto_close_interval_secs: u64 = std::env::var("AUTO_CLOSE_INTERVAL_SECS")
            .unwrap_or_else(|_| DEFAULT_SWEEP_INTERVAL.as_secs().to_string())
            .parse()
            .expect("AUTO_CLOSE_INTERVAL_SECS must be a valid u64");
        assert!(
            auto_close_interval_secs > 0,
            "AUTO_CLOSE_INTERVAL_SECS must be greater than zero"
        );

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database_max_connections,
            clock,
            auto_close_interval_secs,
            jwt,
        }
    }
}
