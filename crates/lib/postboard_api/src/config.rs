//! API server configuration.

use crate::services::auth::resolve_jwt_secret;

/// Host used when `BIND_ADDR` is unset.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Port used when neither `BIND_ADDR` nor `PORT` is set.
pub const DEFAULT_PORT: u16 = 3000;

/// Default pool size when `DB_MAX_CONNECTIONS` is unset or invalid.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:3000").
    pub bind_addr: String,
    /// PostgreSQL connection URL.
    pub pg_connection_url: String,
    /// JWT signing secret.
    pub jwt_secret: String,
    /// Upper bound of the store connection pool.
    pub max_connections: u32,
}

impl ApiConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable             | Default                                  |
    /// |----------------------|------------------------------------------|
    /// | `BIND_ADDR`          | `127.0.0.1:$PORT`                        |
    /// | `PORT`               | `3000`                                   |
    /// | `DATABASE_URL`       | `postgres://localhost:5432/postboard`    |
    /// | `DB_MAX_CONNECTIONS` | `5`                                      |
    /// | `JWT_SECRET`         | generated & persisted to file            |
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| {
                let port = std::env::var("PORT")
                    .ok()
                    .and_then(|p| p.parse::<u16>().ok())
                    .unwrap_or(DEFAULT_PORT);
                format!("{DEFAULT_HOST}:{port}")
            }),
            pg_connection_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost:5432/postboard".into()),
            jwt_secret: resolve_jwt_secret(),
            max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_CONNECTIONS),
        }
    }
}
