//! Environment-driven configuration.

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub max_db_connections: u32,
}

impl Config {
    /// Reads configuration from the environment, loading `.env` first if
    /// one is present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let database_url =
            std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
        let max_db_connections = std::env::var("MAX_DB_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);
        Ok(Self {
            database_url,
            bind_addr: format!("0.0.0.0:{}", port),
            max_db_connections,
        })
    }
}
