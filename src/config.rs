use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Maximum size of the Postgres connection pool.
    pub db_max_connections: u32,
    pub server_host: String,
    pub server_port: u16,
    /// Base URL of the upstream reading producer. The polling task is only
    /// spawned when this is set.
    pub upstream_base_url: Option<String>,
    /// Upstream polling interval in seconds.
    pub poll_interval_secs: u64,
    /// Per-request timeout against the upstream producer, in seconds.
    pub upstream_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            db_max_connections: optional("DB_MAX_CONNECTIONS", "10")
                .parse()
                .context("DB_MAX_CONNECTIONS must be a positive integer")?,
            server_host: optional("SERVER_HOST", "0.0.0.0"),
            server_port: optional("SERVER_PORT", "8080")
                .parse()
                .context("SERVER_PORT must be a valid port number")?,
            upstream_base_url: std::env::var("UPSTREAM_BASE_URL")
                .ok()
                .filter(|s| !s.is_empty()),
            poll_interval_secs: optional("POLL_INTERVAL_SECS", "60")
                .parse()
                .context("POLL_INTERVAL_SECS must be a positive integer")?,
            upstream_timeout_secs: optional("UPSTREAM_TIMEOUT_SECS", "10")
                .parse()
                .context("UPSTREAM_TIMEOUT_SECS must be a positive integer")?,
        })
    }
}

fn required(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("missing required env var: {key}"))
}

fn optional(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}
