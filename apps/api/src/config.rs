use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Panics at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    /// Maximum number of PostgreSQL pool connections.
    pub db_max_connections: u32,
    pub port: u16,
    pub rust_log: String,
    /// Lifetime of a login session token in Redis, in seconds.
    pub session_ttl_secs: u64,
    /// Lifetime of an email verification code in Redis, in seconds.
    pub verification_ttl_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            redis_url: require_env("REDIS_URL")?,
            db_max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse::<u32>()
                .context("DB_MAX_CONNECTIONS must be a number")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            session_ttl_secs: std::env::var("SESSION_TTL_SECS")
                .unwrap_or_else(|_| "604800".to_string()) // 7 days
                .parse::<u64>()
                .context("SESSION_TTL_SECS must be a number of seconds")?,
            verification_ttl_secs: std::env::var("VERIFICATION_TTL_SECS")
                .unwrap_or_else(|_| "600".to_string()) // 10 minutes
                .parse::<u64>()
                .context("VERIFICATION_TTL_SECS must be a number of seconds")?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
