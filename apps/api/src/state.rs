use redis::Client as RedisClient;
use sqlx::PgPool;

use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Client handles are constructed once at bootstrap and passed in explicitly;
/// nothing here is a process-global singleton.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Redis holds session tokens and short-lived email verification codes.
    pub redis: RedisClient,
    pub config: Config,
}
