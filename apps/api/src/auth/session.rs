//! Login sessions: random bearer tokens mapped to user ids in Redis with a
//! TTL. Redis expiry is the only logout-by-timeout mechanism; explicit
//! logout deletes the key.

use redis::{AsyncCommands, Client as RedisClient};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;

const SESSION_PREFIX: &str = "session:";

/// Creates a session for a user and returns the bearer token.
pub async fn create_session(
    redis: &RedisClient,
    user_id: Uuid,
    ttl_secs: u64,
) -> Result<String, AppError> {
    let token = Uuid::new_v4().to_string();
    let mut conn = redis.get_multiplexed_async_connection().await?;
    conn.set_ex::<_, _, ()>(format!("{SESSION_PREFIX}{token}"), user_id.to_string(), ttl_secs)
        .await?;
    info!("Created session for user {user_id}");
    Ok(token)
}

/// Resolves a bearer token to a user id. Returns `None` for unknown or
/// expired tokens, and for stored values that fail to parse as a UUID.
pub async fn resolve_session(redis: &RedisClient, token: &str) -> Result<Option<Uuid>, AppError> {
    let mut conn = redis.get_multiplexed_async_connection().await?;
    let value: Option<String> = conn.get(format!("{SESSION_PREFIX}{token}")).await?;
    Ok(value.and_then(|v| Uuid::parse_str(&v).ok()))
}

/// Deletes a session token. Deleting an already-expired token is a no-op.
pub async fn destroy_session(redis: &RedisClient, token: &str) -> Result<(), AppError> {
    let mut conn = redis.get_multiplexed_async_connection().await?;
    conn.del::<_, ()>(format!("{SESSION_PREFIX}{token}")).await?;
    Ok(())
}
