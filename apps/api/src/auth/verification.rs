//! Short-lived email verification codes in Redis. Delivery is out of scope:
//! codes are logged at issue time instead of mailed.

use rand::Rng;
use redis::{AsyncCommands, Client as RedisClient};
use tracing::info;

use crate::errors::AppError;

const VERIFY_PREFIX: &str = "verify:";

/// Issues a six-digit code for an email address, replacing any previous
/// outstanding code, and returns it.
pub async fn issue_code(
    redis: &RedisClient,
    email: &str,
    ttl_secs: u64,
) -> Result<String, AppError> {
    let code = format!("{:06}", rand::thread_rng().gen_range(0..1_000_000));
    let mut conn = redis.get_multiplexed_async_connection().await?;
    conn.set_ex::<_, _, ()>(format!("{VERIFY_PREFIX}{email}"), code.clone(), ttl_secs)
        .await?;
    info!("Issued verification code for {email}: {code}");
    Ok(code)
}

/// Checks a submitted code against the outstanding one. A correct code is
/// consumed; a wrong or expired code leaves any outstanding code in place.
pub async fn check_code(redis: &RedisClient, email: &str, code: &str) -> Result<bool, AppError> {
    let key = format!("{VERIFY_PREFIX}{email}");
    let mut conn = redis.get_multiplexed_async_connection().await?;
    let stored: Option<String> = conn.get(&key).await?;
    match stored {
        Some(expected) if expected == code => {
            conn.del::<_, ()>(&key).await?;
            Ok(true)
        }
        _ => Ok(false),
    }
}
