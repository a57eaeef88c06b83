pub mod handlers;
pub mod password;
pub mod session;
pub mod verification;

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

use crate::errors::AppError;
use crate::state::AppState;

/// Extractor resolving the `Authorization: Bearer <token>` header to the
/// logged-in user via the Redis session store. Handlers that take this
/// extractor reject unauthenticated requests before running.
pub struct AuthSession {
    pub user_id: uuid::Uuid,
    pub token: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthorized)?;
        let token = header
            .strip_prefix("Bearer ")
            .ok_or(AppError::Unauthorized)?;

        let user_id = session::resolve_session(&state.redis, token)
            .await?
            .ok_or(AppError::Unauthorized)?;

        Ok(AuthSession {
            user_id,
            token: token.to_string(),
        })
    }
}
