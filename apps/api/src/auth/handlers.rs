use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::{password, session, verification, AuthSession};
use crate::errors::AppError;
use crate::models::user::UserRow;
use crate::resumes::store;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub user: UserRow,
}

/// POST /api/v1/auth/register
///
/// Creates the account, issues an email verification code, and logs the
/// user straight in.
pub async fn handle_register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let email = req.email.trim().to_lowercase();
    if !email.contains('@') {
        return Err(AppError::Validation("invalid email address".to_string()));
    }
    if req.password.len() < 8 {
        return Err(AppError::Validation(
            "password must be at least 8 characters".to_string(),
        ));
    }

    let existing: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(&state.db)
        .await?;
    if existing.is_some() {
        return Err(AppError::Validation("email is already registered".to_string()));
    }

    let password_hash = password::hash_password(&req.password)?;
    let user: UserRow = sqlx::query_as(
        "INSERT INTO users (email, password_hash) VALUES ($1, $2) RETURNING *",
    )
    .bind(&email)
    .bind(&password_hash)
    .fetch_one(&state.db)
    .await?;

    verification::issue_code(&state.redis, &email, state.config.verification_ttl_secs).await?;
    let token =
        session::create_session(&state.redis, user.id, state.config.session_ttl_secs).await?;

    info!("Registered user {}", user.id);
    Ok((StatusCode::CREATED, Json(SessionResponse { token, user })))
}

#[derive(Debug, Deserialize)]
pub struct VerifyEmailRequest {
    pub email: String,
    pub code: String,
}

/// POST /api/v1/auth/verify
pub async fn handle_verify_email(
    State(state): State<AppState>,
    Json(req): Json<VerifyEmailRequest>,
) -> Result<StatusCode, AppError> {
    let email = req.email.trim().to_lowercase();
    if !verification::check_code(&state.redis, &email, &req.code).await? {
        return Err(AppError::Validation(
            "verification code is wrong or expired".to_string(),
        ));
    }
    sqlx::query("UPDATE users SET email_verified = TRUE WHERE email = $1")
        .bind(&email)
        .execute(&state.db)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /api/v1/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let email = req.email.trim().to_lowercase();
    let user: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(&state.db)
        .await?;

    // Same rejection for unknown email and wrong password
    let user = user.ok_or(AppError::Unauthorized)?;
    if !password::verify_password(&req.password, &user.password_hash) {
        return Err(AppError::Unauthorized);
    }

    let token =
        session::create_session(&state.redis, user.id, state.config.session_ttl_secs).await?;
    Ok(Json(SessionResponse { token, user }))
}

/// POST /api/v1/auth/logout
pub async fn handle_logout(
    State(state): State<AppState>,
    auth: AuthSession,
) -> Result<StatusCode, AppError> {
    session::destroy_session(&state.redis, &auth.token).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/me
pub async fn handle_me(
    State(state): State<AppState>,
    auth: AuthSession,
) -> Result<Json<UserRow>, AppError> {
    let user: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(auth.user_id)
        .fetch_optional(&state.db)
        .await?;
    user.map(Json).ok_or(AppError::Unauthorized)
}

/// DELETE /api/v1/auth/account
///
/// Deletes every resume the user owns before deleting the user row, then
/// tears the session down.
pub async fn handle_delete_account(
    State(state): State<AppState>,
    auth: AuthSession,
) -> Result<StatusCode, AppError> {
    let deleted = store::delete_all_for_user(&state.db, auth.user_id).await?;
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(auth.user_id)
        .execute(&state.db)
        .await?;
    session::destroy_session(&state.redis, &auth.token).await?;
    info!("Deleted user {} and {deleted} resumes", auth.user_id);
    Ok(StatusCode::NO_CONTENT)
}
