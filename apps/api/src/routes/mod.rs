pub mod health;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::auth::handlers as auth;
use crate::resumes::handlers as resumes;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth API
        .route("/api/v1/auth/register", post(auth::handle_register))
        .route("/api/v1/auth/verify", post(auth::handle_verify_email))
        .route("/api/v1/auth/login", post(auth::handle_login))
        .route("/api/v1/auth/logout", post(auth::handle_logout))
        .route("/api/v1/auth/me", get(auth::handle_me))
        .route("/api/v1/auth/account", delete(auth::handle_delete_account))
        // Resume API
        .route(
            "/api/v1/resumes",
            post(resumes::handle_create).get(resumes::handle_list),
        )
        .route(
            "/api/v1/resumes/:id",
            get(resumes::handle_get)
                .patch(resumes::handle_update_meta)
                .delete(resumes::handle_delete),
        )
        .route(
            "/api/v1/resumes/:id/sections/:key",
            put(resumes::handle_save_section),
        )
        .route(
            "/api/v1/resumes/:id/sections/:key/reorder",
            post(resumes::handle_reorder),
        )
        .route(
            "/api/v1/resumes/:id/form/basic",
            get(resumes::handle_basic_form),
        )
        .route(
            "/api/v1/resumes/:id/form/labels",
            get(resumes::handle_label_order),
        )
        .route("/api/v1/resumes/:id/publish", post(resumes::handle_publish))
        .route("/api/v1/templates", get(resumes::handle_list_templates))
        // Public preview (no auth)
        .route("/api/v1/preview/:id", get(resumes::handle_preview))
        .with_state(state)
}
