use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    Json,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::auth::AuthSession;
use crate::content::form::{self, FormField};
use crate::content::render;
use crate::content::reorder::{self, Direction};
use crate::content::schema::{ResumeContent, SectionKey};
use crate::content::update::{apply_section, SectionPatch};
use crate::errors::AppError;
use crate::models::resume::{ResumeRow, ResumeSummaryRow};
use crate::resumes::store;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateResumeRequest {
    pub title: String,
}

/// POST /api/v1/resumes
pub async fn handle_create(
    State(state): State<AppState>,
    auth: AuthSession,
    Json(req): Json<CreateResumeRequest>,
) -> Result<(StatusCode, Json<ResumeRow>), AppError> {
    let title = req.title.trim();
    if title.is_empty() {
        return Err(AppError::Validation("title must not be empty".to_string()));
    }
    let row = store::create_resume(&state.db, auth.user_id, title).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/resumes
pub async fn handle_list(
    State(state): State<AppState>,
    auth: AuthSession,
) -> Result<Json<Vec<ResumeSummaryRow>>, AppError> {
    Ok(Json(store::list_resumes(&state.db, auth.user_id).await?))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeRow>, AppError> {
    Ok(Json(store::fetch_owned(&state.db, id, auth.user_id).await?))
}

#[derive(Debug, Deserialize)]
pub struct UpdateMetaRequest {
    pub title: Option<String>,
    pub template_id: Option<i32>,
    pub avatar: Option<String>,
}

/// PATCH /api/v1/resumes/:id
pub async fn handle_update_meta(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateMetaRequest>,
) -> Result<Json<ResumeRow>, AppError> {
    store::fetch_owned(&state.db, id, auth.user_id).await?;
    if let Some(title) = &req.title {
        if title.trim().is_empty() {
            return Err(AppError::Validation("title must not be empty".to_string()));
        }
    }
    let row = store::update_meta(
        &state.db,
        id,
        req.title.as_deref(),
        req.template_id,
        req.avatar.as_deref(),
    )
    .await?;
    Ok(Json(row))
}

/// DELETE /api/v1/resumes/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    store::fetch_owned(&state.db, id, auth.user_id).await?;
    store::delete_resume(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct SaveSectionRequest {
    /// The resume version the client read before editing. A stale value is
    /// rejected with CONFLICT instead of silently overwriting another tab's
    /// save.
    pub base_version: i32,
    pub data: Value,
}

#[derive(Debug, Serialize)]
pub struct SaveSectionResponse {
    pub version: i32,
}

/// PUT /api/v1/resumes/:id/sections/:key
///
/// Reads the whole current document, replaces the named section, and writes
/// the full blob back under the optimistic version guard.
pub async fn handle_save_section(
    State(state): State<AppState>,
    auth: AuthSession,
    Path((id, key)): Path<(Uuid, String)>,
    Json(req): Json<SaveSectionRequest>,
) -> Result<Json<SaveSectionResponse>, AppError> {
    let row = store::fetch_owned(&state.db, id, auth.user_id).await?;
    let patch = SectionPatch::from_key_value(&key, req.data)?;
    let current = ResumeContent::from_value(&row.content);
    let next = apply_section(&current, patch);
    let version = store::put_content(&state.db, id, &next, req.base_version).await?;
    Ok(Json(SaveSectionResponse { version }))
}

#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub base_version: i32,
    pub direction: Direction,
    /// Display position of the item to move; list sections only.
    pub index: Option<usize>,
    /// Field key of the item to move; basic section only.
    pub key: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReorderResponse {
    pub version: i32,
    /// False when the move hit a boundary and nothing changed order.
    pub moved: bool,
}

/// POST /api/v1/resumes/:id/sections/:key/reorder
///
/// Applies a move-up/move-down to one section's items and persists the
/// result. A boundary no-op still persists, because normalization may have
/// repaired gapped or duplicated sorts.
pub async fn handle_reorder(
    State(state): State<AppState>,
    auth: AuthSession,
    Path((id, key)): Path<(Uuid, String)>,
    Json(req): Json<ReorderRequest>,
) -> Result<Json<ReorderResponse>, AppError> {
    let row = store::fetch_owned(&state.db, id, auth.user_id).await?;
    let mut content = ResumeContent::from_value(&row.content);

    let section = SectionKey::parse(&key)
        .ok_or_else(|| AppError::Validation(format!("unknown section '{key}'")))?;
    let index = req.index;
    let moved = match section {
        SectionKey::Basic => {
            let field_key = req
                .key
                .ok_or_else(|| AppError::Validation("'key' is required for basic".to_string()))?;
            reorder::move_basic_field(&mut content.basic, &field_key, req.direction)
        }
        SectionKey::Education => apply_move(&mut content.education, index, req.direction)?,
        SectionKey::Job => apply_move(&mut content.job, index, req.direction)?,
        SectionKey::Project => apply_move(&mut content.project, index, req.direction)?,
        SectionKey::Skill | SectionKey::Custom => {
            return Err(AppError::Validation(format!(
                "section '{key}' is not reorderable"
            )))
        }
    };

    let version = store::put_content(&state.db, id, &content, req.base_version).await?;
    Ok(Json(ReorderResponse { version, moved }))
}

fn apply_move<T: reorder::Sortable>(
    items: &mut [T],
    index: Option<usize>,
    direction: Direction,
) -> Result<bool, AppError> {
    let index =
        index.ok_or_else(|| AppError::Validation("'index' is required".to_string()))?;
    Ok(reorder::move_item(items, index, direction))
}

/// GET /api/v1/resumes/:id/form/basic
///
/// The keyed form-state view of the basic section: registry defaults merged
/// with whatever has been saved.
pub async fn handle_basic_form(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(id): Path<Uuid>,
) -> Result<Json<IndexMap<String, FormField>>, AppError> {
    let row = store::fetch_owned(&state.db, id, auth.user_id).await?;
    let content = ResumeContent::from_value(&row.content);
    Ok(Json(form::to_form(&content.basic)))
}

/// GET /api/v1/resumes/:id/form/labels
///
/// The resolved section render order for the label-ordering editor.
pub async fn handle_label_order(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<SectionKey>>, AppError> {
    let row = store::fetch_owned(&state.db, id, auth.user_id).await?;
    let content = ResumeContent::from_value(&row.content);
    Ok(Json(render::section_order(&content.meta.label_sort)))
}

#[derive(Debug, Deserialize)]
pub struct PublishRequest {
    pub published: bool,
}

/// POST /api/v1/resumes/:id/publish
pub async fn handle_publish(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(id): Path<Uuid>,
    Json(req): Json<PublishRequest>,
) -> Result<StatusCode, AppError> {
    store::fetch_owned(&state.db, id, auth.user_id).await?;
    store::set_published(&state.db, id, req.published).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/preview/:id
///
/// Public, read-only preview. Unpublished resumes fail with NOT_PUBLISHED
/// rather than returning content.
pub async fn handle_preview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    let row = store::fetch_resume(&state.db, id).await?;
    if !row.published {
        return Err(AppError::NotPublished);
    }
    let content = ResumeContent::from_value(&row.content);
    let rendered = render::render(&content, row.template_id);
    let avatar = content.meta.avatar.as_deref().or(row.avatar.as_deref());
    Ok(Html(render::to_html(&row.title, avatar, &rendered)))
}

/// GET /api/v1/templates
pub async fn handle_list_templates() -> Json<&'static [render::Template]> {
    Json(render::TEMPLATES)
}
