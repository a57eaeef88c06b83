//! Whole-row persistence for resumes. The content document is stored as one
//! JSONB column and replaced in full on every section save, guarded by the
//! `version` counter: an UPDATE that matches id but not version affects
//! zero rows and surfaces as a conflict.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::content::schema::ResumeContent;
use crate::errors::AppError;
use crate::models::resume::{ResumeRow, ResumeSummaryRow};

/// Inserts a new resume with the seeded default content at version 1.
pub async fn create_resume(
    pool: &PgPool,
    user_id: Uuid,
    title: &str,
) -> Result<ResumeRow, AppError> {
    let content = serde_json::to_value(ResumeContent::seed())
        .map_err(|e| AppError::Internal(e.into()))?;
    let row: ResumeRow = sqlx::query_as(
        r#"
        INSERT INTO resumes (id, user_id, title, content)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(title)
    .bind(content)
    .fetch_one(pool)
    .await?;
    info!("Created resume {} for user {user_id}", row.id);
    Ok(row)
}

/// Lists a user's resumes, newest first, without content blobs.
pub async fn list_resumes(pool: &PgPool, user_id: Uuid) -> Result<Vec<ResumeSummaryRow>, AppError> {
    Ok(sqlx::query_as(
        r#"
        SELECT id, title, template_id, published, avatar, version, updated_at
        FROM resumes
        WHERE user_id = $1
        ORDER BY updated_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?)
}

/// Fetches a resume by id without an ownership check (public preview path).
pub async fn fetch_resume(pool: &PgPool, id: Uuid) -> Result<ResumeRow, AppError> {
    let row: Option<ResumeRow> = sqlx::query_as("SELECT * FROM resumes WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    row.ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))
}

/// Fetches a resume and checks the caller owns it.
pub async fn fetch_owned(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<ResumeRow, AppError> {
    let row = fetch_resume(pool, id).await?;
    if row.user_id != user_id {
        return Err(AppError::Forbidden);
    }
    Ok(row)
}

/// Replaces the whole content blob, guarded by the optimistic version
/// counter. `base_version` is the version the caller read; a stale value
/// means another save landed in between and the write is rejected.
/// Returns the new version.
pub async fn put_content(
    pool: &PgPool,
    id: Uuid,
    content: &ResumeContent,
    base_version: i32,
) -> Result<i32, AppError> {
    let blob = serde_json::to_value(content).map_err(|e| AppError::Internal(e.into()))?;
    let new_version: Option<i32> = sqlx::query_scalar(
        r#"
        UPDATE resumes
        SET content = $1, version = version + 1, updated_at = now()
        WHERE id = $2 AND version = $3
        RETURNING version
        "#,
    )
    .bind(blob)
    .bind(id)
    .bind(base_version)
    .fetch_optional(pool)
    .await?;

    content_write_result(new_version, id, base_version)
}

/// Maps the outcome of the guarded UPDATE. The statement matches on both id
/// and version, so zero affected rows on an existing resume means the
/// caller's snapshot went stale between its read and this write.
fn content_write_result(
    new_version: Option<i32>,
    id: Uuid,
    base_version: i32,
) -> Result<i32, AppError> {
    new_version.ok_or_else(|| {
        AppError::Conflict(format!(
            "resume {id} was modified since version {base_version}; reload and retry"
        ))
    })
}

/// Partial metadata update: only the provided fields change.
pub async fn update_meta(
    pool: &PgPool,
    id: Uuid,
    title: Option<&str>,
    template_id: Option<i32>,
    avatar: Option<&str>,
) -> Result<ResumeRow, AppError> {
    let row: Option<ResumeRow> = sqlx::query_as(
        r#"
        UPDATE resumes
        SET title = COALESCE($2, title),
            template_id = COALESCE($3, template_id),
            avatar = COALESCE($4, avatar),
            updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(title)
    .bind(template_id)
    .bind(avatar)
    .fetch_optional(pool)
    .await?;
    row.ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))
}

pub async fn set_published(pool: &PgPool, id: Uuid, published: bool) -> Result<(), AppError> {
    sqlx::query("UPDATE resumes SET published = $2, updated_at = now() WHERE id = $1")
        .bind(id)
        .bind(published)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn delete_resume(pool: &PgPool, id: Uuid) -> Result<(), AppError> {
    sqlx::query("DELETE FROM resumes WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Deletes every resume a user owns, row by row, and returns the count.
/// Used by account deletion before the user row itself is removed.
pub async fn delete_all_for_user(pool: &PgPool, user_id: Uuid) -> Result<usize, AppError> {
    let ids: Vec<Uuid> = sqlx::query_scalar("SELECT id FROM resumes WHERE user_id = $1")
        .bind(user_id)
        .fetch_all(pool)
        .await?;
    for id in &ids {
        delete_resume(pool, *id).await?;
    }
    Ok(ids.len())
}
