use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// A resume row. `content` is the whole `ResumeContent` document stored as
/// one JSONB blob; `version` is the optimistic-concurrency counter bumped on
/// every content write.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub template_id: i32,
    pub published: bool,
    pub avatar: Option<String>,
    pub content: Value,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Listing view of a resume: metadata only, without the content blob.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ResumeSummaryRow {
    pub id: Uuid,
    pub title: String,
    pub template_id: i32,
    pub published: bool,
    pub avatar: Option<String>,
    pub version: i32,
    pub updated_at: DateTime<Utc>,
}
