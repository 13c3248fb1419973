use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// The parts of a lesson row the access check needs.
///
/// `storage_key` is the permanent object path and must never leave the server.
#[derive(Debug, Clone, FromRow)]
pub struct LessonRecord {
    pub id: Uuid,
    pub course_id: Uuid,
    pub storage_key: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoUrlRequest {
    #[schema(example = "4b6f3a52-8f4e-4c1e-9d0c-2d1f6a0b9e11")]
    pub lesson_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoUrlResponse {
    pub signed_url: String,
    pub expires_at: DateTime<Utc>,
    /// Seconds until `signed_url` stops working.
    pub expires_in: u64,
}
