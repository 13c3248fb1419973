//! Read access to the course catalog: lessons, course ownership,
//! delegated instructors and enrollments.

mod sqlite;

pub use sqlite::SqliteCatalog;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::lesson::LessonRecord;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog query failed: {0}")]
    Database(#[from] sqlx::Error),
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait LessonCatalog: Send + Sync {
    async fn find_lesson(&self, lesson_id: Uuid) -> Result<Option<LessonRecord>, CatalogError>;

    /// Primary owner of a course, `None` when the course does not exist.
    async fn course_owner(&self, course_id: Uuid) -> Result<Option<Uuid>, CatalogError>;

    async fn is_enrolled(&self, course_id: Uuid, user_id: Uuid) -> Result<bool, CatalogError>;

    async fn is_assigned_instructor(&self, course_id: Uuid, user_id: Uuid) -> Result<bool, CatalogError>;
}
