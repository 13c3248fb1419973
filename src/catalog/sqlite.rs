use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::{CatalogError, LessonCatalog};
use crate::models::lesson::LessonRecord;

#[derive(Debug, Clone)]
pub struct SqliteCatalog {
    pool: SqlitePool,
}

impl SqliteCatalog {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LessonCatalog for SqliteCatalog {
    async fn find_lesson(&self, lesson_id: Uuid) -> Result<Option<LessonRecord>, CatalogError> {
        let lesson = sqlx::query_as::<_, LessonRecord>("SELECT id, course_id, storage_key FROM lessons WHERE id = ?")
            .bind(lesson_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(lesson)
    }

    async fn course_owner(&self, course_id: Uuid) -> Result<Option<Uuid>, CatalogError> {
        let owner = sqlx::query_scalar::<_, Uuid>("SELECT instructor_id FROM courses WHERE id = ?")
            .bind(course_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(owner)
    }

    async fn is_enrolled(&self, course_id: Uuid, user_id: Uuid) -> Result<bool, CatalogError> {
        let found: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM enrollments WHERE course_id = ? AND student_id = ?)",
        )
        .bind(course_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(found)
    }

    async fn is_assigned_instructor(&self, course_id: Uuid, user_id: Uuid) -> Result<bool, CatalogError> {
        let found: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM course_instructors WHERE course_id = ? AND instructor_id = ?)",
        )
        .bind(course_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(found)
    }
}
