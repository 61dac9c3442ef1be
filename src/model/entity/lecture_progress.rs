use crate::model::repo::ResourceTyped;
use crate::model::{ModelManager, error::DatabaseResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

/// One student's state on one lecture.
///
/// `is_completed`, `completed_at` and `watch_time` move together: a completed
/// record carries a timestamp and the full lecture duration, an incomplete one
/// carries neither. Partial playback is not tracked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct LectureProgress {
    id: Uuid,
    student_id: Uuid,
    lecture_id: Uuid,
    is_completed: bool,
    completed_at: Option<DateTime<Utc>>,
    /// Seconds
    watch_time: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ResourceTyped for LectureProgress {
    fn get_resource_type() -> crate::model::ResourceType {
        crate::model::ResourceType::LectureProgress
    }
}

impl LectureProgress {
    pub fn new(student_id: Uuid, lecture_id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            student_id,
            lecture_id,
            is_completed: false,
            completed_at: None,
            watch_time: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn mark_complete(&mut self, lecture_duration: i32, now: DateTime<Utc>) {
        self.is_completed = true;
        self.completed_at = Some(now);
        self.watch_time = lecture_duration.max(0);
        self.updated_at = now;
    }

    pub fn mark_incomplete(&mut self, now: DateTime<Utc>) {
        self.is_completed = false;
        self.completed_at = None;
        self.watch_time = 0;
        self.updated_at = now;
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn student_id(&self) -> Uuid {
        self.student_id
    }

    pub fn lecture_id(&self) -> Uuid {
        self.lecture_id
    }

    pub fn is_completed(&self) -> bool {
        self.is_completed
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    pub fn watch_time(&self) -> i32 {
        self.watch_time
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

// Queries

impl LectureProgress {
    pub async fn find(
        mm: &ModelManager,
        student_id: Uuid,
        lecture_id: Uuid,
    ) -> DatabaseResult<Option<Self>> {
        let row = sqlx::query_as(
            "SELECT * FROM lecture_progress WHERE student_id = $1 AND lecture_id = $2",
        )
        .bind(student_id)
        .bind(lecture_id)
        .fetch_optional(mm.executor())
        .await?;

        Ok(row)
    }

    /// Inserts the record unless one already exists for (student, lecture).
    pub async fn insert_if_absent(mm: &ModelManager, progress: &Self) -> DatabaseResult<Option<Self>> {
        let row = sqlx::query_as(
            r#"
            INSERT INTO lecture_progress
                (id, student_id, lecture_id, is_completed, completed_at, watch_time, created_at, updated_at)
            VALUES ($1,$2,$3,$4,$5,$6,$7,$8)
            ON CONFLICT (student_id, lecture_id) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(progress.id)
        .bind(progress.student_id)
        .bind(progress.lecture_id)
        .bind(progress.is_completed)
        .bind(progress.completed_at)
        .bind(progress.watch_time)
        .bind(progress.created_at)
        .bind(progress.updated_at)
        .fetch_optional(mm.executor())
        .await?;

        Ok(row)
    }

    /// Writes the completion state, keyed by (student, lecture) so a concurrent
    /// first write turns into an update instead of a duplicate-key failure.
    pub async fn upsert(mm: &ModelManager, progress: &Self) -> DatabaseResult<Self> {
        let row = sqlx::query_as(
            r#"
            INSERT INTO lecture_progress
                (id, student_id, lecture_id, is_completed, completed_at, watch_time, created_at, updated_at)
            VALUES ($1,$2,$3,$4,$5,$6,$7,$8)
            ON CONFLICT (student_id, lecture_id) DO UPDATE SET
                is_completed = EXCLUDED.is_completed,
                completed_at = EXCLUDED.completed_at,
                watch_time = EXCLUDED.watch_time,
                updated_at = EXCLUDED.updated_at
            RETURNING *
            "#,
        )
        .bind(progress.id)
        .bind(progress.student_id)
        .bind(progress.lecture_id)
        .bind(progress.is_completed)
        .bind(progress.completed_at)
        .bind(progress.watch_time)
        .bind(progress.created_at)
        .bind(progress.updated_at)
        .fetch_one(mm.executor())
        .await?;

        Ok(row)
    }

    pub async fn delete_for(mm: &ModelManager, student_id: Uuid, lecture_id: Uuid) -> DatabaseResult<bool> {
        let result = sqlx::query("DELETE FROM lecture_progress WHERE student_id = $1 AND lecture_id = $2")
            .bind(student_id)
            .bind(lecture_id)
            .execute(mm.executor())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_in_course(
        mm: &ModelManager,
        student_id: Uuid,
        course_id: Uuid,
    ) -> DatabaseResult<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM lecture_progress lp
            USING lectures l, sections s
            WHERE lp.lecture_id = l.id
              AND l.section_id = s.id
              AND lp.student_id = $1
              AND s.course_id = $2
            "#,
        )
        .bind(student_id)
        .bind(course_id)
        .execute(mm.executor())
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn count_completed(
        mm: &ModelManager,
        student_id: Uuid,
        course_id: Uuid,
    ) -> DatabaseResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM lecture_progress lp
            JOIN lectures l ON l.id = lp.lecture_id
            JOIN sections s ON s.id = l.section_id
            WHERE lp.student_id = $1
              AND s.course_id = $2
              AND lp.is_completed = TRUE
            "#,
        )
        .bind(student_id)
        .bind(course_id)
        .fetch_one(mm.executor())
        .await?;

        Ok(count)
    }
}
