use crate::model::repo::ResourceTyped;
use crate::model::{ModelManager, error::DatabaseResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

/// Percentage of `completed` over `total`, rounded to two decimals.
///
/// A course without lectures is 0% complete.
pub fn completion_percentage(completed: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    let percentage = completed as f64 / total as f64 * 100.0;
    (percentage * 100.0).round() / 100.0
}

/// Cached per-course rollup of a student's lecture progress.
///
/// Only [`CourseProgress::apply_counts`] touches the counters, and only the
/// tracker's recompute path calls it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct CourseProgress {
    id: Uuid,
    student_id: Uuid,
    course_id: Uuid,
    completed_lectures: i64,
    total_lectures: i64,
    progress_percentage: f64,
    last_accessed: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl ResourceTyped for CourseProgress {
    fn get_resource_type() -> crate::model::ResourceType {
        crate::model::ResourceType::CourseProgress
    }
}

impl CourseProgress {
    pub fn new(student_id: Uuid, course_id: Uuid, total_lectures: i64, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            student_id,
            course_id,
            completed_lectures: 0,
            total_lectures,
            progress_percentage: 0.0,
            last_accessed: now,
            created_at: now,
        }
    }

    pub(crate) fn apply_counts(&mut self, completed: i64, total: i64, now: DateTime<Utc>) {
        self.completed_lectures = completed;
        self.total_lectures = total;
        self.progress_percentage = completion_percentage(completed, total);
        self.last_accessed = now;
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn student_id(&self) -> Uuid {
        self.student_id
    }

    pub fn course_id(&self) -> Uuid {
        self.course_id
    }

    pub fn completed_lectures(&self) -> i64 {
        self.completed_lectures
    }

    pub fn total_lectures(&self) -> i64 {
        self.total_lectures
    }

    pub fn progress_percentage(&self) -> f64 {
        self.progress_percentage
    }

    pub fn last_accessed(&self) -> DateTime<Utc> {
        self.last_accessed
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_completed(&self) -> bool {
        self.progress_percentage >= 100.0
    }
}

// Queries

impl CourseProgress {
    pub async fn find(
        mm: &ModelManager,
        student_id: Uuid,
        course_id: Uuid,
    ) -> DatabaseResult<Option<Self>> {
        let row = sqlx::query_as(
            "SELECT * FROM course_progress WHERE student_id = $1 AND course_id = $2",
        )
        .bind(student_id)
        .bind(course_id)
        .fetch_optional(mm.executor())
        .await?;

        Ok(row)
    }

    pub async fn upsert(mm: &ModelManager, progress: &Self) -> DatabaseResult<Self> {
        let row = sqlx::query_as(
            r#"
            INSERT INTO course_progress
                (id, student_id, course_id, completed_lectures, total_lectures,
                 progress_percentage, last_accessed, created_at)
            VALUES ($1,$2,$3,$4,$5,$6,$7,$8)
            ON CONFLICT (student_id, course_id) DO UPDATE SET
                completed_lectures = EXCLUDED.completed_lectures,
                total_lectures = EXCLUDED.total_lectures,
                progress_percentage = EXCLUDED.progress_percentage,
                last_accessed = EXCLUDED.last_accessed
            RETURNING *
            "#,
        )
        .bind(progress.id)
        .bind(progress.student_id)
        .bind(progress.course_id)
        .bind(progress.completed_lectures)
        .bind(progress.total_lectures)
        .bind(progress.progress_percentage)
        .bind(progress.last_accessed)
        .bind(progress.created_at)
        .fetch_one(mm.executor())
        .await?;

        Ok(row)
    }

    pub async fn list_for_student(mm: &ModelManager, student_id: Uuid) -> DatabaseResult<Vec<Self>> {
        let rows = sqlx::query_as(
            "SELECT * FROM course_progress WHERE student_id = $1 ORDER BY last_accessed DESC",
        )
        .bind(student_id)
        .fetch_all(mm.executor())
        .await?;

        Ok(rows)
    }

    pub async fn students_in_course(mm: &ModelManager, course_id: Uuid) -> DatabaseResult<Vec<Uuid>> {
        let rows = sqlx::query_scalar("SELECT student_id FROM course_progress WHERE course_id = $1")
            .bind(course_id)
            .fetch_all(mm.executor())
            .await?;

        Ok(rows)
    }
}
