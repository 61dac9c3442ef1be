use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::model::entity::{CourseProgress, LectureProgress};

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct LectureProgressResponse {
    id: Uuid,
    lecture_id: Uuid,
    is_completed: bool,
    completed_at: Option<DateTime<Utc>>,
    /// Seconds
    watch_time: i32,
    updated_at: DateTime<Utc>,
}

impl From<LectureProgress> for LectureProgressResponse {
    fn from(progress: LectureProgress) -> Self {
        Self {
            id: progress.id(),
            lecture_id: progress.lecture_id(),
            is_completed: progress.is_completed(),
            completed_at: progress.completed_at(),
            watch_time: progress.watch_time(),
            updated_at: progress.updated_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct CourseProgressResponse {
    course_id: Uuid,
    completed_lectures: i64,
    total_lectures: i64,
    progress_percentage: f64,
    is_completed: bool,
    last_accessed: DateTime<Utc>,
}

impl From<CourseProgress> for CourseProgressResponse {
    fn from(progress: CourseProgress) -> Self {
        Self {
            course_id: progress.course_id(),
            completed_lectures: progress.completed_lectures(),
            total_lectures: progress.total_lectures(),
            progress_percentage: progress.progress_percentage(),
            is_completed: progress.is_completed(),
            last_accessed: progress.last_accessed(),
        }
    }
}
