//! Seams between the progress tracker and whatever holds the rows.
//!
//! `ModelManager` implements all three traits against Postgres.

use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use crate::model::{
    DatabaseResult, ModelManager,
    entity::{CourseProgress, Enrollment, Lecture, LectureProgress},
};

/// The catalog facts the tracker needs about a lecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct LectureInfo {
    pub id: Uuid,
    pub section_id: Uuid,
    pub course_id: Uuid,
    /// Seconds
    pub duration: i32,
}

#[async_trait]
pub trait LectureCatalog: Send + Sync {
    async fn get_lecture(&self, lecture_id: Uuid) -> DatabaseResult<Option<LectureInfo>>;

    async fn count_lectures_in_course(&self, course_id: Uuid) -> DatabaseResult<i64>;

    /// Removes the lecture; its progress rows go with it.
    async fn delete_lecture(&self, lecture_id: Uuid) -> DatabaseResult<bool>;
}

#[async_trait]
pub trait EnrollmentGate: Send + Sync {
    async fn is_actively_enrolled(&self, student_id: Uuid, course_id: Uuid) -> DatabaseResult<bool>;

    async fn remove_enrollment(&self, student_id: Uuid, course_id: Uuid) -> DatabaseResult<bool>;
}

#[async_trait]
pub trait ProgressStore: Send + Sync {
    async fn find_lecture_progress(
        &self,
        student_id: Uuid,
        lecture_id: Uuid,
    ) -> DatabaseResult<Option<LectureProgress>>;

    /// Returns `None` when a record for (student, lecture) already exists.
    async fn insert_lecture_progress(
        &self,
        progress: &LectureProgress,
    ) -> DatabaseResult<Option<LectureProgress>>;

    async fn upsert_lecture_progress(&self, progress: &LectureProgress) -> DatabaseResult<LectureProgress>;

    async fn delete_lecture_progress(&self, student_id: Uuid, lecture_id: Uuid) -> DatabaseResult<bool>;

    async fn delete_course_lecture_progress(
        &self,
        student_id: Uuid,
        course_id: Uuid,
    ) -> DatabaseResult<u64>;

    async fn count_completed_lectures(&self, student_id: Uuid, course_id: Uuid) -> DatabaseResult<i64>;

    async fn find_course_progress(
        &self,
        student_id: Uuid,
        course_id: Uuid,
    ) -> DatabaseResult<Option<CourseProgress>>;

    async fn upsert_course_progress(&self, progress: &CourseProgress) -> DatabaseResult<CourseProgress>;

    /// Most recently touched first.
    async fn list_course_progress(&self, student_id: Uuid) -> DatabaseResult<Vec<CourseProgress>>;

    async fn students_with_course_progress(&self, course_id: Uuid) -> DatabaseResult<Vec<Uuid>>;
}

#[async_trait]
impl LectureCatalog for ModelManager {
    async fn get_lecture(&self, lecture_id: Uuid) -> DatabaseResult<Option<LectureInfo>> {
        Lecture::find_info(self, lecture_id).await
    }

    async fn count_lectures_in_course(&self, course_id: Uuid) -> DatabaseResult<i64> {
        Lecture::count_in_course(self, course_id).await
    }

    async fn delete_lecture(&self, lecture_id: Uuid) -> DatabaseResult<bool> {
        Lecture::delete_by_id(self, lecture_id).await
    }
}

#[async_trait]
impl EnrollmentGate for ModelManager {
    async fn is_actively_enrolled(&self, student_id: Uuid, course_id: Uuid) -> DatabaseResult<bool> {
        Enrollment::is_active_for(self, student_id, course_id).await
    }

    async fn remove_enrollment(&self, student_id: Uuid, course_id: Uuid) -> DatabaseResult<bool> {
        Enrollment::remove(self, student_id, course_id).await
    }
}

#[async_trait]
impl ProgressStore for ModelManager {
    async fn find_lecture_progress(
        &self,
        student_id: Uuid,
        lecture_id: Uuid,
    ) -> DatabaseResult<Option<LectureProgress>> {
        LectureProgress::find(self, student_id, lecture_id).await
    }

    async fn insert_lecture_progress(
        &self,
        progress: &LectureProgress,
    ) -> DatabaseResult<Option<LectureProgress>> {
        LectureProgress::insert_if_absent(self, progress).await
    }

    async fn upsert_lecture_progress(&self, progress: &LectureProgress) -> DatabaseResult<LectureProgress> {
        LectureProgress::upsert(self, progress).await
    }

    async fn delete_lecture_progress(&self, student_id: Uuid, lecture_id: Uuid) -> DatabaseResult<bool> {
        LectureProgress::delete_for(self, student_id, lecture_id).await
    }

    async fn delete_course_lecture_progress(
        &self,
        student_id: Uuid,
        course_id: Uuid,
    ) -> DatabaseResult<u64> {
        LectureProgress::delete_in_course(self, student_id, course_id).await
    }

    async fn count_completed_lectures(&self, student_id: Uuid, course_id: Uuid) -> DatabaseResult<i64> {
        LectureProgress::count_completed(self, student_id, course_id).await
    }

    async fn find_course_progress(
        &self,
        student_id: Uuid,
        course_id: Uuid,
    ) -> DatabaseResult<Option<CourseProgress>> {
        CourseProgress::find(self, student_id, course_id).await
    }

    async fn upsert_course_progress(&self, progress: &CourseProgress) -> DatabaseResult<CourseProgress> {
        CourseProgress::upsert(self, progress).await
    }

    async fn list_course_progress(&self, student_id: Uuid) -> DatabaseResult<Vec<CourseProgress>> {
        CourseProgress::list_for_student(self, student_id).await
    }

    async fn students_with_course_progress(&self, course_id: Uuid) -> DatabaseResult<Vec<Uuid>> {
        CourseProgress::students_in_course(self, course_id).await
    }
}
