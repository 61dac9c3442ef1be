//! Lecture progress write path and the per-course rollup it maintains.
//!
//! Every lecture progress create, update or delete is followed by a full
//! recount for the affected (student, course) pair. The recount is cache
//! maintenance: when it fails the error is logged and the mutation that
//! triggered it still succeeds. The next triggered recount repairs the
//! aggregate because it never applies deltas.

mod error;
pub use error::{ProgressError, ProgressResult};

#[cfg(test)]
mod memory;

use chrono::Utc;
use uuid::Uuid;

use crate::error::log_error;
use crate::model::{
    EnrollmentGate, LectureCatalog, LectureInfo, ProgressStore,
    entity::{CourseProgress, LectureProgress},
};

/// Whether a recompute may create the course aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecomputeMode {
    /// After a create or update: the aggregate is created on first use.
    Bootstrap,
    /// After a delete: a missing aggregate stays missing.
    UpdateOnly,
}

#[derive(Debug, Clone)]
pub struct ProgressTracker<S> {
    store: S,
}

impl<S> ProgressTracker<S>
where
    S: LectureCatalog + EnrollmentGate + ProgressStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolves the lecture and checks the enrollment gate before any write.
    async fn enrolled_lecture(&self, student_id: Uuid, lecture_id: Uuid) -> ProgressResult<LectureInfo> {
        let lecture = self
            .store
            .get_lecture(lecture_id)
            .await?
            .ok_or(ProgressError::LectureNotFound(lecture_id))?;

        if !self
            .store
            .is_actively_enrolled(student_id, lecture.course_id)
            .await?
        {
            return Err(ProgressError::NotEnrolled {
                student_id,
                course_id: lecture.course_id,
            });
        }

        Ok(lecture)
    }

    #[tracing::instrument(skip(self))]
    pub async fn mark_complete(&self, student_id: Uuid, lecture_id: Uuid) -> ProgressResult<LectureProgress> {
        let lecture = self.enrolled_lecture(student_id, lecture_id).await?;
        let now = Utc::now();

        let mut progress = self
            .store
            .find_lecture_progress(student_id, lecture_id)
            .await?
            .unwrap_or_else(|| LectureProgress::new(student_id, lecture_id, now));
        progress.mark_complete(lecture.duration, now);

        let saved = self.store.upsert_lecture_progress(&progress).await?;
        tracing::debug!(watch_time = saved.watch_time(), "lecture marked complete");

        self.trigger_recompute(student_id, lecture.course_id, RecomputeMode::Bootstrap)
            .await;
        Ok(saved)
    }

    #[tracing::instrument(skip(self))]
    pub async fn mark_incomplete(&self, student_id: Uuid, lecture_id: Uuid) -> ProgressResult<LectureProgress> {
        let lecture = self.enrolled_lecture(student_id, lecture_id).await?;

        let mut progress = self
            .store
            .find_lecture_progress(student_id, lecture_id)
            .await?
            .ok_or(ProgressError::ProgressNotFound {
                student_id,
                lecture_id,
            })?;
        progress.mark_incomplete(Utc::now());

        let saved = self.store.upsert_lecture_progress(&progress).await?;
        tracing::debug!("lecture marked incomplete");

        self.trigger_recompute(student_id, lecture.course_id, RecomputeMode::Bootstrap)
            .await;
        Ok(saved)
    }

    /// Creates an incomplete record if the student has none for this lecture.
    /// An existing record is returned untouched and no recompute fires.
    #[tracing::instrument(skip(self))]
    pub async fn start_lecture(&self, student_id: Uuid, lecture_id: Uuid) -> ProgressResult<LectureProgress> {
        let lecture = self.enrolled_lecture(student_id, lecture_id).await?;

        let fresh = LectureProgress::new(student_id, lecture_id, Utc::now());
        match self.store.insert_lecture_progress(&fresh).await? {
            Some(created) => {
                self.trigger_recompute(student_id, lecture.course_id, RecomputeMode::Bootstrap)
                    .await;
                Ok(created)
            }
            None => self
                .store
                .find_lecture_progress(student_id, lecture_id)
                .await?
                .ok_or(ProgressError::ProgressNotFound {
                    student_id,
                    lecture_id,
                }),
        }
    }

    pub async fn lecture_progress(&self, student_id: Uuid, lecture_id: Uuid) -> ProgressResult<LectureProgress> {
        self.store
            .find_lecture_progress(student_id, lecture_id)
            .await?
            .ok_or(ProgressError::ProgressNotFound {
                student_id,
                lecture_id,
            })
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, student_id: Uuid, lecture_id: Uuid) -> ProgressResult<()> {
        let lecture = self
            .store
            .get_lecture(lecture_id)
            .await?
            .ok_or(ProgressError::LectureNotFound(lecture_id))?;

        if !self
            .store
            .delete_lecture_progress(student_id, lecture_id)
            .await?
        {
            return Err(ProgressError::ProgressNotFound {
                student_id,
                lecture_id,
            });
        }

        self.trigger_recompute(student_id, lecture.course_id, RecomputeMode::UpdateOnly)
            .await;
        Ok(())
    }

    /// Deletes a lecture and its progress rows, then recounts every student
    /// holding an aggregate for the lecture's course. Returns how many
    /// aggregates were revisited.
    #[tracing::instrument(skip(self))]
    pub async fn remove_lecture(&self, lecture_id: Uuid) -> ProgressResult<usize> {
        // the course must be resolved while the lecture still exists
        let lecture = self
            .store
            .get_lecture(lecture_id)
            .await?
            .ok_or(ProgressError::LectureNotFound(lecture_id))?;

        if !self.store.delete_lecture(lecture_id).await? {
            return Err(ProgressError::LectureNotFound(lecture_id));
        }

        let students = self
            .store
            .students_with_course_progress(lecture.course_id)
            .await?;

        for student_id in &students {
            self.trigger_recompute(*student_id, lecture.course_id, RecomputeMode::UpdateOnly)
                .await;
        }

        tracing::info!(affected = students.len(), "lecture removed");
        Ok(students.len())
    }

    /// Drops the student's lecture progress in a course, then the enrollment.
    /// Returns the number of progress rows deleted.
    ///
    /// Progress goes first: while the enrollment row exists a failed call can
    /// be retried and finishes the cleanup.
    #[tracing::instrument(skip(self))]
    pub async fn unenroll(&self, student_id: Uuid, course_id: Uuid) -> ProgressResult<u64> {
        let deleted = self
            .store
            .delete_course_lecture_progress(student_id, course_id)
            .await?;

        let removed = self.store.remove_enrollment(student_id, course_id).await;

        self.trigger_recompute(student_id, course_id, RecomputeMode::UpdateOnly)
            .await;

        if !removed? {
            return Err(ProgressError::NotEnrolled {
                student_id,
                course_id,
            });
        }

        tracing::info!(deleted, "student unenrolled");
        Ok(deleted)
    }

    /// Recounts lectures and completions for (student, course) and stores the
    /// result. Returns `None` when `mode` is `UpdateOnly` and no aggregate exists.
    #[tracing::instrument(skip(self))]
    pub async fn recompute(
        &self,
        student_id: Uuid,
        course_id: Uuid,
        mode: RecomputeMode,
    ) -> ProgressResult<Option<CourseProgress>> {
        let total = self.store.count_lectures_in_course(course_id).await?;
        let now = Utc::now();

        let mut progress = match self.store.find_course_progress(student_id, course_id).await? {
            Some(progress) => progress,
            None if mode == RecomputeMode::Bootstrap => {
                CourseProgress::new(student_id, course_id, total, now)
            }
            None => {
                tracing::trace!("no course aggregate yet, nothing to refresh");
                return Ok(None);
            }
        };

        let completed = self
            .store
            .count_completed_lectures(student_id, course_id)
            .await?;

        if total == 0 {
            tracing::debug!("course has no lectures, progress pinned to zero");
        }

        progress.apply_counts(completed, total, now);
        let saved = self.store.upsert_course_progress(&progress).await?;
        tracing::debug!(
            completed = saved.completed_lectures(),
            total = saved.total_lectures(),
            percentage = saved.progress_percentage(),
            "course progress recomputed"
        );

        Ok(Some(saved))
    }

    async fn trigger_recompute(&self, student_id: Uuid, course_id: Uuid, mode: RecomputeMode) {
        if let Err(e) = self.recompute(student_id, course_id, mode).await {
            tracing::warn!(%student_id, %course_id, "course progress left stale");
            log_error(&e);
        }
    }

    pub async fn course_progress(&self, student_id: Uuid, course_id: Uuid) -> ProgressResult<CourseProgress> {
        self.store
            .find_course_progress(student_id, course_id)
            .await?
            .ok_or(ProgressError::CourseProgressNotFound {
                student_id,
                course_id,
            })
    }

    pub async fn list_course_progress(&self, student_id: Uuid) -> ProgressResult<Vec<CourseProgress>> {
        Ok(self.store.list_course_progress(student_id).await?)
    }
}
