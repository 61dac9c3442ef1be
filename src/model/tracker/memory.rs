use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use crate::model::{
    DatabaseError, DatabaseResult, EnrollmentGate, LectureCatalog, LectureInfo, ProgressStore,
    entity::{CourseProgress, LectureProgress},
};

#[derive(Default)]
struct State {
    lectures: HashMap<Uuid, LectureInfo>,
    enrollments: HashSet<(Uuid, Uuid)>,
    lecture_progress: HashMap<(Uuid, Uuid), LectureProgress>,
    course_progress: HashMap<(Uuid, Uuid), CourseProgress>,
}

/// In-memory store double for tracker tests.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
    fail_course_writes: Arc<AtomicBool>,
    fail_progress_deletes: Arc<AtomicBool>,
    fail_enrollment_removal: Arc<AtomicBool>,
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore").finish_non_exhaustive()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_lecture(&self, course_id: Uuid, duration: i32) -> Uuid {
        let info = LectureInfo {
            id: Uuid::new_v4(),
            section_id: Uuid::new_v4(),
            course_id,
            duration,
        };
        self.state.lock().unwrap().lectures.insert(info.id, info);
        info.id
    }

    pub fn enroll(&self, student_id: Uuid, course_id: Uuid) {
        self.state
            .lock()
            .unwrap()
            .enrollments
            .insert((student_id, course_id));
    }

    pub fn seed_lecture_progress(&self, progress: LectureProgress) {
        self.state
            .lock()
            .unwrap()
            .lecture_progress
            .insert((progress.student_id(), progress.lecture_id()), progress);
    }

    pub fn lecture_progress_rows(&self, student_id: Uuid) -> usize {
        self.state
            .lock()
            .unwrap()
            .lecture_progress
            .keys()
            .filter(|(s, _)| *s == student_id)
            .count()
    }

    pub fn set_fail_course_writes(&self, fail: bool) {
        self.fail_course_writes.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_progress_deletes(&self, fail: bool) {
        self.fail_progress_deletes.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_enrollment_removal(&self, fail: bool) {
        self.fail_enrollment_removal.store(fail, Ordering::SeqCst);
    }

    pub fn is_enrolled(&self, student_id: Uuid, course_id: Uuid) -> bool {
        self.state
            .lock()
            .unwrap()
            .enrollments
            .contains(&(student_id, course_id))
    }

    fn course_of(state: &State, lecture_id: Uuid) -> Option<Uuid> {
        state.lectures.get(&lecture_id).map(|l| l.course_id)
    }
}

fn unavailable() -> DatabaseError {
    DatabaseError::SqlxError(sqlx::Error::PoolClosed)
}

#[async_trait]
impl LectureCatalog for MemoryStore {
    async fn get_lecture(&self, lecture_id: Uuid) -> DatabaseResult<Option<LectureInfo>> {
        Ok(self.state.lock().unwrap().lectures.get(&lecture_id).copied())
    }

    async fn count_lectures_in_course(&self, course_id: Uuid) -> DatabaseResult<i64> {
        let state = self.state.lock().unwrap();
        Ok(state
            .lectures
            .values()
            .filter(|l| l.course_id == course_id)
            .count() as i64)
    }

    async fn delete_lecture(&self, lecture_id: Uuid) -> DatabaseResult<bool> {
        let mut state = self.state.lock().unwrap();
        let removed = state.lectures.remove(&lecture_id).is_some();
        state
            .lecture_progress
            .retain(|(_, lecture), _| *lecture != lecture_id);
        Ok(removed)
    }
}

#[async_trait]
impl EnrollmentGate for MemoryStore {
    async fn is_actively_enrolled(&self, student_id: Uuid, course_id: Uuid) -> DatabaseResult<bool> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .enrollments
            .contains(&(student_id, course_id)))
    }

    async fn remove_enrollment(&self, student_id: Uuid, course_id: Uuid) -> DatabaseResult<bool> {
        if self.fail_enrollment_removal.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(self
            .state
            .lock()
            .unwrap()
            .enrollments
            .remove(&(student_id, course_id)))
    }
}

#[async_trait]
impl ProgressStore for MemoryStore {
    async fn find_lecture_progress(
        &self,
        student_id: Uuid,
        lecture_id: Uuid,
    ) -> DatabaseResult<Option<LectureProgress>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .lecture_progress
            .get(&(student_id, lecture_id))
            .cloned())
    }

    async fn insert_lecture_progress(
        &self,
        progress: &LectureProgress,
    ) -> DatabaseResult<Option<LectureProgress>> {
        let mut state = self.state.lock().unwrap();
        let key = (progress.student_id(), progress.lecture_id());
        if state.lecture_progress.contains_key(&key) {
            return Ok(None);
        }
        state.lecture_progress.insert(key, progress.clone());
        Ok(Some(progress.clone()))
    }

    async fn upsert_lecture_progress(&self, progress: &LectureProgress) -> DatabaseResult<LectureProgress> {
        let mut state = self.state.lock().unwrap();
        let key = (progress.student_id(), progress.lecture_id());
        state.lecture_progress.insert(key, progress.clone());
        Ok(progress.clone())
    }

    async fn delete_lecture_progress(&self, student_id: Uuid, lecture_id: Uuid) -> DatabaseResult<bool> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .lecture_progress
            .remove(&(student_id, lecture_id))
            .is_some())
    }

    async fn delete_course_lecture_progress(
        &self,
        student_id: Uuid,
        course_id: Uuid,
    ) -> DatabaseResult<u64> {
        if self.fail_progress_deletes.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        let mut state = self.state.lock().unwrap();
        let doomed: Vec<(Uuid, Uuid)> = state
            .lecture_progress
            .keys()
            .filter(|(s, l)| *s == student_id && Self::course_of(&state, *l) == Some(course_id))
            .copied()
            .collect();
        for key in &doomed {
            state.lecture_progress.remove(key);
        }
        Ok(doomed.len() as u64)
    }

    async fn count_completed_lectures(&self, student_id: Uuid, course_id: Uuid) -> DatabaseResult<i64> {
        let state = self.state.lock().unwrap();
        Ok(state
            .lecture_progress
            .values()
            .filter(|p| {
                p.student_id() == student_id
                    && p.is_completed()
                    && Self::course_of(&state, p.lecture_id()) == Some(course_id)
            })
            .count() as i64)
    }

    async fn find_course_progress(
        &self,
        student_id: Uuid,
        course_id: Uuid,
    ) -> DatabaseResult<Option<CourseProgress>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .course_progress
            .get(&(student_id, course_id))
            .cloned())
    }

    async fn upsert_course_progress(&self, progress: &CourseProgress) -> DatabaseResult<CourseProgress> {
        if self.fail_course_writes.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        let mut state = self.state.lock().unwrap();
        let key = (progress.student_id(), progress.course_id());
        state.course_progress.insert(key, progress.clone());
        Ok(progress.clone())
    }

    async fn list_course_progress(&self, student_id: Uuid) -> DatabaseResult<Vec<CourseProgress>> {
        let state = self.state.lock().unwrap();
        let mut rows: Vec<CourseProgress> = state
            .course_progress
            .values()
            .filter(|p| p.student_id() == student_id)
            .cloned()
            .collect();
        rows.sort_by_key(|p| std::cmp::Reverse(p.last_accessed()));
        Ok(rows)
    }

    async fn students_with_course_progress(&self, course_id: Uuid) -> DatabaseResult<Vec<Uuid>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .course_progress
            .keys()
            .filter(|(_, c)| *c == course_id)
            .map(|(s, _)| *s)
            .collect())
    }
}
