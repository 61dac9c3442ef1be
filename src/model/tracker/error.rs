use thiserror::Error;
use uuid::Uuid;

use crate::model::DatabaseError;

pub type ProgressResult<T> = std::result::Result<T, ProgressError>;

#[derive(Debug, Error)]
pub enum ProgressError {
    #[error("student {student_id} is not enrolled in course {course_id}")]
    NotEnrolled { student_id: Uuid, course_id: Uuid },
    #[error("lecture {0} not found")]
    LectureNotFound(Uuid),
    #[error("no progress recorded for student {student_id} on lecture {lecture_id}")]
    ProgressNotFound { student_id: Uuid, lecture_id: Uuid },
    #[error("no progress recorded for student {student_id} in course {course_id}")]
    CourseProgressNotFound { student_id: Uuid, course_id: Uuid },
    #[error("database error: {0}")]
    DatabaseError(#[from] DatabaseError),
}
