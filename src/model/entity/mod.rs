mod user;
pub use user::{UserEntity, UserEntityCreate};

mod category;
pub use category::{Category, CategoryCreate};

mod course;
pub use course::{Course, CourseCreate};

mod section;
pub use section::{Section, SectionCreate};

mod lecture;
pub use lecture::{ContentType, Lecture, LectureCreate};

mod enrollment;
pub use enrollment::{Enrollment, EnrollmentCreate};

mod lecture_progress;
pub use lecture_progress::LectureProgress;

mod course_progress;
pub use course_progress::{CourseProgress, completion_percentage};
