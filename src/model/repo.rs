use crate::{
    model::{ModelManager, error::DatabaseResult},
    web::AuthenticatedUser,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    User,
    Category,
    Course,
    Section,
    Lecture,
    Enrollment,
    LectureProgress,
    CourseProgress,
}

pub trait ResourceTyped {
    fn get_resource_type() -> ResourceType;
}

/// Catalog rows are written once by the seeding tools and read by the
/// progress tracker, so the repository surface is create / lookup.
///
/// Removals that touch lecture progress go through
/// [`ProgressTracker`](crate::model::ProgressTracker) so the course
/// aggregates are recounted.
#[async_trait::async_trait]
pub trait CrudRepository<T, Create, V>
where
    T: ResourceTyped,
    V: Clone + Copy,
{
    async fn create(mm: &ModelManager, actor: &AuthenticatedUser, data: Create)
    -> DatabaseResult<T>;

    async fn find_by_id(
        mm: &ModelManager,
        actor: &AuthenticatedUser,
        id: V,
    ) -> DatabaseResult<Option<T>>;
}
