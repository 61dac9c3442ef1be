use crate::model::repo::ResourceTyped;
use crate::model::{ModelManager, error::DatabaseResult, repo::CrudRepository};
use crate::web::AuthenticatedUser;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct Enrollment {
    id: Uuid,
    student_id: Uuid,
    course_id: Uuid,
    is_active: bool,
    enrolled_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct EnrollmentCreate {
    pub student_id: Uuid,
    pub course_id: Uuid,
}

impl ResourceTyped for Enrollment {
    fn get_resource_type() -> crate::model::ResourceType {
        crate::model::ResourceType::Enrollment
    }
}

impl Enrollment {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn student_id(&self) -> Uuid {
        self.student_id
    }

    pub fn course_id(&self) -> Uuid {
        self.course_id
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn enrolled_at(&self) -> DateTime<Utc> {
        self.enrolled_at
    }
}

#[async_trait]
impl CrudRepository<Enrollment, EnrollmentCreate, Uuid> for Enrollment {
    async fn create(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        data: EnrollmentCreate,
    ) -> DatabaseResult<Self> {
        let row = sqlx::query_as(
            r#"
            INSERT INTO enrollments (id, student_id, course_id, is_active)
            VALUES ($1,$2,$3,TRUE)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(data.student_id)
        .bind(data.course_id)
        .fetch_one(mm.executor())
        .await?;

        Ok(row)
    }

    async fn find_by_id(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        id: Uuid,
    ) -> DatabaseResult<Option<Self>> {
        let result = sqlx::query_as("SELECT * FROM enrollments WHERE id = $1")
            .bind(id)
            .fetch_optional(mm.executor())
            .await?;

        Ok(result)
    }
}

impl Enrollment {
    pub async fn is_active_for(
        mm: &ModelManager,
        student_id: Uuid,
        course_id: Uuid,
    ) -> DatabaseResult<bool> {
        let active: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM enrollments
                WHERE student_id = $1 AND course_id = $2 AND is_active
            )
            "#,
        )
        .bind(student_id)
        .bind(course_id)
        .fetch_one(mm.executor())
        .await?;

        Ok(active)
    }

    pub async fn remove(mm: &ModelManager, student_id: Uuid, course_id: Uuid) -> DatabaseResult<bool> {
        let result = sqlx::query("DELETE FROM enrollments WHERE student_id = $1 AND course_id = $2")
            .bind(student_id)
            .bind(course_id)
            .execute(mm.executor())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
