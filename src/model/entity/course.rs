use crate::model::repo::ResourceTyped;
use crate::model::{ModelManager, error::DatabaseResult, repo::CrudRepository};
use crate::web::AuthenticatedUser;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct Course {
    id: Uuid,
    category_id: Uuid,
    title: String,
    description: String,
    price_cents: i64,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CourseCreate {
    pub category_id: Uuid,
    pub title: String,
    pub description: String,
    /// 0 for free courses
    pub price_cents: Option<i64>,
}

impl ResourceTyped for Course {
    fn get_resource_type() -> crate::model::ResourceType {
        crate::model::ResourceType::Course
    }
}

impl Course {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn category_id(&self) -> Uuid {
        self.category_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price_cents(&self) -> i64 {
        self.price_cents
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[async_trait]
impl CrudRepository<Course, CourseCreate, Uuid> for Course {
    async fn create(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        data: CourseCreate,
    ) -> DatabaseResult<Self> {
        let price = data.price_cents.unwrap_or(0);
        if price < 0 {
            return Err(crate::model::DatabaseError::validation(
                "course price cannot be negative",
            ));
        }

        let row = sqlx::query_as(
            r#"
            INSERT INTO courses (id, category_id, title, description, price_cents)
            VALUES ($1,$2,$3,$4,$5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(data.category_id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(price)
        .fetch_one(mm.executor())
        .await?;

        Ok(row)
    }

    async fn find_by_id(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        id: Uuid,
    ) -> DatabaseResult<Option<Self>> {
        let result = sqlx::query_as("SELECT * FROM courses WHERE id = $1")
            .bind(id)
            .fetch_optional(mm.executor())
            .await?;

        Ok(result)
    }
}

impl Course {
    pub async fn find_by_title(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        title: &str,
    ) -> DatabaseResult<Option<Self>> {
        let result = sqlx::query_as("SELECT * FROM courses WHERE title = $1")
            .bind(title)
            .fetch_optional(mm.executor())
            .await?;

        Ok(result)
    }

    /// Removes the course with everything hanging off it. Sections, lectures,
    /// enrollments, lecture progress and course progress all go through the
    /// schema cascade, so no aggregate outlives its course.
    pub async fn remove(self, mm: &ModelManager, _actor: &AuthenticatedUser) -> DatabaseResult<()> {
        sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(self.id)
            .execute(mm.executor())
            .await?;
        Ok(())
    }
}
