use crate::model::repo::ResourceTyped;
use crate::model::{ModelManager, error::DatabaseResult, repo::CrudRepository};
use crate::web::AuthenticatedUser;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct Section {
    id: Uuid,
    course_id: Uuid,
    title: String,
    position: i32,
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct SectionCreate {
    pub course_id: Uuid,
    pub title: String,
    pub position: Option<i32>,
}

impl ResourceTyped for Section {
    fn get_resource_type() -> crate::model::ResourceType {
        crate::model::ResourceType::Section
    }
}

impl Section {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn course_id(&self) -> Uuid {
        self.course_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn position(&self) -> i32 {
        self.position
    }
}

#[async_trait]
impl CrudRepository<Section, SectionCreate, Uuid> for Section {
    async fn create(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        data: SectionCreate,
    ) -> DatabaseResult<Self> {
        let row = sqlx::query_as(
            "INSERT INTO sections (id, course_id, title, position) VALUES ($1,$2,$3,$4) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(data.course_id)
        .bind(&data.title)
        .bind(data.position.unwrap_or(0))
        .fetch_one(mm.executor())
        .await?;

        Ok(row)
    }

    async fn find_by_id(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        id: Uuid,
    ) -> DatabaseResult<Option<Self>> {
        let result = sqlx::query_as("SELECT * FROM sections WHERE id = $1")
            .bind(id)
            .fetch_optional(mm.executor())
            .await?;

        Ok(result)
    }
}
