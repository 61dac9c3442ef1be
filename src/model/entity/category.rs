use crate::model::repo::ResourceTyped;
use crate::model::{ModelManager, error::DatabaseResult, repo::CrudRepository};
use crate::web::AuthenticatedUser;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct Category {
    id: Uuid,
    name: String,
    description: String,
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CategoryCreate {
    pub name: String,
    pub description: Option<String>,
}

impl ResourceTyped for Category {
    fn get_resource_type() -> crate::model::ResourceType {
        crate::model::ResourceType::Category
    }
}

impl Category {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

#[async_trait]
impl CrudRepository<Category, CategoryCreate, Uuid> for Category {
    async fn create(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        data: CategoryCreate,
    ) -> DatabaseResult<Self> {
        let row = sqlx::query_as(
            "INSERT INTO categories (id, name, description) VALUES ($1,$2,$3) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&data.name)
        .bind(data.description.unwrap_or_default())
        .fetch_one(mm.executor())
        .await?;

        Ok(row)
    }

    async fn find_by_id(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        id: Uuid,
    ) -> DatabaseResult<Option<Self>> {
        let result = sqlx::query_as("SELECT * FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(mm.executor())
            .await?;

        Ok(result)
    }
}
