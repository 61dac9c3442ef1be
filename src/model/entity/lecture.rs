use std::fmt;
use std::str::FromStr;

use crate::model::repo::ResourceTyped;
use crate::model::store::LectureInfo;
use crate::model::{DatabaseError, ModelManager, error::DatabaseResult, repo::CrudRepository};
use crate::web::AuthenticatedUser;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Video,
    Article,
    File,
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Video => write!(f, "video"),
            Self::Article => write!(f, "article"),
            Self::File => write!(f, "file"),
        }
    }
}

impl FromStr for ContentType {
    type Err = DatabaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "video" => Ok(Self::Video),
            "article" => Ok(Self::Article),
            "file" => Ok(Self::File),
            other => Err(DatabaseError::validation(format!(
                "unknown lecture content type `{other}`"
            ))),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct Lecture {
    id: Uuid,
    section_id: Uuid,
    title: String,
    content_type: String,
    /// Seconds
    duration: i32,
    position: i32,
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct LectureCreate {
    pub section_id: Uuid,
    pub title: String,
    pub content_type: ContentType,
    pub duration: i32,
    pub position: Option<i32>,
}

impl LectureCreate {
    pub fn validate(&self) -> DatabaseResult<()> {
        if self.duration < 0 {
            return Err(DatabaseError::validation(
                "lecture duration cannot be negative",
            ));
        }
        if self.content_type == ContentType::Video && self.duration == 0 {
            return Err(DatabaseError::validation(
                "video lectures must have a duration greater than 0 seconds",
            ));
        }
        Ok(())
    }
}

impl ResourceTyped for Lecture {
    fn get_resource_type() -> crate::model::ResourceType {
        crate::model::ResourceType::Lecture
    }
}

impl Lecture {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn section_id(&self) -> Uuid {
        self.section_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content_type(&self) -> DatabaseResult<ContentType> {
        self.content_type.parse()
    }

    pub fn duration(&self) -> i32 {
        self.duration
    }

    pub fn position(&self) -> i32 {
        self.position
    }
}

#[async_trait]
impl CrudRepository<Lecture, LectureCreate, Uuid> for Lecture {
    async fn create(
        mm: &ModelManager,
        _actor: &AuthenticatedUser,
        data: LectureCreate,
    ) -> DatabaseResult<Self> {
        data.validate()?;

        let row = sqlx::query_as(
            r#"
            INSERT INTO lectures (id, section_id, title, content_type, duration, position)
            VALUES ($1,$2,$3,$4,$5,$6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(data.section_id)
        .bind(&data.title)
        .bind(data.content_type.to_string())
        .bind(data.duration)
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
        let result = sqlx::query_as("SELECT * FROM lectures WHERE id = $1")
            .bind(id)
            .fetch_optional(mm.executor())
            .await?;

        Ok(result)
    }
}

// Catalog lookups used by the progress tracker

impl Lecture {
    pub async fn find_info(mm: &ModelManager, lecture_id: Uuid) -> DatabaseResult<Option<LectureInfo>> {
        let row = sqlx::query_as(
            r#"
            SELECT
                l.id,
                l.section_id,
                s.course_id,
                l.duration
            FROM lectures l
            JOIN sections s ON s.id = l.section_id
            WHERE l.id = $1
            "#,
        )
        .bind(lecture_id)
        .fetch_optional(mm.executor())
        .await?;

        Ok(row)
    }

    pub async fn count_in_course(mm: &ModelManager, course_id: Uuid) -> DatabaseResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM lectures l
            JOIN sections s ON s.id = l.section_id
            WHERE s.course_id = $1
            "#,
        )
        .bind(course_id)
        .fetch_one(mm.executor())
        .await?;

        Ok(count)
    }

    pub async fn delete_by_id(mm: &ModelManager, lecture_id: Uuid) -> DatabaseResult<bool> {
        let result = sqlx::query("DELETE FROM lectures WHERE id = $1")
            .bind(lecture_id)
            .execute(mm.executor())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
