/// TemplateStore implementation for PostgreSQL
///
/// The nested template body is stored as a JSONB column.

use async_trait::async_trait;
use sqlx::types::Json;
use uuid::Uuid;

use crate::models::template::{CreateTemplate, ProjectTemplate};
use crate::store::{StoreError, TemplateStore};

use super::PgStore;

const TEMPLATE_COLUMNS: &str = "id, name, project_type, body, created_at";

#[async_trait]
impl TemplateStore for PgStore {
    async fn create_template(&self, data: CreateTemplate) -> Result<ProjectTemplate, StoreError> {
        if self.find_template_by_name(&data.name).await?.is_some() {
            return Err(StoreError::Conflict(format!(
                "Template {} already exists",
                data.name
            )));
        }

        let template = sqlx::query_as::<_, ProjectTemplate>(&format!(
            r#"
            INSERT INTO project_templates (name, project_type, body)
            VALUES ($1, $2, $3)
            RETURNING {TEMPLATE_COLUMNS}
            "#,
        ))
        .bind(&data.name)
        .bind(data.project_type)
        .bind(Json(&data.body))
        .fetch_one(&self.pool)
        .await?;

        Ok(template)
    }

    async fn get_template(&self, id: Uuid) -> Result<Option<ProjectTemplate>, StoreError> {
        let template = sqlx::query_as::<_, ProjectTemplate>(&format!(
            "SELECT {TEMPLATE_COLUMNS} FROM project_templates WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(template)
    }

    async fn find_template_by_name(
        &self,
        name: &str,
    ) -> Result<Option<ProjectTemplate>, StoreError> {
        let template = sqlx::query_as::<_, ProjectTemplate>(&format!(
            "SELECT {TEMPLATE_COLUMNS} FROM project_templates WHERE name = $1",
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(template)
    }

    async fn list_templates(&self) -> Result<Vec<ProjectTemplate>, StoreError> {
        let templates = sqlx::query_as::<_, ProjectTemplate>(&format!(
            "SELECT {TEMPLATE_COLUMNS} FROM project_templates ORDER BY name",
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(templates)
    }
}
