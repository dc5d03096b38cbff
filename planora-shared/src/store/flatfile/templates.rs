/// TemplateStore implementation for the flat-file backend

use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use uuid::Uuid;

use crate::models::template::{CreateTemplate, ProjectTemplate};
use crate::store::{StoreError, TemplateStore};

use super::{FileStore, TEMPLATES};

#[async_trait]
impl TemplateStore for FileStore {
    async fn create_template(&self, data: CreateTemplate) -> Result<ProjectTemplate, StoreError> {
        let _guard = self.lock_writes().await;
        let mut templates: Vec<ProjectTemplate> = self.read_collection(TEMPLATES).await?;

        if templates.iter().any(|t| t.name == data.name) {
            return Err(StoreError::Conflict(format!(
                "Template {} already exists",
                data.name
            )));
        }

        let template = ProjectTemplate {
            id: Uuid::new_v4(),
            name: data.name,
            project_type: data.project_type,
            body: Json(data.body),
            created_at: Utc::now(),
        };

        templates.push(template.clone());
        self.write_collection(TEMPLATES, &templates).await?;

        Ok(template)
    }

    async fn get_template(&self, id: Uuid) -> Result<Option<ProjectTemplate>, StoreError> {
        let templates: Vec<ProjectTemplate> = self.read_collection(TEMPLATES).await?;
        Ok(templates.into_iter().find(|t| t.id == id))
    }

    async fn find_template_by_name(
        &self,
        name: &str,
    ) -> Result<Option<ProjectTemplate>, StoreError> {
        let templates: Vec<ProjectTemplate> = self.read_collection(TEMPLATES).await?;
        Ok(templates.into_iter().find(|t| t.name == name))
    }

    async fn list_templates(&self) -> Result<Vec<ProjectTemplate>, StoreError> {
        let mut templates: Vec<ProjectTemplate> = self.read_collection(TEMPLATES).await?;
        templates.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(templates)
    }
}
