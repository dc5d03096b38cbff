/// ProjectStore implementation for PostgreSQL

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::project::{CreateProject, Project, UpdateProject};
use crate::store::{base_slug, ProjectStore, StoreError};

use super::PgStore;

const PROJECT_COLUMNS: &str = "id, name, slug, project_type, status, description, \
                               start_date, end_date, created_at, updated_at";

impl PgStore {
    async fn enrich_project(&self, mut project: Project) -> Result<Project, StoreError> {
        project.participant_ids = self.project_participant_ids(project.id).await?;
        Ok(project)
    }
}

#[async_trait]
impl ProjectStore for PgStore {
    async fn create_project(&self, data: CreateProject) -> Result<Project, StoreError> {
        let base = base_slug(&data.name);
        let mut slug = base.clone();
        let mut suffix = 0u32;
        while self.get_project_by_slug(&slug).await?.is_some() {
            suffix += 1;
            slug = format!("{}-{}", base, suffix);
        }

        let mut tx = self.pool.begin().await?;

        let project = sqlx::query_as::<_, Project>(&format!(
            r#"
            INSERT INTO projects (name, slug, project_type, status, description, start_date, end_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {PROJECT_COLUMNS}
            "#,
        ))
        .bind(&data.name)
        .bind(&slug)
        .bind(data.project_type)
        .bind(data.status)
        .bind(&data.description)
        .bind(data.start_date)
        .bind(data.end_date)
        .fetch_one(&mut *tx)
        .await?;

        for user_id in &data.participant_ids {
            sqlx::query(
                "INSERT INTO project_participants (project_id, user_id) VALUES ($1, $2) \
                 ON CONFLICT DO NOTHING",
            )
            .bind(project.id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.enrich_project(project).await
    }

    async fn get_project(&self, id: Uuid) -> Result<Option<Project>, StoreError> {
        let project = sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match project {
            Some(p) => Ok(Some(self.enrich_project(p).await?)),
            None => Ok(None),
        }
    }

    async fn get_project_by_slug(&self, slug: &str) -> Result<Option<Project>, StoreError> {
        let project = sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE slug = $1",
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        match project {
            Some(p) => Ok(Some(self.enrich_project(p).await?)),
            None => Ok(None),
        }
    }

    async fn list_projects(&self) -> Result<Vec<Project>, StoreError> {
        let projects = sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY created_at DESC",
        ))
        .fetch_all(&self.pool)
        .await?;

        futures::future::try_join_all(projects.into_iter().map(|p| self.enrich_project(p))).await
    }

    async fn update_project(
        &self,
        id: Uuid,
        data: UpdateProject,
    ) -> Result<Option<Project>, StoreError> {
        let mut tx = self.pool.begin().await?;

        let project = sqlx::query_as::<_, Project>(&format!(
            r#"
            UPDATE projects SET
                name = COALESCE($2, name),
                project_type = COALESCE($3, project_type),
                status = COALESCE($4, status),
                description = COALESCE($5, description),
                start_date = COALESCE($6, start_date),
                end_date = COALESCE($7, end_date),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {PROJECT_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(&data.name)
        .bind(data.project_type)
        .bind(data.status)
        .bind(&data.description)
        .bind(data.start_date)
        .bind(data.end_date)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(project) = project else {
            return Ok(None);
        };

        if let Some(participant_ids) = &data.participant_ids {
            sqlx::query("DELETE FROM project_participants WHERE project_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            for user_id in participant_ids {
                sqlx::query(
                    "INSERT INTO project_participants (project_id, user_id) VALUES ($1, $2) \
                     ON CONFLICT DO NOTHING",
                )
                .bind(id)
                .bind(user_id)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        Ok(Some(self.enrich_project(project).await?))
    }

    async fn add_project_participant(
        &self,
        project_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Project>, StoreError> {
        if self.get_project(project_id).await?.is_none() {
            return Ok(None);
        }

        sqlx::query(
            "INSERT INTO project_participants (project_id, user_id) VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(project_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        self.get_project(project_id).await
    }

    async fn remove_project_participant(
        &self,
        project_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Project>, StoreError> {
        if self.get_project(project_id).await?.is_none() {
            return Ok(None);
        }

        sqlx::query("DELETE FROM project_participants WHERE project_id = $1 AND user_id = $2")
            .bind(project_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        self.get_project(project_id).await
    }
}
