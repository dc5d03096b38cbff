/// ProjectStore implementation for the flat-file backend
///
/// Participants are embedded directly in the project record, so the
/// "junction" updates here are plain field writes under the writer
/// lock.

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::models::project::{CreateProject, Project, UpdateProject};
use crate::store::{base_slug, ProjectStore, StoreError};

use super::{FileStore, PROJECTS};

fn dedup_ids(ids: Vec<Uuid>) -> Vec<Uuid> {
    let mut seen = Vec::with_capacity(ids.len());
    for id in ids {
        if !seen.contains(&id) {
            seen.push(id);
        }
    }
    seen
}

#[async_trait]
impl ProjectStore for FileStore {
    async fn create_project(&self, data: CreateProject) -> Result<Project, StoreError> {
        let _guard = self.lock_writes().await;
        let mut projects: Vec<Project> = self.read_collection(PROJECTS).await?;

        let base = base_slug(&data.name);
        let mut slug = base.clone();
        let mut suffix = 0u32;
        while projects.iter().any(|p| p.slug == slug) {
            suffix += 1;
            slug = format!("{}-{}", base, suffix);
        }

        let now = Utc::now();
        let project = Project {
            id: Uuid::new_v4(),
            name: data.name,
            slug,
            project_type: data.project_type,
            status: data.status,
            description: data.description,
            start_date: data.start_date,
            end_date: data.end_date,
            participant_ids: dedup_ids(data.participant_ids),
            created_at: now,
            updated_at: now,
        };

        projects.push(project.clone());
        self.write_collection(PROJECTS, &projects).await?;

        Ok(project)
    }

    async fn get_project(&self, id: Uuid) -> Result<Option<Project>, StoreError> {
        let projects: Vec<Project> = self.read_collection(PROJECTS).await?;
        Ok(projects.into_iter().find(|p| p.id == id))
    }

    async fn get_project_by_slug(&self, slug: &str) -> Result<Option<Project>, StoreError> {
        let projects: Vec<Project> = self.read_collection(PROJECTS).await?;
        Ok(projects.into_iter().find(|p| p.slug == slug))
    }

    async fn list_projects(&self) -> Result<Vec<Project>, StoreError> {
        let mut projects: Vec<Project> = self.read_collection(PROJECTS).await?;
        projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(projects)
    }

    async fn update_project(
        &self,
        id: Uuid,
        data: UpdateProject,
    ) -> Result<Option<Project>, StoreError> {
        let _guard = self.lock_writes().await;
        let mut projects: Vec<Project> = self.read_collection(PROJECTS).await?;

        let Some(project) = projects.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };

        if let Some(name) = data.name {
            project.name = name;
        }
        if let Some(project_type) = data.project_type {
            project.project_type = project_type;
        }
        if let Some(status) = data.status {
            project.status = status;
        }
        if let Some(description) = data.description {
            project.description = Some(description);
        }
        if let Some(start_date) = data.start_date {
            project.start_date = Some(start_date);
        }
        if let Some(end_date) = data.end_date {
            project.end_date = Some(end_date);
        }
        if let Some(participant_ids) = data.participant_ids {
            project.participant_ids = dedup_ids(participant_ids);
        }
        project.updated_at = Utc::now();
        let updated = project.clone();

        self.write_collection(PROJECTS, &projects).await?;
        Ok(Some(updated))
    }

    async fn add_project_participant(
        &self,
        project_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Project>, StoreError> {
        let _guard = self.lock_writes().await;
        let mut projects: Vec<Project> = self.read_collection(PROJECTS).await?;

        let Some(project) = projects.iter_mut().find(|p| p.id == project_id) else {
            return Ok(None);
        };

        if !project.participant_ids.contains(&user_id) {
            project.participant_ids.push(user_id);
            project.updated_at = Utc::now();
        }
        let updated = project.clone();

        self.write_collection(PROJECTS, &projects).await?;
        Ok(Some(updated))
    }

    async fn remove_project_participant(
        &self,
        project_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Project>, StoreError> {
        let _guard = self.lock_writes().await;
        let mut projects: Vec<Project> = self.read_collection(PROJECTS).await?;

        let Some(project) = projects.iter_mut().find(|p| p.id == project_id) else {
            return Ok(None);
        };

        if let Some(pos) = project.participant_ids.iter().position(|&u| u == user_id) {
            project.participant_ids.remove(pos);
            project.updated_at = Utc::now();
        }
        let updated = project.clone();

        self.write_collection(PROJECTS, &projects).await?;
        Ok(Some(updated))
    }
}
