/// TaskStore implementation for the flat-file backend

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::models::area::Area;
use crate::models::task::{CreateTask, Task, TaskStatus, UpdateTask};
use crate::store::{StoreError, TaskStore};

use super::{FileStore, AREAS, TASKS};

impl FileStore {
    /// Rejects an area that is missing or owned by another project
    async fn check_area_in_project(
        &self,
        area_id: Uuid,
        project_id: Uuid,
    ) -> Result<(), StoreError> {
        let areas: Vec<Area> = self.read_collection(AREAS).await?;
        match areas.iter().find(|a| a.id == area_id) {
            None => Err(StoreError::Invalid(format!("Unknown area {}", area_id))),
            Some(area) if area.project_id != project_id => Err(StoreError::Invalid(
                "Area belongs to a different project".to_string(),
            )),
            Some(_) => Ok(()),
        }
    }
}

#[async_trait]
impl TaskStore for FileStore {
    async fn create_task(&self, data: CreateTask) -> Result<Task, StoreError> {
        if let Some(area_id) = data.area_id {
            self.check_area_in_project(area_id, data.project_id).await?;
        }

        let _guard = self.lock_writes().await;
        let mut tasks: Vec<Task> = self.read_collection(TASKS).await?;

        let now = Utc::now();
        let task = Task {
            id: Uuid::new_v4(),
            project_id: data.project_id,
            area_id: data.area_id,
            title: data.title,
            description: data.description,
            assignee_id: data.assignee_id,
            deadline: data.deadline,
            status: data.status,
            support_resources: data.support_resources,
            depends_on: data.depends_on,
            recurrence_frequency: data.recurrence_frequency,
            recurrence_interval: data.recurrence_interval,
            recurrence_until: data.recurrence_until,
            completed_at: if data.status == TaskStatus::Completed {
                Some(now)
            } else {
                None
            },
            created_at: now,
            updated_at: now,
        };

        tasks.push(task.clone());
        self.write_collection(TASKS, &tasks).await?;

        Ok(task)
    }

    async fn get_task(&self, id: Uuid) -> Result<Option<Task>, StoreError> {
        let tasks: Vec<Task> = self.read_collection(TASKS).await?;
        Ok(tasks.into_iter().find(|t| t.id == id))
    }

    async fn list_tasks(&self, project_id: Uuid) -> Result<Vec<Task>, StoreError> {
        let mut tasks: Vec<Task> = self.read_collection(TASKS).await?;
        tasks.retain(|t| t.project_id == project_id);
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tasks)
    }

    async fn update_task(&self, id: Uuid, data: UpdateTask) -> Result<Option<Task>, StoreError> {
        if let Some(area_id) = data.area_id {
            let Some(current) = self.get_task(id).await? else {
                return Ok(None);
            };
            self.check_area_in_project(area_id, current.project_id)
                .await?;
        }

        let _guard = self.lock_writes().await;
        let mut tasks: Vec<Task> = self.read_collection(TASKS).await?;

        let Some(task) = tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };

        let now = Utc::now();
        if let Some(area_id) = data.area_id {
            task.area_id = Some(area_id);
        }
        if let Some(title) = data.title {
            task.title = title;
        }
        if let Some(description) = data.description {
            task.description = Some(description);
        }
        if let Some(assignee_id) = data.assignee_id {
            task.assignee_id = Some(assignee_id);
        }
        if let Some(deadline) = data.deadline {
            task.deadline = Some(deadline);
        }
        if let Some(status) = data.status {
            task.status = status;
            task.completed_at = if status == TaskStatus::Completed {
                task.completed_at.or(Some(now))
            } else {
                None
            };
        }
        if let Some(support_resources) = data.support_resources {
            task.support_resources = Some(support_resources);
        }
        if let Some(depends_on) = data.depends_on {
            task.depends_on = depends_on;
        }
        if let Some(frequency) = data.recurrence_frequency {
            task.recurrence_frequency = Some(frequency);
        }
        if let Some(interval) = data.recurrence_interval {
            task.recurrence_interval = Some(interval);
        }
        if let Some(until) = data.recurrence_until {
            task.recurrence_until = Some(until);
        }
        task.updated_at = now;
        let updated = task.clone();

        self.write_collection(TASKS, &tasks).await?;
        Ok(Some(updated))
    }

    async fn delete_task(&self, id: Uuid) -> Result<bool, StoreError> {
        let _guard = self.lock_writes().await;
        let mut tasks: Vec<Task> = self.read_collection(TASKS).await?;

        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        if tasks.len() == before {
            return Ok(false);
        }

        self.write_collection(TASKS, &tasks).await?;
        Ok(true)
    }
}
