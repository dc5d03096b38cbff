/// TaskStore implementation for PostgreSQL
///
/// completed_at is managed inside the SQL: it is stamped when status
/// becomes `completed` and cleared when status becomes anything else.
/// Dependency rows are stored as given, without existence checks.

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::task::{CreateTask, Task, UpdateTask};
use crate::store::{StoreError, TaskStore};

use super::PgStore;

const TASK_COLUMNS: &str = "id, project_id, area_id, title, description, assignee_id, \
                            deadline, status, support_resources, recurrence_frequency, \
                            recurrence_interval, recurrence_until, completed_at, \
                            created_at, updated_at";

impl PgStore {
    async fn enrich_task(&self, mut task: Task) -> Result<Task, StoreError> {
        task.depends_on = self.task_dependency_ids(task.id).await?;
        Ok(task)
    }

    /// Rejects an area that is missing or owned by another project
    async fn check_area_in_project(
        &self,
        area_id: Uuid,
        project_id: Uuid,
    ) -> Result<(), StoreError> {
        let owner: Option<Uuid> =
            sqlx::query_scalar("SELECT project_id FROM areas WHERE id = $1")
                .bind(area_id)
                .fetch_optional(&self.pool)
                .await?;

        match owner {
            None => Err(StoreError::Invalid(format!("Unknown area {}", area_id))),
            Some(owner) if owner != project_id => Err(StoreError::Invalid(
                "Area belongs to a different project".to_string(),
            )),
            Some(_) => Ok(()),
        }
    }
}

#[async_trait]
impl TaskStore for PgStore {
    async fn create_task(&self, data: CreateTask) -> Result<Task, StoreError> {
        if let Some(area_id) = data.area_id {
            self.check_area_in_project(area_id, data.project_id).await?;
        }

        let mut tx = self.pool.begin().await?;

        let task = sqlx::query_as::<_, Task>(&format!(
            r#"
            INSERT INTO tasks (project_id, area_id, title, description, assignee_id, deadline,
                               status, support_resources, recurrence_frequency,
                               recurrence_interval, recurrence_until, completed_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11,
                    CASE WHEN $7 = 'completed' THEN NOW() END)
            RETURNING {TASK_COLUMNS}
            "#,
        ))
        .bind(data.project_id)
        .bind(data.area_id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.assignee_id)
        .bind(data.deadline)
        .bind(data.status)
        .bind(&data.support_resources)
        .bind(data.recurrence_frequency)
        .bind(data.recurrence_interval)
        .bind(data.recurrence_until)
        .fetch_one(&mut *tx)
        .await?;

        for depends_on_id in &data.depends_on {
            sqlx::query(
                "INSERT INTO task_dependencies (task_id, depends_on_id) VALUES ($1, $2) \
                 ON CONFLICT DO NOTHING",
            )
            .bind(task.id)
            .bind(depends_on_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.enrich_task(task).await
    }

    async fn get_task(&self, id: Uuid) -> Result<Option<Task>, StoreError> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match task {
            Some(t) => Ok(Some(self.enrich_task(t).await?)),
            None => Ok(None),
        }
    }

    async fn list_tasks(&self, project_id: Uuid) -> Result<Vec<Task>, StoreError> {
        let tasks = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE project_id = $1 ORDER BY created_at DESC",
        ))
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;

        futures::future::try_join_all(tasks.into_iter().map(|t| self.enrich_task(t))).await
    }

    async fn update_task(&self, id: Uuid, data: UpdateTask) -> Result<Option<Task>, StoreError> {
        let Some(current) = self.get_task(id).await? else {
            return Ok(None);
        };

        if let Some(area_id) = data.area_id {
            self.check_area_in_project(area_id, current.project_id)
                .await?;
        }

        let mut tx = self.pool.begin().await?;

        let task = sqlx::query_as::<_, Task>(&format!(
            r#"
            UPDATE tasks SET
                area_id = COALESCE($2, area_id),
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                assignee_id = COALESCE($5, assignee_id),
                deadline = COALESCE($6, deadline),
                status = COALESCE($7, status),
                support_resources = COALESCE($8, support_resources),
                recurrence_frequency = COALESCE($9, recurrence_frequency),
                recurrence_interval = COALESCE($10, recurrence_interval),
                recurrence_until = COALESCE($11, recurrence_until),
                completed_at = CASE
                    WHEN $7 IS NULL THEN completed_at
                    WHEN $7 = 'completed' THEN COALESCE(completed_at, NOW())
                    ELSE NULL
                END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {TASK_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(data.area_id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.assignee_id)
        .bind(data.deadline)
        .bind(data.status)
        .bind(&data.support_resources)
        .bind(data.recurrence_frequency)
        .bind(data.recurrence_interval)
        .bind(data.recurrence_until)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(task) = task else {
            return Ok(None);
        };

        if let Some(depends_on) = &data.depends_on {
            sqlx::query("DELETE FROM task_dependencies WHERE task_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            for depends_on_id in depends_on {
                sqlx::query(
                    "INSERT INTO task_dependencies (task_id, depends_on_id) VALUES ($1, $2) \
                     ON CONFLICT DO NOTHING",
                )
                .bind(id)
                .bind(depends_on_id)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        Ok(Some(self.enrich_task(task).await?))
    }

    async fn delete_task(&self, id: Uuid) -> Result<bool, StoreError> {
        // dependency rows go with the task via CASCADE
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
