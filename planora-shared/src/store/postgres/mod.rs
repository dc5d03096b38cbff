/// PostgreSQL storage backend
///
/// Implements the `Store` trait family with sqlx. Multi-valued
/// relations (project/area participants, meeting attendees, task
/// dependencies) live in junction tables; writes that touch a primary
/// row together with junction rows run inside a single transaction.
///
/// Trait implementations are split per entity:
///
/// - `users`: UserStore
/// - `projects`: ProjectStore
/// - `areas`: AreaStore (+ responsibilities)
/// - `tasks`: TaskStore
/// - `meetings`: MeetingStore (+ notes)
/// - `templates`: TemplateStore

mod areas;
mod meetings;
mod projects;
mod tasks;
mod templates;
mod users;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{Store, StoreError};

/// PostgreSQL-backed store
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wraps an existing connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying pool (tests and migrations)
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Loads participant ids for a project
    pub(crate) async fn project_participant_ids(
        &self,
        project_id: Uuid,
    ) -> Result<Vec<Uuid>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT user_id FROM project_participants WHERE project_id = $1 ORDER BY created_at",
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Loads participant ids for an area
    pub(crate) async fn area_participant_ids(
        &self,
        area_id: Uuid,
    ) -> Result<Vec<Uuid>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT user_id FROM area_participants WHERE area_id = $1 ORDER BY created_at",
        )
        .bind(area_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Loads attendee ids for a meeting
    pub(crate) async fn meeting_attendee_ids(
        &self,
        meeting_id: Uuid,
    ) -> Result<Vec<Uuid>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT user_id FROM meeting_attendees WHERE meeting_id = $1 ORDER BY created_at",
        )
        .bind(meeting_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Loads dependency ids for a task
    pub(crate) async fn task_dependency_ids(
        &self,
        task_id: Uuid,
    ) -> Result<Vec<Uuid>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT depends_on_id FROM task_dependencies WHERE task_id = $1 ORDER BY depends_on_id",
        )
        .bind(task_id)
        .fetch_all(&self.pool)
        .await
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
