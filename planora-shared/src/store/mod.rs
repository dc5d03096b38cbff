/// Storage interface
///
/// One trait family over two backends: `postgres::PgStore` (sqlx) and
/// `flatfile::FileStore` (JSON array files on disk). Route handlers
/// and template expansion only ever see `&dyn Store`, so every
/// operation has identical semantics on both backends.
///
/// # Contract
///
/// - Get-by-id returns `Ok(None)` when the record is absent; not-found
///   is not an error at this layer.
/// - Create inserts the primary record plus its multi-valued relations
///   (participants, attendees, dependencies) and returns the re-fetched
///   enriched record.
/// - Update writes only the provided fields; a provided multi-valued
///   relation replaces the stored set.
/// - Delete returns whether a record was removed.
///
/// # Example
///
/// ```no_run
/// use planora_shared::store::{Store, StoreError, TaskStore};
/// use planora_shared::models::task::CreateTask;
/// use uuid::Uuid;
///
/// async fn example(store: &dyn Store, project_id: Uuid) -> Result<(), StoreError> {
///     let task = store
///         .create_task(CreateTask {
///             project_id,
///             area_id: None,
///             title: "Book venue".to_string(),
///             description: None,
///             assignee_id: None,
///             deadline: None,
///             status: planora_shared::models::task::TaskStatus::Pending,
///             support_resources: None,
///             depends_on: vec![],
///             recurrence_frequency: None,
///             recurrence_interval: None,
///             recurrence_until: None,
///         })
///         .await?;
///     assert!(store.get_task(task.id).await?.is_some());
///     Ok(())
/// }
/// ```

pub mod flatfile;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::area::{Area, AreaOrder, CreateArea, UpdateArea};
use crate::models::meeting::{CreateMeeting, Meeting, UpdateMeeting};
use crate::models::meeting_note::{CreateMeetingNote, MeetingNote, UpdateMeetingNote};
use crate::models::project::{self, CreateProject, Project, UpdateProject};
use crate::models::responsibility::{CreateResponsibility, Responsibility};
use crate::models::task::{CreateTask, Task, UpdateTask};
use crate::models::template::{CreateTemplate, ProjectTemplate};
use crate::models::user::{CreateUser, User};

/// Error type for storage operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Underlying database failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Flat-file backend I/O failure
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Flat-file backend (de)serialization failure
    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Input that is well-formed JSON but violates a domain rule
    /// (maps to 400 at the API boundary)
    #[error("invalid input: {0}")]
    Invalid(String),

    /// Uniqueness violation (duplicate email, second note for a
    /// meeting; maps to 409 at the API boundary)
    #[error("conflict: {0}")]
    Conflict(String),
}

/// User persistence operations
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Creates a user; duplicate email is a [`StoreError::Conflict`]
    async fn create_user(&self, data: CreateUser) -> Result<User, StoreError>;

    /// Finds a user by ID
    async fn get_user(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// Lists all users ordered by name
    async fn list_users(&self) -> Result<Vec<User>, StoreError>;

    /// Finds a user by exact email (case-insensitive)
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Finds a user by exact name, compared case-insensitively
    async fn find_user_by_name(&self, name: &str) -> Result<Option<User>, StoreError>;

    /// Sets credentials on an existing (provisional) user
    async fn set_user_credentials(
        &self,
        id: Uuid,
        password_hash: &str,
    ) -> Result<Option<User>, StoreError>;

    /// Stamps last_login_at
    async fn record_login(&self, id: Uuid) -> Result<(), StoreError>;
}

/// Project persistence operations
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Creates a project with its participant set
    ///
    /// The slug is derived from the name; on collision an incrementing
    /// numeric suffix is appended (`name`, `name-1`, `name-2`, ...).
    async fn create_project(&self, data: CreateProject) -> Result<Project, StoreError>;

    /// Finds a project by ID
    async fn get_project(&self, id: Uuid) -> Result<Option<Project>, StoreError>;

    /// Finds a project by slug
    async fn get_project_by_slug(&self, slug: &str) -> Result<Option<Project>, StoreError>;

    /// Lists all projects, newest first
    async fn list_projects(&self) -> Result<Vec<Project>, StoreError>;

    /// Partially updates a project
    async fn update_project(
        &self,
        id: Uuid,
        data: UpdateProject,
    ) -> Result<Option<Project>, StoreError>;

    /// Adds a user to the participant set (idempotent)
    async fn add_project_participant(
        &self,
        project_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Project>, StoreError>;

    /// Removes a user from the participant set (idempotent)
    async fn remove_project_participant(
        &self,
        project_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Project>, StoreError>;
}

/// Area and responsibility persistence operations
#[async_trait]
pub trait AreaStore: Send + Sync {
    /// Creates an area at the end of the project's display order
    async fn create_area(&self, data: CreateArea) -> Result<Area, StoreError>;

    /// Finds an area by ID
    async fn get_area(&self, id: Uuid) -> Result<Option<Area>, StoreError>;

    /// Lists a project's areas ordered by display_order
    async fn list_areas(&self, project_id: Uuid) -> Result<Vec<Area>, StoreError>;

    /// Partially updates an area
    async fn update_area(&self, id: Uuid, data: UpdateArea) -> Result<Option<Area>, StoreError>;

    /// Deletes an area, detaching its tasks
    async fn delete_area(&self, id: Uuid) -> Result<bool, StoreError>;

    /// Applies a bulk display-order change and returns the updated areas
    async fn reorder_areas(&self, orders: &[AreaOrder]) -> Result<Vec<Area>, StoreError>;

    /// Creates a responsibility under an area
    async fn create_responsibility(
        &self,
        data: CreateResponsibility,
    ) -> Result<Responsibility, StoreError>;

    /// Lists an area's responsibilities in creation order
    async fn list_responsibilities(
        &self,
        area_id: Uuid,
    ) -> Result<Vec<Responsibility>, StoreError>;
}

/// Task persistence operations
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Creates a task with its dependency set
    ///
    /// Rejects an area that belongs to a different project with
    /// [`StoreError::Invalid`].
    async fn create_task(&self, data: CreateTask) -> Result<Task, StoreError>;

    /// Finds a task by ID
    async fn get_task(&self, id: Uuid) -> Result<Option<Task>, StoreError>;

    /// Lists a project's tasks, newest first
    async fn list_tasks(&self, project_id: Uuid) -> Result<Vec<Task>, StoreError>;

    /// Partially updates a task
    ///
    /// A provided status manages completed_at: becoming `completed`
    /// stamps it, becoming anything else clears it.
    async fn update_task(&self, id: Uuid, data: UpdateTask) -> Result<Option<Task>, StoreError>;

    /// Deletes a task
    async fn delete_task(&self, id: Uuid) -> Result<bool, StoreError>;
}

/// Meeting and meeting-note persistence operations
#[async_trait]
pub trait MeetingStore: Send + Sync {
    /// Creates a meeting with its attendee set
    async fn create_meeting(&self, data: CreateMeeting) -> Result<Meeting, StoreError>;

    /// Finds a meeting by ID
    async fn get_meeting(&self, id: Uuid) -> Result<Option<Meeting>, StoreError>;

    /// Lists a project's meetings by date then time
    async fn list_meetings(&self, project_id: Uuid) -> Result<Vec<Meeting>, StoreError>;

    /// Partially updates a meeting
    async fn update_meeting(
        &self,
        id: Uuid,
        data: UpdateMeeting,
    ) -> Result<Option<Meeting>, StoreError>;

    /// Deletes a meeting (and its note)
    async fn delete_meeting(&self, id: Uuid) -> Result<bool, StoreError>;

    /// Creates the note for a meeting; a second note for the same
    /// meeting is a [`StoreError::Conflict`]
    async fn create_meeting_note(
        &self,
        data: CreateMeetingNote,
    ) -> Result<MeetingNote, StoreError>;

    /// Finds a note by ID
    async fn get_meeting_note(&self, id: Uuid) -> Result<Option<MeetingNote>, StoreError>;

    /// Finds the note attached to a meeting
    async fn get_note_for_meeting(
        &self,
        meeting_id: Uuid,
    ) -> Result<Option<MeetingNote>, StoreError>;

    /// Partially updates a note
    async fn update_meeting_note(
        &self,
        id: Uuid,
        data: UpdateMeetingNote,
    ) -> Result<Option<MeetingNote>, StoreError>;
}

/// Template persistence operations
#[async_trait]
pub trait TemplateStore: Send + Sync {
    /// Creates a template; duplicate name is a [`StoreError::Conflict`]
    async fn create_template(&self, data: CreateTemplate) -> Result<ProjectTemplate, StoreError>;

    /// Finds a template by ID
    async fn get_template(&self, id: Uuid) -> Result<Option<ProjectTemplate>, StoreError>;

    /// Finds a template by its unique name
    async fn find_template_by_name(
        &self,
        name: &str,
    ) -> Result<Option<ProjectTemplate>, StoreError>;

    /// Lists all templates ordered by name
    async fn list_templates(&self) -> Result<Vec<ProjectTemplate>, StoreError>;
}

/// The full storage interface, one object per backend
#[async_trait]
pub trait Store:
    UserStore + ProjectStore + AreaStore + TaskStore + MeetingStore + TemplateStore
{
    /// Verifies the backend is reachable (used by the health endpoint)
    async fn ping(&self) -> Result<(), StoreError>;

    /// Short backend label for logs and health responses
    fn backend_name(&self) -> &'static str;
}

/// Derives the slug base for a project name, with a fallback for names
/// that slugify to nothing
pub(crate) fn base_slug(name: &str) -> String {
    let slug = project::slugify(name);
    if slug.is_empty() {
        "project".to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_slug_fallback() {
        assert_eq!(base_slug("!!!"), "project");
        assert_eq!(base_slug("Garden Party"), "garden-party");
    }

    #[test]
    fn test_store_error_display() {
        let err = StoreError::Invalid("area belongs to a different project".to_string());
        assert_eq!(
            err.to_string(),
            "invalid input: area belongs to a different project"
        );

        let err = StoreError::Conflict("email already registered".to_string());
        assert_eq!(err.to_string(), "conflict: email already registered");
    }
}
