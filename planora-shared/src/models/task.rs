/// Task model
///
/// Tasks are the unit of work inside a project, optionally attached to
/// one of its areas. Status transitions manage the completion
/// timestamp: it is set exactly when status becomes `completed` and
/// cleared when status becomes anything else.
///
/// Dependency ids and the recurrence descriptor are stored and
/// returned as-is: nothing checks dependency existence or acyclicity,
/// and nothing expands recurrences into future occurrences.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE task_status AS ENUM ('pending', 'in_progress', 'blocked', 'completed');
/// CREATE TYPE recurrence_frequency AS ENUM ('daily', 'weekly', 'monthly');
///
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     project_id UUID NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
///     area_id UUID REFERENCES areas(id) ON DELETE SET NULL,
///     title VARCHAR(512) NOT NULL,
///     description TEXT,
///     assignee_id UUID REFERENCES users(id) ON DELETE SET NULL,
///     deadline DATE,
///     status task_status NOT NULL DEFAULT 'pending',
///     support_resources TEXT[],
///     recurrence_frequency recurrence_frequency,
///     recurrence_interval INTEGER,
///     recurrence_until DATE,
///     completed_at TIMESTAMPTZ,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
///
/// CREATE TABLE task_dependencies (
///     task_id UUID NOT NULL REFERENCES tasks(id) ON DELETE CASCADE,
///     depends_on_id UUID NOT NULL,
///     PRIMARY KEY (task_id, depends_on_id)
/// );
/// ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Task workflow status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started, default for new tasks
    Pending,

    /// Being worked on
    InProgress,

    /// Waiting on something
    Blocked,

    /// Done; completed_at is set while in this status
    Completed,
}

impl TaskStatus {
    /// Converts status to string for display and storage
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Blocked => "blocked",
            TaskStatus::Completed => "completed",
        }
    }

    /// Parses a wire-format string, None on unknown values
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(TaskStatus::Pending),
            "in_progress" => Some(TaskStatus::InProgress),
            "blocked" => Some(TaskStatus::Blocked),
            "completed" => Some(TaskStatus::Completed),
            _ => None,
        }
    }
}

/// How often a recurring task repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "recurrence_frequency", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceFrequency {
    Daily,
    Weekly,
    Monthly,
}

impl RecurrenceFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecurrenceFrequency::Daily => "daily",
            RecurrenceFrequency::Weekly => "weekly",
            RecurrenceFrequency::Monthly => "monthly",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "daily" => Some(RecurrenceFrequency::Daily),
            "weekly" => Some(RecurrenceFrequency::Weekly),
            "monthly" => Some(RecurrenceFrequency::Monthly),
            _ => None,
        }
    }
}

/// Task record with its dependency set
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID
    pub id: Uuid,

    /// Owning project
    pub project_id: Uuid,

    /// Optional area; must belong to the same project when set
    pub area_id: Option<Uuid>,

    /// Task title
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Optional assignee
    pub assignee_id: Option<Uuid>,

    /// Optional deadline
    pub deadline: Option<NaiveDate>,

    /// Workflow status
    pub status: TaskStatus,

    /// Free-text support resource lines
    pub support_resources: Option<Vec<String>>,

    /// Ids of tasks blocking this one (stored as given, unvalidated)
    #[sqlx(default)]
    #[serde(default)]
    pub depends_on: Vec<Uuid>,

    /// Recurrence descriptor, stored but never expanded
    pub recurrence_frequency: Option<RecurrenceFrequency>,
    pub recurrence_interval: Option<i32>,
    pub recurrence_until: Option<NaiveDate>,

    /// Set while status is completed, None otherwise
    pub completed_at: Option<DateTime<Utc>>,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    /// Owning project
    pub project_id: Uuid,

    /// Optional area within the project
    pub area_id: Option<Uuid>,

    /// Task title
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Optional assignee
    pub assignee_id: Option<Uuid>,

    /// Optional deadline
    pub deadline: Option<NaiveDate>,

    /// Initial status (defaults to pending)
    #[serde(default = "default_status")]
    pub status: TaskStatus,

    /// Support resource lines
    pub support_resources: Option<Vec<String>>,

    /// Blocking task ids
    #[serde(default)]
    pub depends_on: Vec<Uuid>,

    /// Recurrence descriptor
    pub recurrence_frequency: Option<RecurrenceFrequency>,
    pub recurrence_interval: Option<i32>,
    pub recurrence_until: Option<NaiveDate>,
}

fn default_status() -> TaskStatus {
    TaskStatus::Pending
}

/// Input for updating a task
///
/// Only provided fields are written. A provided `depends_on` replaces
/// the stored set. A provided status manages completed_at.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTask {
    /// Move to a different area (must belong to the same project)
    pub area_id: Option<Uuid>,

    /// New title
    pub title: Option<String>,

    /// New description
    pub description: Option<String>,

    /// New assignee
    pub assignee_id: Option<Uuid>,

    /// New deadline
    pub deadline: Option<NaiveDate>,

    /// New status
    pub status: Option<TaskStatus>,

    /// Replacement support resource lines
    pub support_resources: Option<Vec<String>>,

    /// Replacement dependency set
    pub depends_on: Option<Vec<Uuid>>,

    /// Recurrence descriptor updates
    pub recurrence_frequency: Option<RecurrenceFrequency>,
    pub recurrence_interval: Option<i32>,
    pub recurrence_until: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_status_as_str() {
        assert_eq!(TaskStatus::Pending.as_str(), "pending");
        assert_eq!(TaskStatus::InProgress.as_str(), "in_progress");
        assert_eq!(TaskStatus::Blocked.as_str(), "blocked");
        assert_eq!(TaskStatus::Completed.as_str(), "completed");
    }

    #[test]
    fn test_task_status_parse() {
        assert_eq!(TaskStatus::parse("in_progress"), Some(TaskStatus::InProgress));
        assert_eq!(TaskStatus::parse("done"), None);
    }

    #[test]
    fn test_recurrence_frequency_roundtrip() {
        for f in [
            RecurrenceFrequency::Daily,
            RecurrenceFrequency::Weekly,
            RecurrenceFrequency::Monthly,
        ] {
            assert_eq!(RecurrenceFrequency::parse(f.as_str()), Some(f));
        }
        assert_eq!(RecurrenceFrequency::parse("yearly"), None);
    }

    #[test]
    fn test_create_task_default_status() {
        let task: CreateTask = serde_json::from_value(serde_json::json!({
            "project_id": Uuid::new_v4(),
            "title": "Write report"
        }))
        .unwrap();

        assert_eq!(task.status, TaskStatus::Pending);
        assert!(task.assignee_id.is_none());
        assert!(task.depends_on.is_empty());
    }
}
