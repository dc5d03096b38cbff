/// Task endpoints
///
/// # Endpoints
///
/// - `POST /v1/tasks` - Create a task (201, status defaults to pending)
/// - `GET /v1/tasks/:task_id` - Fetch a task
/// - `PUT /v1/tasks/:task_id` - Partially update a task
/// - `DELETE /v1/tasks/:task_id` - Delete a task
/// - `GET /v1/projects/:project_id/tasks` - List a project's tasks
///
/// Support resources accept either a newline-delimited string or an
/// array of strings. Dependency ids are stored as given.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    validate::{self, StringOrList},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use planora_shared::models::task::{CreateTask, Task, TaskStatus, UpdateTask};
use planora_shared::store::{ProjectStore, TaskStore};
use serde::Deserialize;
use uuid::Uuid;

/// Create task request
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub project_id: Option<String>,
    pub area_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub assignee_id: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub status: Option<String>,
    pub support_resources: Option<StringOrList>,
    pub depends_on: Option<Vec<String>>,
    pub recurrence_frequency: Option<String>,
    pub recurrence_interval: Option<i32>,
    pub recurrence_until: Option<NaiveDate>,
}

/// Update task request
#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    pub area_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub assignee_id: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub status: Option<String>,
    pub support_resources: Option<StringOrList>,
    pub depends_on: Option<Vec<String>>,
    pub recurrence_frequency: Option<String>,
    pub recurrence_interval: Option<i32>,
    pub recurrence_until: Option<NaiveDate>,
}

/// Creates a task
pub async fn create_task(
    State(state): State<AppState>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let project_id = validate::required_uuid(req.project_id.as_deref(), "project_id")?;

    if state.store.get_project(project_id).await?.is_none() {
        return Err(ApiError::NotFound("Project not found".to_string()));
    }

    let title = validate::required_string(req.title.as_deref())
        .ok_or_else(|| ApiError::BadRequest("Task title is required".to_string()))?;

    let status =
        validate::parse_task_status(req.status.as_deref())?.unwrap_or(TaskStatus::Pending);

    let task = state
        .store
        .create_task(CreateTask {
            project_id,
            area_id: validate::optional_uuid(req.area_id.as_deref()),
            title,
            description: validate::required_string(req.description.as_deref()),
            assignee_id: validate::optional_uuid(req.assignee_id.as_deref()),
            deadline: req.deadline,
            status,
            support_resources: validate::parse_support_resources(req.support_resources.as_ref()),
            depends_on: validate::parse_id_list(req.depends_on.as_deref()),
            recurrence_frequency: validate::parse_recurrence_frequency(
                req.recurrence_frequency.as_deref(),
            )?,
            recurrence_interval: req.recurrence_interval,
            recurrence_until: req.recurrence_until,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// Fetches a task by id
pub async fn get_task(
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
) -> ApiResult<Json<Task>> {
    let task = state
        .store
        .get_task(task_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(task))
}

/// Partially updates a task
///
/// Setting status to `completed` stamps completed_at; any other
/// status clears it.
pub async fn update_task(
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<Task>> {
    let title = match &req.title {
        Some(raw) => Some(
            validate::required_string(Some(raw.as_str()))
                .ok_or_else(|| ApiError::BadRequest("Task title cannot be empty".to_string()))?,
        ),
        None => None,
    };

    let update = UpdateTask {
        area_id: validate::optional_uuid(req.area_id.as_deref()),
        title,
        description: req.description,
        assignee_id: validate::optional_uuid(req.assignee_id.as_deref()),
        deadline: req.deadline,
        status: validate::parse_task_status(req.status.as_deref())?,
        support_resources: validate::parse_support_resources(req.support_resources.as_ref()),
        depends_on: req
            .depends_on
            .as_deref()
            .map(|ids| validate::parse_id_list(Some(ids))),
        recurrence_frequency: validate::parse_recurrence_frequency(
            req.recurrence_frequency.as_deref(),
        )?,
        recurrence_interval: req.recurrence_interval,
        recurrence_until: req.recurrence_until,
    };

    let task = state
        .store
        .update_task(task_id, update)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(task))
}

/// Deletes a task
pub async fn delete_task(
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    let deleted = state.store.delete_task(task_id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }

    Ok(Json(serde_json::json!({ "deleted": true })))
}

/// Lists a project's tasks, newest first
pub async fn list_project_tasks(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
) -> ApiResult<Json<Vec<Task>>> {
    if state.store.get_project(project_id).await?.is_none() {
        return Err(ApiError::NotFound("Project not found".to_string()));
    }

    let tasks = state.store.list_tasks(project_id).await?;
    Ok(Json(tasks))
}
