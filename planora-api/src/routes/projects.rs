/// Project endpoints
///
/// # Endpoints
///
/// - `GET /v1/projects` - List projects
/// - `POST /v1/projects` - Create a project (201)
/// - `GET /v1/projects/:project_id` - Fetch a project
/// - `PUT /v1/projects/:project_id` - Partially update a project
/// - `POST /v1/projects/:project_id/join` - Acting user joins
/// - `DELETE /v1/projects/:project_id/join` - Acting user leaves
///
/// Projects have no delete endpoint; a finished project is marked
/// `completed` or `cancelled` instead.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    validate,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::NaiveDate;
use planora_shared::auth::middleware::AuthContext;
use planora_shared::models::project::{
    CreateProject, Project, ProjectStatus, ProjectType, UpdateProject,
};
use planora_shared::store::ProjectStore;
use serde::Deserialize;
use uuid::Uuid;

/// Create project request
#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub project_type: Option<String>,
    pub status: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub participant_ids: Option<Vec<String>>,
}

/// Update project request
#[derive(Debug, Deserialize)]
pub struct UpdateProjectRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub project_type: Option<String>,
    pub status: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub participant_ids: Option<Vec<String>>,
}

/// Lists all projects, newest first
pub async fn list_projects(State(state): State<AppState>) -> ApiResult<Json<Vec<Project>>> {
    let projects = state.store.list_projects().await?;
    Ok(Json(projects))
}

/// Creates a project
pub async fn create_project(
    State(state): State<AppState>,
    Json(req): Json<CreateProjectRequest>,
) -> ApiResult<(StatusCode, Json<Project>)> {
    let name = validate::required_string(req.name.as_deref())
        .ok_or_else(|| ApiError::BadRequest("Project name is required".to_string()))?;

    let project_type =
        validate::parse_project_type(req.project_type.as_deref())?.unwrap_or(ProjectType::Custom);
    let status = validate::parse_project_status(req.status.as_deref())?
        .unwrap_or(ProjectStatus::InPlanning);

    let project = state
        .store
        .create_project(CreateProject {
            name,
            project_type,
            status,
            description: validate::required_string(req.description.as_deref()),
            start_date: req.start_date,
            end_date: req.end_date,
            participant_ids: validate::parse_id_list(req.participant_ids.as_deref()),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(project)))
}

/// Fetches a project by id
pub async fn get_project(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
) -> ApiResult<Json<Project>> {
    let project = state
        .store
        .get_project(project_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    Ok(Json(project))
}

/// Partially updates a project
pub async fn update_project(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
    Json(req): Json<UpdateProjectRequest>,
) -> ApiResult<Json<Project>> {
    let name = match &req.name {
        Some(raw) => Some(validate::required_string(Some(raw.as_str())).ok_or_else(|| {
            ApiError::BadRequest("Project name cannot be empty".to_string())
        })?),
        None => None,
    };

    let update = UpdateProject {
        name,
        project_type: validate::parse_project_type(req.project_type.as_deref())?,
        status: validate::parse_project_status(req.status.as_deref())?,
        description: req.description,
        start_date: req.start_date,
        end_date: req.end_date,
        participant_ids: req
            .participant_ids
            .as_deref()
            .map(|ids| validate::parse_id_list(Some(ids))),
    };

    let project = state
        .store
        .update_project(project_id, update)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    Ok(Json(project))
}

/// Adds the acting user to the participant set
pub async fn join_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(project_id): Path<Uuid>,
) -> ApiResult<Json<Project>> {
    let project = state
        .store
        .add_project_participant(project_id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    Ok(Json(project))
}

/// Removes the acting user from the participant set
pub async fn leave_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(project_id): Path<Uuid>,
) -> ApiResult<Json<Project>> {
    let project = state
        .store
        .remove_project_participant(project_id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    Ok(Json(project))
}
