/// Template endpoints
///
/// # Endpoints
///
/// - `GET /v1/templates` - List templates
/// - `GET /v1/templates/:template_id` - Fetch a template
/// - `POST /v1/templates/:template_id/instantiate` - Expand a template
///   into a new project (201)
///
/// The request body for instantiation is optional; a provided `name`
/// overrides the template name for the created project.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    validate,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use planora_shared::models::project::Project;
use planora_shared::models::template::ProjectTemplate;
use planora_shared::store::TemplateStore;
use planora_shared::template::instantiate_template;
use serde::Deserialize;
use uuid::Uuid;

/// Instantiate request
#[derive(Debug, Default, Deserialize)]
pub struct InstantiateRequest {
    /// Name for the created project; defaults to the template name
    pub name: Option<String>,
}

/// Lists all templates
pub async fn list_templates(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ProjectTemplate>>> {
    let templates = state.store.list_templates().await?;
    Ok(Json(templates))
}

/// Fetches a template by id
pub async fn get_template(
    State(state): State<AppState>,
    Path(template_id): Path<Uuid>,
) -> ApiResult<Json<ProjectTemplate>> {
    let template = state
        .store
        .get_template(template_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Template not found".to_string()))?;

    Ok(Json(template))
}

/// Expands a template into a new project with its areas,
/// responsibilities, and tasks
pub async fn instantiate(
    State(state): State<AppState>,
    Path(template_id): Path<Uuid>,
    body: Option<Json<InstantiateRequest>>,
) -> ApiResult<(StatusCode, Json<Project>)> {
    let template = state
        .store
        .get_template(template_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Template not found".to_string()))?;

    let req = body.map(|Json(req)| req).unwrap_or_default();
    let name = validate::required_string(req.name.as_deref());

    let project = instantiate_template(state.store.as_ref(), &template, name).await?;

    Ok((StatusCode::CREATED, Json(project)))
}
