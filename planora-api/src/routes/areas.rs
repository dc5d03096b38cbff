/// Area endpoints
///
/// # Endpoints
///
/// - `POST /v1/areas` - Create an area (201)
/// - `PATCH /v1/areas` - Bulk reorder: `[{ "id": ..., "order": N }]`
/// - `GET /v1/areas/:area_id` - Fetch an area
/// - `PUT /v1/areas/:area_id` - Partially update an area
/// - `DELETE /v1/areas/:area_id` - Delete an area (tasks are detached)
/// - `GET /v1/areas/:area_id/responsibilities` - List responsibilities
/// - `GET /v1/projects/:project_id/areas` - List a project's areas

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
use planora_shared::models::area::{Area, AreaOrder, CreateArea, UpdateArea};
use planora_shared::models::responsibility::Responsibility;
use planora_shared::store::{AreaStore, ProjectStore};
use serde::Deserialize;
use uuid::Uuid;

/// Create area request
#[derive(Debug, Deserialize)]
pub struct CreateAreaRequest {
    pub project_id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub lead_id: Option<String>,
    pub participant_ids: Option<Vec<String>>,
}

/// Update area request
#[derive(Debug, Deserialize)]
pub struct UpdateAreaRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub lead_id: Option<String>,
    pub participant_ids: Option<Vec<String>>,
}

/// One entry of the bulk reorder body
#[derive(Debug, Deserialize)]
pub struct ReorderEntry {
    pub id: String,
    pub order: i32,
}

/// Creates an area at the end of its project's display order
pub async fn create_area(
    State(state): State<AppState>,
    Json(req): Json<CreateAreaRequest>,
) -> ApiResult<(StatusCode, Json<Area>)> {
    let project_id = validate::required_uuid(req.project_id.as_deref(), "project_id")?;

    if state.store.get_project(project_id).await?.is_none() {
        return Err(ApiError::NotFound("Project not found".to_string()));
    }

    let name = validate::required_string(req.name.as_deref())
        .ok_or_else(|| ApiError::BadRequest("Area name is required".to_string()))?;

    let area = state
        .store
        .create_area(CreateArea {
            project_id,
            name,
            description: validate::required_string(req.description.as_deref()),
            lead_id: validate::optional_uuid(req.lead_id.as_deref()),
            participant_ids: validate::parse_id_list(req.participant_ids.as_deref()),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(area)))
}

/// Applies a bulk display-order change
pub async fn reorder_areas(
    State(state): State<AppState>,
    Json(entries): Json<Vec<ReorderEntry>>,
) -> ApiResult<Json<Vec<Area>>> {
    let mut orders = Vec::with_capacity(entries.len());
    for entry in &entries {
        let id = validate::required_uuid(Some(entry.id.as_str()), "id")?;
        orders.push(AreaOrder {
            id,
            order: entry.order,
        });
    }

    let areas = state.store.reorder_areas(&orders).await?;
    Ok(Json(areas))
}

/// Fetches an area by id
pub async fn get_area(
    State(state): State<AppState>,
    Path(area_id): Path<Uuid>,
) -> ApiResult<Json<Area>> {
    let area = state
        .store
        .get_area(area_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Area not found".to_string()))?;

    Ok(Json(area))
}

/// Partially updates an area
pub async fn update_area(
    State(state): State<AppState>,
    Path(area_id): Path<Uuid>,
    Json(req): Json<UpdateAreaRequest>,
) -> ApiResult<Json<Area>> {
    let name = match &req.name {
        Some(raw) => Some(
            validate::required_string(Some(raw.as_str()))
                .ok_or_else(|| ApiError::BadRequest("Area name cannot be empty".to_string()))?,
        ),
        None => None,
    };

    let update = UpdateArea {
        name,
        description: req.description,
        lead_id: validate::optional_uuid(req.lead_id.as_deref()),
        participant_ids: req
            .participant_ids
            .as_deref()
            .map(|ids| validate::parse_id_list(Some(ids))),
    };

    let area = state
        .store
        .update_area(area_id, update)
        .await?
        .ok_or_else(|| ApiError::NotFound("Area not found".to_string()))?;

    Ok(Json(area))
}

/// Deletes an area; its tasks are detached, not deleted
pub async fn delete_area(
    State(state): State<AppState>,
    Path(area_id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    let deleted = state.store.delete_area(area_id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Area not found".to_string()));
    }

    Ok(Json(serde_json::json!({ "deleted": true })))
}

/// Lists a project's areas ordered by display_order
pub async fn list_project_areas(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
) -> ApiResult<Json<Vec<Area>>> {
    if state.store.get_project(project_id).await?.is_none() {
        return Err(ApiError::NotFound("Project not found".to_string()));
    }

    let areas = state.store.list_areas(project_id).await?;
    Ok(Json(areas))
}

/// Lists an area's responsibilities
pub async fn list_responsibilities(
    State(state): State<AppState>,
    Path(area_id): Path<Uuid>,
) -> ApiResult<Json<Vec<Responsibility>>> {
    if state.store.get_area(area_id).await?.is_none() {
        return Err(ApiError::NotFound("Area not found".to_string()));
    }

    let responsibilities = state.store.list_responsibilities(area_id).await?;
    Ok(Json(responsibilities))
}
