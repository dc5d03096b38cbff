/// Meeting endpoints
///
/// # Endpoints
///
/// - `POST /v1/meetings` - Create a meeting (201)
/// - `GET /v1/meetings/:meeting_id` - Fetch a meeting
/// - `PUT /v1/meetings/:meeting_id` - Partially update a meeting
/// - `DELETE /v1/meetings/:meeting_id` - Delete a meeting and its note
/// - `GET /v1/meetings/:meeting_id/note` - Fetch the meeting's note
/// - `GET /v1/projects/:project_id/meetings` - List a project's meetings

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
use chrono::{NaiveDate, NaiveTime};
use planora_shared::models::meeting::{CreateMeeting, Meeting, UpdateMeeting};
use planora_shared::models::meeting_note::MeetingNote;
use planora_shared::store::{MeetingStore, ProjectStore};
use serde::Deserialize;
use uuid::Uuid;

/// Create meeting request
#[derive(Debug, Deserialize)]
pub struct CreateMeetingRequest {
    pub project_id: Option<String>,
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub attendee_ids: Option<Vec<String>>,
}

/// Update meeting request
#[derive(Debug, Deserialize)]
pub struct UpdateMeetingRequest {
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub attendee_ids: Option<Vec<String>>,
}

/// Creates a meeting
pub async fn create_meeting(
    State(state): State<AppState>,
    Json(req): Json<CreateMeetingRequest>,
) -> ApiResult<(StatusCode, Json<Meeting>)> {
    let project_id = validate::required_uuid(req.project_id.as_deref(), "project_id")?;

    if state.store.get_project(project_id).await?.is_none() {
        return Err(ApiError::NotFound("Project not found".to_string()));
    }

    let title = validate::required_string(req.title.as_deref())
        .ok_or_else(|| ApiError::BadRequest("Meeting title is required".to_string()))?;
    let date = req
        .date
        .ok_or_else(|| ApiError::BadRequest("Meeting date is required".to_string()))?;
    let time = req
        .time
        .ok_or_else(|| ApiError::BadRequest("Meeting time is required".to_string()))?;

    let meeting = state
        .store
        .create_meeting(CreateMeeting {
            project_id,
            title,
            date,
            time,
            attendee_ids: validate::parse_id_list(req.attendee_ids.as_deref()),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(meeting)))
}

/// Fetches a meeting by id
pub async fn get_meeting(
    State(state): State<AppState>,
    Path(meeting_id): Path<Uuid>,
) -> ApiResult<Json<Meeting>> {
    let meeting = state
        .store
        .get_meeting(meeting_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Meeting not found".to_string()))?;

    Ok(Json(meeting))
}

/// Partially updates a meeting
pub async fn update_meeting(
    State(state): State<AppState>,
    Path(meeting_id): Path<Uuid>,
    Json(req): Json<UpdateMeetingRequest>,
) -> ApiResult<Json<Meeting>> {
    let title = match &req.title {
        Some(raw) => Some(
            validate::required_string(Some(raw.as_str())).ok_or_else(|| {
                ApiError::BadRequest("Meeting title cannot be empty".to_string())
            })?,
        ),
        None => None,
    };

    let update = UpdateMeeting {
        title,
        date: req.date,
        time: req.time,
        attendee_ids: req
            .attendee_ids
            .as_deref()
            .map(|ids| validate::parse_id_list(Some(ids))),
    };

    let meeting = state
        .store
        .update_meeting(meeting_id, update)
        .await?
        .ok_or_else(|| ApiError::NotFound("Meeting not found".to_string()))?;

    Ok(Json(meeting))
}

/// Deletes a meeting (and its note)
pub async fn delete_meeting(
    State(state): State<AppState>,
    Path(meeting_id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    let deleted = state.store.delete_meeting(meeting_id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Meeting not found".to_string()));
    }

    Ok(Json(serde_json::json!({ "deleted": true })))
}

/// Fetches the note attached to a meeting
pub async fn get_meeting_note(
    State(state): State<AppState>,
    Path(meeting_id): Path<Uuid>,
) -> ApiResult<Json<MeetingNote>> {
    if state.store.get_meeting(meeting_id).await?.is_none() {
        return Err(ApiError::NotFound("Meeting not found".to_string()));
    }

    let note = state
        .store
        .get_note_for_meeting(meeting_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Meeting note not found".to_string()))?;

    Ok(Json(note))
}

/// Lists a project's meetings by date then time
pub async fn list_project_meetings(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
) -> ApiResult<Json<Vec<Meeting>>> {
    if state.store.get_project(project_id).await?.is_none() {
        return Err(ApiError::NotFound("Project not found".to_string()));
    }

    let meetings = state.store.list_meetings(project_id).await?;
    Ok(Json(meetings))
}
