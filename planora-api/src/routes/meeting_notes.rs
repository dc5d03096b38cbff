/// Meeting note endpoints
///
/// # Endpoints
///
/// - `POST /v1/meeting-notes` - Create the note for a meeting (201);
///   a second note for the same meeting is a 409
/// - `GET /v1/meeting-notes/:note_id` - Fetch a note
/// - `PUT /v1/meeting-notes/:note_id` - Partially update a note
///
/// Notes have no delete endpoint; they go away with their meeting.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    validate::{self, StringOrList},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use planora_shared::auth::middleware::AuthContext;
use planora_shared::models::meeting_note::{CreateMeetingNote, MeetingNote, UpdateMeetingNote};
use planora_shared::store::MeetingStore;
use serde::Deserialize;
use uuid::Uuid;

/// Create note request
#[derive(Debug, Deserialize)]
pub struct CreateNoteRequest {
    pub meeting_id: Option<String>,
    pub content: Option<String>,
    pub agenda: Option<String>,
    pub decisions: Option<String>,
    pub action_items: Option<StringOrList>,
}

/// Update note request
#[derive(Debug, Deserialize)]
pub struct UpdateNoteRequest {
    pub content: Option<String>,
    pub agenda: Option<String>,
    pub decisions: Option<String>,
    pub action_items: Option<StringOrList>,
}

/// Creates the note for a meeting; the acting user is the author
pub async fn create_note(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateNoteRequest>,
) -> ApiResult<(StatusCode, Json<MeetingNote>)> {
    let meeting_id = validate::required_uuid(req.meeting_id.as_deref(), "meeting_id")?;

    if state.store.get_meeting(meeting_id).await?.is_none() {
        return Err(ApiError::NotFound("Meeting not found".to_string()));
    }

    let content = validate::required_string(req.content.as_deref())
        .ok_or_else(|| ApiError::BadRequest("Note content is required".to_string()))?;

    let note = state
        .store
        .create_meeting_note(CreateMeetingNote {
            meeting_id,
            content,
            agenda: validate::required_string(req.agenda.as_deref()),
            decisions: validate::required_string(req.decisions.as_deref()),
            action_items: validate::parse_support_resources(req.action_items.as_ref()),
            created_by: auth.user_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(note)))
}

/// Fetches a note by id
pub async fn get_note(
    State(state): State<AppState>,
    Path(note_id): Path<Uuid>,
) -> ApiResult<Json<MeetingNote>> {
    let note = state
        .store
        .get_meeting_note(note_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Meeting note not found".to_string()))?;

    Ok(Json(note))
}

/// Partially updates a note
pub async fn update_note(
    State(state): State<AppState>,
    Path(note_id): Path<Uuid>,
    Json(req): Json<UpdateNoteRequest>,
) -> ApiResult<Json<MeetingNote>> {
    let content = match &req.content {
        Some(raw) => Some(
            validate::required_string(Some(raw.as_str())).ok_or_else(|| {
                ApiError::BadRequest("Note content cannot be empty".to_string())
            })?,
        ),
        None => None,
    };

    let update = UpdateMeetingNote {
        content,
        agenda: req.agenda,
        decisions: req.decisions,
        action_items: validate::parse_support_resources(req.action_items.as_ref()),
    };

    let note = state
        .store
        .update_meeting_note(note_id, update)
        .await?
        .ok_or_else(|| ApiError::NotFound("Meeting note not found".to_string()))?;

    Ok(Json(note))
}
