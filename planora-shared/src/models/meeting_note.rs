/// Meeting note model
///
/// Exactly one note per meeting (unique meeting_id). Notes are created
/// and updated but never independently deleted; they go away with
/// their meeting.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Note attached to a meeting
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MeetingNote {
    /// Unique note ID
    pub id: Uuid,

    /// Owning meeting (one-to-one)
    pub meeting_id: Uuid,

    /// Note body
    pub content: String,

    /// Optional agenda text
    pub agenda: Option<String>,

    /// Optional decisions text
    pub decisions: Option<String>,

    /// Optional action-item lines
    pub action_items: Option<Vec<String>>,

    /// User who wrote the note
    pub created_by: Uuid,

    /// When the note was created
    pub created_at: DateTime<Utc>,

    /// When the note was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a meeting note
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMeetingNote {
    /// Owning meeting
    pub meeting_id: Uuid,

    /// Note body
    pub content: String,

    /// Optional agenda text
    pub agenda: Option<String>,

    /// Optional decisions text
    pub decisions: Option<String>,

    /// Optional action-item lines
    pub action_items: Option<Vec<String>>,

    /// Authoring user
    pub created_by: Uuid,
}

/// Input for updating a meeting note
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateMeetingNote {
    /// New body
    pub content: Option<String>,

    /// New agenda text
    pub agenda: Option<String>,

    /// New decisions text
    pub decisions: Option<String>,

    /// Replacement action-item lines
    pub action_items: Option<Vec<String>>,
}
