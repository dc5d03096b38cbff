/// Meeting model
///
/// Meetings belong to a project and carry an attendee set. Notes are a
/// separate one-to-one record, see `meeting_note`.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE meetings (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     project_id UUID NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
///     title VARCHAR(255) NOT NULL,
///     meeting_date DATE NOT NULL,
///     meeting_time TIME NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
///
/// CREATE TABLE meeting_attendees (
///     meeting_id UUID NOT NULL REFERENCES meetings(id) ON DELETE CASCADE,
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     PRIMARY KEY (meeting_id, user_id)
/// );
/// ```

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Meeting record with its attendee set
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Meeting {
    /// Unique meeting ID
    pub id: Uuid,

    /// Owning project
    pub project_id: Uuid,

    /// Meeting title
    pub title: String,

    /// Calendar date
    #[sqlx(rename = "meeting_date")]
    pub date: NaiveDate,

    /// Time of day
    #[sqlx(rename = "meeting_time")]
    pub time: NaiveTime,

    /// Attendee user ids (filled from the junction relation)
    #[sqlx(default)]
    #[serde(default)]
    pub attendee_ids: Vec<Uuid>,

    /// When the meeting was created
    pub created_at: DateTime<Utc>,

    /// When the meeting was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a meeting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMeeting {
    /// Owning project
    pub project_id: Uuid,

    /// Meeting title
    pub title: String,

    /// Calendar date
    pub date: NaiveDate,

    /// Time of day
    pub time: NaiveTime,

    /// Attendee user ids
    #[serde(default)]
    pub attendee_ids: Vec<Uuid>,
}

/// Input for updating a meeting
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateMeeting {
    /// New title
    pub title: Option<String>,

    /// New date
    pub date: Option<NaiveDate>,

    /// New time
    pub time: Option<NaiveTime>,

    /// Replacement attendee set
    pub attendee_ids: Option<Vec<Uuid>>,
}
