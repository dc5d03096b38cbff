/// Area model
///
/// Areas subdivide a project (logistics, program, budget, ...). They
/// carry a manual display order for re-sequencing in list views, an
/// optional lead, and a participant set.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE areas (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     project_id UUID NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
///     name VARCHAR(255) NOT NULL,
///     description TEXT,
///     lead_id UUID REFERENCES users(id) ON DELETE SET NULL,
///     display_order INTEGER NOT NULL DEFAULT 0,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
///
/// CREATE TABLE area_participants (
///     area_id UUID NOT NULL REFERENCES areas(id) ON DELETE CASCADE,
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     PRIMARY KEY (area_id, user_id)
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Project area with its participant set
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Area {
    /// Unique area ID
    pub id: Uuid,

    /// Owning project
    pub project_id: Uuid,

    /// Area name
    pub name: String,

    /// Optional description
    pub description: Option<String>,

    /// Optional lead user
    pub lead_id: Option<Uuid>,

    /// Position within the project's area list
    pub display_order: i32,

    /// Participant user ids (filled from the junction relation)
    #[sqlx(default)]
    #[serde(default)]
    pub participant_ids: Vec<Uuid>,

    /// When the area was created
    pub created_at: DateTime<Utc>,

    /// When the area was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new area
///
/// The store assigns the next display_order within the project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateArea {
    /// Owning project
    pub project_id: Uuid,

    /// Area name
    pub name: String,

    /// Optional description
    pub description: Option<String>,

    /// Optional lead user
    pub lead_id: Option<Uuid>,

    /// Initial participant user ids
    #[serde(default)]
    pub participant_ids: Vec<Uuid>,
}

/// Input for updating an area
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateArea {
    /// New name
    pub name: Option<String>,

    /// New description
    pub description: Option<String>,

    /// New lead user
    pub lead_id: Option<Uuid>,

    /// Replacement participant set
    pub participant_ids: Option<Vec<Uuid>>,
}

/// One entry of a bulk reorder request
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AreaOrder {
    /// Area to move
    pub id: Uuid,

    /// New display_order value
    pub order: i32,
}
