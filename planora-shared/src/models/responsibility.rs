/// Responsibility model
///
/// A grouping label for tasks within an area. Created by template
/// expansion; listed per area, never independently deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Responsibility record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Responsibility {
    /// Unique responsibility ID
    pub id: Uuid,

    /// Owning area
    pub area_id: Uuid,

    /// Label
    pub name: String,

    /// Optional description
    pub description: Option<String>,

    /// When the responsibility was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a responsibility
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateResponsibility {
    /// Owning area
    pub area_id: Uuid,

    /// Label
    pub name: String,

    /// Optional description
    pub description: Option<String>,
}
