/// Project model
///
/// Projects are the top-level planning unit. Every project has a
/// unique URL slug derived from its name; participants are a
/// many-to-many relation against users.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE project_type AS ENUM ('meetup', 'conference', 'property', 'custom');
/// CREATE TYPE project_status AS ENUM ('in_planning', 'active', 'completed', 'cancelled');
///
/// CREATE TABLE projects (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name VARCHAR(255) NOT NULL,
///     slug VARCHAR(255) NOT NULL UNIQUE,
///     project_type project_type NOT NULL DEFAULT 'custom',
///     status project_status NOT NULL DEFAULT 'in_planning',
///     description TEXT,
///     start_date DATE,
///     end_date DATE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
///
/// CREATE TABLE project_participants (
///     project_id UUID NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     PRIMARY KEY (project_id, user_id)
/// );
/// ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of project being planned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "project_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    /// Single-evening community meetup
    Meetup,

    /// Multi-day conference
    Conference,

    /// Property/venue project
    Property,

    /// Anything else
    Custom,
}

impl ProjectType {
    /// Converts type to string for display and storage
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Meetup => "meetup",
            ProjectType::Conference => "conference",
            ProjectType::Property => "property",
            ProjectType::Custom => "custom",
        }
    }

    /// Parses a wire-format string, None on unknown values
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "meetup" => Some(ProjectType::Meetup),
            "conference" => Some(ProjectType::Conference),
            "property" => Some(ProjectType::Property),
            "custom" => Some(ProjectType::Custom),
            _ => None,
        }
    }
}

/// Project lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "project_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Being scoped, default for new projects
    InPlanning,

    /// Actively running
    Active,

    /// Finished
    Completed,

    /// Abandoned
    Cancelled,
}

impl ProjectStatus {
    /// Converts status to string for display and storage
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::InPlanning => "in_planning",
            ProjectStatus::Active => "active",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Cancelled => "cancelled",
        }
    }

    /// Parses a wire-format string, None on unknown values
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "in_planning" => Some(ProjectStatus::InPlanning),
            "active" => Some(ProjectStatus::Active),
            "completed" => Some(ProjectStatus::Completed),
            "cancelled" => Some(ProjectStatus::Cancelled),
            _ => None,
        }
    }
}

/// Project record with its participant set
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    /// Unique project ID
    pub id: Uuid,

    /// Human-readable project name
    pub name: String,

    /// Unique URL slug; collisions get an incrementing numeric suffix
    pub slug: String,

    /// Kind of project
    pub project_type: ProjectType,

    /// Lifecycle status
    pub status: ProjectStatus,

    /// Optional free-text description
    pub description: Option<String>,

    /// Optional planned start date
    pub start_date: Option<NaiveDate>,

    /// Optional planned end date
    pub end_date: Option<NaiveDate>,

    /// Participant user ids (filled from the junction relation)
    #[sqlx(default)]
    #[serde(default)]
    pub participant_ids: Vec<Uuid>,

    /// When the project was created
    pub created_at: DateTime<Utc>,

    /// When the project was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProject {
    /// Project name; the slug is derived from it
    pub name: String,

    /// Kind of project (defaults to custom)
    #[serde(default = "default_project_type")]
    pub project_type: ProjectType,

    /// Initial status (defaults to in_planning)
    #[serde(default = "default_project_status")]
    pub status: ProjectStatus,

    /// Optional description
    pub description: Option<String>,

    /// Optional start date
    pub start_date: Option<NaiveDate>,

    /// Optional end date
    pub end_date: Option<NaiveDate>,

    /// Initial participant user ids
    #[serde(default)]
    pub participant_ids: Vec<Uuid>,
}

fn default_project_type() -> ProjectType {
    ProjectType::Custom
}

fn default_project_status() -> ProjectStatus {
    ProjectStatus::InPlanning
}

/// Input for updating a project
///
/// All fields optional; only provided fields are written. A provided
/// participant list replaces the stored set. Renaming does not
/// re-derive the slug.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProject {
    /// New name
    pub name: Option<String>,

    /// New project type
    pub project_type: Option<ProjectType>,

    /// New status
    pub status: Option<ProjectStatus>,

    /// New description
    pub description: Option<String>,

    /// New start date
    pub start_date: Option<NaiveDate>,

    /// New end date
    pub end_date: Option<NaiveDate>,

    /// Replacement participant set
    pub participant_ids: Option<Vec<Uuid>>,
}

/// Derives a URL slug from a project name
///
/// Lowercases, maps runs of non-alphanumeric characters to single
/// hyphens, and trims leading/trailing hyphens. Uniqueness is the
/// store's job (it appends `-1`, `-2`, ... on collision).
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_was_hyphen = true;

    for c in name.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }

    slug.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_type_roundtrip() {
        for t in [
            ProjectType::Meetup,
            ProjectType::Conference,
            ProjectType::Property,
            ProjectType::Custom,
        ] {
            assert_eq!(ProjectType::parse(t.as_str()), Some(t));
        }
        assert_eq!(ProjectType::parse("party"), None);
    }

    #[test]
    fn test_project_status_roundtrip() {
        for s in [
            ProjectStatus::InPlanning,
            ProjectStatus::Active,
            ProjectStatus::Completed,
            ProjectStatus::Cancelled,
        ] {
            assert_eq!(ProjectStatus::parse(s.as_str()), Some(s));
        }
        assert_eq!(ProjectStatus::parse("paused"), None);
    }

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Spring Meetup"), "spring-meetup");
    }

    #[test]
    fn test_slugify_collapses_separators() {
        assert_eq!(slugify("Q3 -- Roadmap  (draft)"), "q3-roadmap-draft");
    }

    #[test]
    fn test_slugify_trims_hyphens() {
        assert_eq!(slugify("  hello  "), "hello");
        assert_eq!(slugify("!!important!!"), "important");
    }

    #[test]
    fn test_slugify_preserves_digits() {
        assert_eq!(slugify("Conf 2026"), "conf-2026");
    }
}
