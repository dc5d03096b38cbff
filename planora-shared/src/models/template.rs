/// Project template model
///
/// A template is a reusable project blueprint: areas, each with named
/// team members and responsibilities, each with tasks. The nested body
/// is stored as a JSONB column and expanded into real rows by
/// `crate::template::instantiate_template`.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE project_templates (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name VARCHAR(255) NOT NULL UNIQUE,
///     project_type project_type NOT NULL DEFAULT 'custom',
///     body JSONB NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;

use super::project::ProjectType;

/// Stored template record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProjectTemplate {
    /// Unique template ID
    pub id: Uuid,

    /// Unique template name
    pub name: String,

    /// Project type the template instantiates
    pub project_type: ProjectType,

    /// Nested template body (areas → responsibilities → tasks)
    pub body: Json<TemplateBody>,

    /// When the template was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a template
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTemplate {
    /// Unique template name
    pub name: String,

    /// Project type the template instantiates
    pub project_type: ProjectType,

    /// Nested template body
    pub body: TemplateBody,
}

/// Root of a template document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateBody {
    /// Areas to create, in display order
    #[serde(default)]
    pub areas: Vec<TemplateArea>,
}

/// One area of a template
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateArea {
    /// Area name
    pub name: String,

    /// Optional description
    pub description: Option<String>,

    /// Named team members; the first becomes the area lead, the rest
    /// participants. Names resolve against existing users by email,
    /// then case-insensitive name, else a provisional user is created.
    #[serde(default)]
    pub team_members: Vec<TemplateMember>,

    /// Responsibilities within the area
    #[serde(default)]
    pub responsibilities: Vec<TemplateResponsibility>,
}

/// A named team member in a template
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateMember {
    /// Display name
    pub name: String,

    /// Optional email, used for exact-match resolution
    pub email: Option<String>,
}

/// One responsibility of a template area
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateResponsibility {
    /// Responsibility label
    pub name: String,

    /// Optional description
    pub description: Option<String>,

    /// Tasks under this responsibility
    #[serde(default)]
    pub tasks: Vec<TemplateTask>,
}

/// One task of a template responsibility
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateTask {
    /// Task title
    pub title: String,

    /// Optional description; joined with `notes` by a blank line when
    /// both are present
    pub description: Option<String>,

    /// Workflow state label ("Done", "In Progress", anything else
    /// maps to pending)
    pub state: Option<String>,

    /// Optional stage label, informational only
    pub stage: Option<String>,

    /// Optional notes, appended to the description
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_body_deserializes_sparse_json() {
        let body: TemplateBody = serde_json::from_str(
            r#"{
                "areas": [
                    {
                        "name": "Logistics",
                        "responsibilities": [
                            { "name": "Venue", "tasks": [{ "title": "Book hall" }] }
                        ]
                    }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(body.areas.len(), 1);
        assert!(body.areas[0].team_members.is_empty());
        assert_eq!(body.areas[0].responsibilities[0].tasks[0].title, "Book hall");
        assert!(body.areas[0].responsibilities[0].tasks[0].state.is_none());
    }
}
