/// Template expansion
///
/// Turns a stored [`ProjectTemplate`] into a fresh project with its
/// areas, responsibilities, and tasks, working through the `Store`
/// trait so either backend can host the result.
///
/// # Member resolution
///
/// Each named team member resolves against existing users by exact
/// email, then by case-insensitive name; otherwise a provisional user
/// is created (no credentials, initials derived from the name). The
/// first member of an area becomes its lead, the rest participants.
///
/// # Failure behavior
///
/// Expansion is sequential with no rollback: an error mid-way leaves
/// the rows created so far in place and surfaces the error. Callers
/// that need atomicity should delete the partially-built project.

use tracing::info;

use crate::models::area::CreateArea;
use crate::models::project::{slugify, CreateProject, Project, ProjectStatus};
use crate::models::responsibility::CreateResponsibility;
use crate::models::task::{CreateTask, TaskStatus};
use crate::models::template::{ProjectTemplate, TemplateMember};
use crate::models::user::{CreateUser, User};
use crate::store::{AreaStore, ProjectStore, Store, StoreError, TaskStore, UserStore};

/// Expands a template into a new project
///
/// `project_name` overrides the template name when provided; the
/// project's slug is derived from whichever name wins.
pub async fn instantiate_template(
    store: &dyn Store,
    template: &ProjectTemplate,
    project_name: Option<String>,
) -> Result<Project, StoreError> {
    let name = project_name.unwrap_or_else(|| template.name.clone());

    let project = store
        .create_project(CreateProject {
            name,
            project_type: template.project_type,
            status: ProjectStatus::InPlanning,
            description: None,
            start_date: None,
            end_date: None,
            participant_ids: vec![],
        })
        .await?;

    for template_area in &template.body.areas {
        let mut members = Vec::with_capacity(template_area.team_members.len());
        for member in &template_area.team_members {
            members.push(resolve_member(store, member).await?);
        }

        let lead_id = members.first().map(|u| u.id);
        let participant_ids = members.iter().skip(1).map(|u| u.id).collect();

        let area = store
            .create_area(CreateArea {
                project_id: project.id,
                name: template_area.name.clone(),
                description: template_area.description.clone(),
                lead_id,
                participant_ids,
            })
            .await?;

        for template_responsibility in &template_area.responsibilities {
            store
                .create_responsibility(CreateResponsibility {
                    area_id: area.id,
                    name: template_responsibility.name.clone(),
                    description: template_responsibility.description.clone(),
                })
                .await?;

            for template_task in &template_responsibility.tasks {
                store
                    .create_task(CreateTask {
                        project_id: project.id,
                        area_id: Some(area.id),
                        title: template_task.title.clone(),
                        description: join_description(
                            template_task.description.as_deref(),
                            template_task.notes.as_deref(),
                        ),
                        assignee_id: None,
                        deadline: None,
                        status: map_template_state(template_task.state.as_deref()),
                        support_resources: None,
                        depends_on: vec![],
                        recurrence_frequency: None,
                        recurrence_interval: None,
                        recurrence_until: None,
                    })
                    .await?;
            }
        }
    }

    info!(
        template = %template.name,
        project_id = %project.id,
        slug = %project.slug,
        "Template instantiated"
    );

    // return the enriched record, including rows created above
    store
        .get_project(project.id)
        .await?
        .ok_or_else(|| StoreError::Invalid("Project vanished during expansion".to_string()))
}

/// Resolves a named team member to a user, creating a provisional
/// account when nothing matches
async fn resolve_member(store: &dyn Store, member: &TemplateMember) -> Result<User, StoreError> {
    if let Some(email) = &member.email {
        if let Some(user) = store.find_user_by_email(email).await? {
            return Ok(user);
        }
    }

    if let Some(user) = store.find_user_by_name(&member.name).await? {
        return Ok(user);
    }

    let email = member
        .email
        .clone()
        .unwrap_or_else(|| format!("{}@planora.local", member_slug(&member.name)));

    store
        .create_user(CreateUser {
            email,
            name: member.name.clone(),
            initials: User::initials_for(&member.name),
            password_hash: None,
            avatar_url: None,
            handle: None,
            wallet_address: None,
        })
        .await
}

fn member_slug(name: &str) -> String {
    let slug = slugify(name);
    if slug.is_empty() {
        "member".to_string()
    } else {
        slug
    }
}

/// Maps a template state label onto a task status
///
/// Three-way mapping: `Done` → completed, `In Progress` → in_progress,
/// anything else (including absent) → pending.
fn map_template_state(state: Option<&str>) -> TaskStatus {
    match state.map(str::trim) {
        Some("Done") => TaskStatus::Completed,
        Some("In Progress") => TaskStatus::InProgress,
        _ => TaskStatus::Pending,
    }
}

/// Joins description and notes with a blank line when both are present
fn join_description(description: Option<&str>, notes: Option<&str>) -> Option<String> {
    match (description, notes) {
        (Some(d), Some(n)) => Some(format!("{}\n\n{}", d, n)),
        (Some(d), None) => Some(d.to_string()),
        (None, Some(n)) => Some(n.to_string()),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_template_state() {
        assert_eq!(map_template_state(Some("Done")), TaskStatus::Completed);
        assert_eq!(
            map_template_state(Some("In Progress")),
            TaskStatus::InProgress
        );
        assert_eq!(map_template_state(Some("Not Started")), TaskStatus::Pending);
        assert_eq!(map_template_state(Some("anything")), TaskStatus::Pending);
        assert_eq!(map_template_state(None), TaskStatus::Pending);
    }

    #[test]
    fn test_map_template_state_trims() {
        assert_eq!(map_template_state(Some(" Done ")), TaskStatus::Completed);
    }

    #[test]
    fn test_join_description() {
        assert_eq!(
            join_description(Some("Order chairs"), Some("ask for a discount")),
            Some("Order chairs\n\nask for a discount".to_string())
        );
        assert_eq!(
            join_description(Some("Order chairs"), None),
            Some("Order chairs".to_string())
        );
        assert_eq!(
            join_description(None, Some("ask for a discount")),
            Some("ask for a discount".to_string())
        );
        assert_eq!(join_description(None, None), None);
    }

    #[test]
    fn test_member_slug_fallback() {
        assert_eq!(member_slug("Ana Ruiz"), "ana-ruiz");
        assert_eq!(member_slug("!!!"), "member");
    }
}
