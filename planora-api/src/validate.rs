/// Request validation helpers
///
/// Small normalizers applied by handlers before anything reaches the
/// store. Conventions:
///
/// - Required text fields go through [`required_string`]; empty or
///   whitespace-only input counts as absent.
/// - Optional id fields go through [`optional_uuid`]; a malformed UUID
///   is treated as "not provided", while required id fields use
///   [`required_uuid`] and fail with a 400.
/// - Enum fields use the `parse_*` helpers, which produce a 400 with
///   the offending value on unknown variants.

use serde::Deserialize;
use uuid::Uuid;

use planora_shared::models::project::{ProjectStatus, ProjectType};
use planora_shared::models::task::{RecurrenceFrequency, TaskStatus};

use crate::error::ApiError;

/// Trims a required text field; None when absent or empty
pub fn required_string(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parses an optional UUID field; malformed input counts as absent
pub fn optional_uuid(value: Option<&str>) -> Option<Uuid> {
    Uuid::parse_str(value?).ok()
}

/// Parses a required UUID field, 400 on absence or malformed input
pub fn required_uuid(value: Option<&str>, field: &str) -> Result<Uuid, ApiError> {
    optional_uuid(value)
        .ok_or_else(|| ApiError::BadRequest(format!("{} must be a valid UUID", field)))
}

/// Support resources arrive either as a newline-delimited string or as
/// an array of strings
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StringOrList {
    Text(String),
    List(Vec<String>),
}

/// Normalizes support resources to a cleaned list
///
/// Splits a string input on newlines, trims every item, and drops
/// empties; None when nothing remains.
pub fn parse_support_resources(value: Option<&StringOrList>) -> Option<Vec<String>> {
    let items: Vec<String> = match value? {
        StringOrList::Text(text) => text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect(),
        StringOrList::List(items) => items
            .iter()
            .map(|item| item.trim())
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect(),
    };

    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

/// Parses a list of id strings, silently dropping malformed entries
pub fn parse_id_list(values: Option<&[String]>) -> Vec<Uuid> {
    values
        .unwrap_or_default()
        .iter()
        .filter_map(|v| Uuid::parse_str(v).ok())
        .collect()
}

/// Parses an optional project type, 400 on unknown values
pub fn parse_project_type(value: Option<&str>) -> Result<Option<ProjectType>, ApiError> {
    match value {
        None => Ok(None),
        Some(v) => ProjectType::parse(v)
            .map(Some)
            .ok_or_else(|| ApiError::BadRequest(format!("Invalid project type '{}'", v))),
    }
}

/// Parses an optional project status, 400 on unknown values
pub fn parse_project_status(value: Option<&str>) -> Result<Option<ProjectStatus>, ApiError> {
    match value {
        None => Ok(None),
        Some(v) => ProjectStatus::parse(v)
            .map(Some)
            .ok_or_else(|| ApiError::BadRequest(format!("Invalid project status '{}'", v))),
    }
}

/// Parses an optional task status, 400 on unknown values
pub fn parse_task_status(value: Option<&str>) -> Result<Option<TaskStatus>, ApiError> {
    match value {
        None => Ok(None),
        Some(v) => TaskStatus::parse(v)
            .map(Some)
            .ok_or_else(|| ApiError::BadRequest(format!("Invalid task status '{}'", v))),
    }
}

/// Parses an optional recurrence frequency, 400 on unknown values
pub fn parse_recurrence_frequency(
    value: Option<&str>,
) -> Result<Option<RecurrenceFrequency>, ApiError> {
    match value {
        None => Ok(None),
        Some(v) => RecurrenceFrequency::parse(v)
            .map(Some)
            .ok_or_else(|| ApiError::BadRequest(format!("Invalid recurrence frequency '{}'", v))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_string() {
        assert_eq!(required_string(Some("a")), Some("a".to_string()));
        assert_eq!(required_string(Some("  a  ")), Some("a".to_string()));
        assert_eq!(required_string(Some(" ")), None);
        assert_eq!(required_string(Some("")), None);
        assert_eq!(required_string(None), None);
    }

    #[test]
    fn test_optional_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(optional_uuid(Some(&id.to_string())), Some(id));
        assert_eq!(optional_uuid(Some("not-a-uuid")), None);
        assert_eq!(optional_uuid(None), None);
    }

    #[test]
    fn test_required_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(required_uuid(Some(&id.to_string()), "project_id").unwrap(), id);
        assert!(required_uuid(Some("not-a-uuid"), "project_id").is_err());
        assert!(required_uuid(None, "project_id").is_err());
    }

    #[test]
    fn test_parse_support_resources_from_text() {
        let input = StringOrList::Text("a\n\nb\n".to_string());
        assert_eq!(
            parse_support_resources(Some(&input)),
            Some(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn test_parse_support_resources_from_list() {
        let input = StringOrList::List(vec![" a ".to_string(), "".to_string(), "b".to_string()]);
        assert_eq!(
            parse_support_resources(Some(&input)),
            Some(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn test_parse_support_resources_empty() {
        assert_eq!(parse_support_resources(Some(&StringOrList::List(vec![]))), None);
        assert_eq!(
            parse_support_resources(Some(&StringOrList::Text("  \n ".to_string()))),
            None
        );
        assert_eq!(parse_support_resources(None), None);
    }

    #[test]
    fn test_parse_id_list_skips_malformed() {
        let id = Uuid::new_v4();
        let values = vec![id.to_string(), "bogus".to_string()];
        assert_eq!(parse_id_list(Some(&values)), vec![id]);
        assert!(parse_id_list(None).is_empty());
    }

    #[test]
    fn test_parse_enum_helpers() {
        assert_eq!(
            parse_task_status(Some("in_progress")).unwrap(),
            Some(TaskStatus::InProgress)
        );
        assert!(parse_task_status(Some("done")).is_err());
        assert_eq!(parse_task_status(None).unwrap(), None);

        assert_eq!(
            parse_project_type(Some("conference")).unwrap(),
            Some(ProjectType::Conference)
        );
        assert!(parse_project_type(Some("gala")).is_err());

        assert_eq!(
            parse_project_status(Some("active")).unwrap(),
            Some(ProjectStatus::Active)
        );
        assert!(parse_project_status(Some("paused")).is_err());

        assert_eq!(
            parse_recurrence_frequency(Some("weekly")).unwrap(),
            Some(RecurrenceFrequency::Weekly)
        );
        assert!(parse_recurrence_frequency(Some("yearly")).is_err());
    }
}
