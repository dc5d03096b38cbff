/// Bundled template seeding
///
/// A starter project template ships with the binary and is inserted
/// into the template store at startup when absent (keyed by name, so
/// restarts are idempotent). Users can then create a ready-made
/// project via `POST /v1/templates/:id/instantiate`.

use serde::Deserialize;
use tracing::info;

use planora_shared::models::project::ProjectType;
use planora_shared::models::template::{CreateTemplate, TemplateBody};
use planora_shared::store::{Store, StoreError, TemplateStore};

const STARTER_TEMPLATE: &str = include_str!("../assets/property_starter.json");

#[derive(Debug, Deserialize)]
struct BundledTemplate {
    name: String,
    project_type: ProjectType,
    body: TemplateBody,
}

/// Seeds the bundled starter template if it isn't stored yet
pub async fn seed_bundled_templates(store: &dyn Store) -> Result<(), StoreError> {
    let bundled: BundledTemplate = serde_json::from_str(STARTER_TEMPLATE)?;

    if store.find_template_by_name(&bundled.name).await?.is_some() {
        return Ok(());
    }

    let template = store
        .create_template(CreateTemplate {
            name: bundled.name,
            project_type: bundled.project_type,
            body: bundled.body,
        })
        .await?;

    info!(template = %template.name, id = %template.id, "Seeded bundled template");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_template_parses() {
        let bundled: BundledTemplate = serde_json::from_str(STARTER_TEMPLATE).unwrap();
        assert_eq!(bundled.name, "Property Project Starter");
        assert_eq!(bundled.project_type, ProjectType::Property);
        assert_eq!(bundled.body.areas.len(), 2);
        assert!(bundled.body.areas.iter().all(|a| !a.responsibilities.is_empty()));
    }
}
