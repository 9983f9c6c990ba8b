// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Template Locator
//!
//! Finds an existing instance in an assembly whose name matches one of the
//! caller's keywords and derives the [`TemplateReference`] needed to insert
//! more copies of it.

use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::application::instance_differ::root_instances;
use crate::domain::platform::{paths, PlatformError, PlatformRequest, PlatformTransport};
use crate::domain::template::{SourceRevision, TemplateReference};

pub struct TemplateLocator {
    platform: Arc<dyn PlatformTransport>,
}

impl TemplateLocator {
    pub fn new(platform: Arc<dyn PlatformTransport>) -> Self {
        Self { platform }
    }

    /// First instance, in assembly order, whose name contains any keyword
    /// (case-insensitive). `Ok(None)` means nothing matched.
    pub async fn locate(
        &self,
        document_id: &str,
        workspace_id: &str,
        element_id: &str,
        keywords: &[String],
    ) -> Result<Option<TemplateReference>, PlatformError> {
        let body = self
            .platform
            .send(PlatformRequest::get(paths::assembly(
                document_id,
                workspace_id,
                element_id,
            )))
            .await?
            .into_success()?;

        let found = find_template(root_instances(&body), keywords, workspace_id);
        match &found {
            Some(template) => info!(
                name = %template.source_name,
                document_id = %template.document_id,
                "Template instance located"
            ),
            None => info!(?keywords, "No template instance matched"),
        }
        Ok(found)
    }
}

/// Pure matching step of [`TemplateLocator::locate`].
pub fn find_template(
    instances: &[Value],
    keywords: &[String],
    workspace_id: &str,
) -> Option<TemplateReference> {
    let needles: Vec<String> = keywords
        .iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect();
    if needles.is_empty() {
        return None;
    }

    for instance in instances {
        let name = match instance.get("name").and_then(Value::as_str) {
            Some(name) => name,
            None => continue,
        };
        let lowered = name.to_lowercase();
        if !needles.iter().any(|needle| lowered.contains(needle.as_str())) {
            continue;
        }

        match reference_from_instance(instance, name, workspace_id) {
            Some(reference) => return Some(reference),
            None => warn!(name, "Matching instance lacks source identifiers; skipping"),
        }
    }
    debug!(scanned = instances.len(), "Template scan exhausted");
    None
}

fn reference_from_instance(
    instance: &Value,
    name: &str,
    workspace_id: &str,
) -> Option<TemplateReference> {
    let text = |key: &str| {
        instance
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    let revision = match text("documentVersion") {
        Some(version) => SourceRevision::Version(version),
        None => SourceRevision::Workspace(workspace_id.to_string()),
    };

    Some(TemplateReference {
        source_name: name.to_string(),
        document_id: text("documentId")?,
        element_id: text("elementId")?,
        part_id: text("partId"),
        revision,
        configuration: text("configuration"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn keywords(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_first_match_in_order_wins() {
        let instances = vec![
            json!({ "id": "a", "name": "Top Die Shoe <1>", "documentId": "d", "elementId": "e1" }),
            json!({
                "id": "b",
                "name": "Hex Socket Screw M8x65 <1>",
                "documentId": "d",
                "elementId": "e2",
                "partId": "P1"
            }),
            json!({ "id": "c", "name": "hex nut M8 <1>", "documentId": "d", "elementId": "e3" }),
        ];
        let found = find_template(&instances, &keywords(&["Hex", "M8"]), "w").unwrap();

        assert_eq!(found.source_name, "Hex Socket Screw M8x65 <1>");
        assert_eq!(found.element_id, "e2");
        assert_eq!(found.part_id.as_deref(), Some("P1"));
        assert_eq!(found.revision, SourceRevision::Workspace("w".into()));
    }

    #[test]
    fn test_case_insensitive_and_version_preferred() {
        let instances = vec![json!({
            "name": "DOWEL PIN 8x30",
            "documentId": "lib",
            "elementId": "e",
            "documentVersion": "v7",
            "configuration": "size=8"
        })];
        let found = find_template(&instances, &keywords(&["dowel"]), "w").unwrap();

        assert_eq!(found.revision, SourceRevision::Version("v7".into()));
        assert_eq!(found.configuration.as_deref(), Some("size=8"));
    }

    #[test]
    fn test_not_found_is_none() {
        let instances = vec![json!({ "name": "Bracket", "documentId": "d", "elementId": "e" })];
        assert!(find_template(&instances, &keywords(&["Hex"]), "w").is_none());
        assert!(find_template(&instances, &keywords(&[" "]), "w").is_none());
        assert!(find_template(&[], &keywords(&["Hex"]), "w").is_none());
    }

    #[test]
    fn test_match_without_ids_falls_through() {
        let instances = vec![
            json!({ "name": "Hex broken" }),
            json!({ "name": "Hex good", "documentId": "d", "elementId": "e" }),
        ];
        let found = find_template(&instances, &keywords(&["hex"]), "w").unwrap();
        assert_eq!(found.source_name, "Hex good");
    }
}
