// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Template references: how to ask the platform for another copy of an
//! existing assembly instance.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::hole::Position;

/// Revision of the source document the template is inserted from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceRevision {
    Version(String),
    Workspace(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateReference {
    /// Display name of the instance the reference was built from
    pub source_name: String,
    pub document_id: String,
    pub element_id: String,
    pub part_id: Option<String>,
    pub revision: SourceRevision,
    pub configuration: Option<String>,
}

impl TemplateReference {
    /// Body for the assembly insert-instance call. Placement is never part of
    /// the request; the platform inserts at its default location.
    pub fn insert_body(&self) -> Value {
        let mut body = Map::new();
        body.insert("documentId".into(), json!(self.document_id));
        body.insert("elementId".into(), json!(self.element_id));
        match &self.revision {
            SourceRevision::Version(id) => body.insert("versionId".into(), json!(id)),
            SourceRevision::Workspace(id) => body.insert("workspaceId".into(), json!(id)),
        };
        match &self.part_id {
            Some(part_id) => {
                body.insert("partId".into(), json!(part_id));
                body.insert("isWholePartStudio".into(), json!(false));
            }
            None => {
                body.insert("isWholePartStudio".into(), json!(true));
            }
        }
        body.insert("isAssembly".into(), json!(false));
        if let Some(configuration) = &self.configuration {
            body.insert("configuration".into(), json!(configuration));
        }
        Value::Object(body)
    }
}

/// Translation-only homogeneous transform, row-major 4x4.
pub fn translation_matrix(position: &Position) -> [f64; 16] {
    [
        1.0, 0.0, 0.0, position.x, //
        0.0, 1.0, 0.0, position.y, //
        0.0, 0.0, 1.0, position.z, //
        0.0, 0.0, 0.0, 1.0,
    ]
}

/// Body for the occurrence-transform call moving one instance to `position`.
pub fn transform_body(instance_id: &str, position: &Position) -> Value {
    json!({
        "occurrences": [ { "path": [instance_id] } ],
        "transform": translation_matrix(position).to_vec(),
        "isRelative": false,
    })
}
