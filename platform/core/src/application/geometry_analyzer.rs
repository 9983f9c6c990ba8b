// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Geometry Analyzer
//!
//! Runs the embedded hole-scan script in the remote geometry kernel and turns
//! its tagged-value result into deduplicated [`HoleFeature`]s.
//!
//! # Architecture
//!
//! - **Layer:** Application Layer
//! - **Purpose:** Part-studio hole extraction
//! - **Integration:** ScriptTemplateEngine → featurescript endpoint → TaggedValue decoding

use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::hole::{dedup_holes, HoleClass, HoleFeature, Position, MAX_HOLE_DIAMETER_MM};
use crate::domain::platform::{paths, PlatformError, PlatformRequest, PlatformTransport};
use crate::domain::tagged_value::decode;
use crate::infrastructure::script_template::ScriptTemplateEngine;

pub struct GeometryAnalyzer {
    platform: Arc<dyn PlatformTransport>,
    scripts: ScriptTemplateEngine,
}

impl GeometryAnalyzer {
    pub fn new(platform: Arc<dyn PlatformTransport>) -> Result<Self> {
        Ok(Self {
            platform,
            scripts: ScriptTemplateEngine::new()?,
        })
    }

    /// Detect holes in a part studio.
    ///
    /// Returns `None` when the call failed (transport, rejection or an
    /// unexpected response shape) and `Some(vec![])` when the scan ran but
    /// found nothing. Failures are logged, never raised.
    pub async fn analyze(
        &self,
        document_id: &str,
        workspace_id: &str,
        element_id: &str,
        part_keyword: Option<&str>,
    ) -> Option<Vec<HoleFeature>> {
        match self
            .try_analyze(document_id, workspace_id, element_id, part_keyword)
            .await
        {
            Ok(holes) => {
                info!(
                    document_id,
                    element_id,
                    holes = holes.len(),
                    "Geometry analysis complete"
                );
                Some(holes)
            }
            Err(e) => {
                warn!(document_id, element_id, error = %e, "Geometry analysis failed");
                None
            }
        }
    }

    async fn try_analyze(
        &self,
        document_id: &str,
        workspace_id: &str,
        element_id: &str,
        part_keyword: Option<&str>,
    ) -> Result<Vec<HoleFeature>> {
        let script = self.scripts.render_hole_scan(part_keyword)?;
        let request = PlatformRequest::post(
            paths::featurescript(document_id, workspace_id, element_id),
            json!({ "script": script, "queries": [] }),
        );

        let body = self.platform.send(request).await?.into_success()?;
        let nodes = body
            .pointer("/result/message/value")
            .and_then(Value::as_array)
            .ok_or_else(|| PlatformError::Decode("missing result.message.value".to_string()))
            .context("Hole scan returned no result container")?;

        let mut holes = Vec::with_capacity(nodes.len());
        for node in nodes {
            let record = decode(node);
            match hole_from_record(&record) {
                Some(hole) => holes.push(hole),
                None => debug!(record = %record, "Skipping malformed hole record"),
            }
        }

        let raw = holes.len();
        let holes = dedup_holes(holes);
        debug!(raw, unique = holes.len(), "Deduplicated hole records");
        Ok(holes)
    }
}

/// Map one decoded script record onto a hole feature.
///
/// Expected shape: `{diameter, partName, holeClass, origin: [x, y, z]}`.
pub fn hole_from_record(record: &Value) -> Option<HoleFeature> {
    let diameter = record.get("diameter")?.as_f64()?;
    if !(diameter > 0.0 && diameter < MAX_HOLE_DIAMETER_MM) {
        return None;
    }

    let part_name = record
        .get("partName")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .unwrap_or("Unknown");

    let hole_class = record
        .get("holeClass")
        .and_then(Value::as_str)
        .and_then(HoleClass::from_script_tag);

    let origin = record.get("origin")?.as_array()?;
    let coord = |i: usize| origin.get(i).and_then(Value::as_f64);
    let position = Position::new(coord(0)?, coord(1)?, coord(2)?);

    Some(HoleFeature::new(diameter, part_name, hole_class, position))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_mapping() {
        let hole = hole_from_record(&json!({
            "diameter": 9.0,
            "partName": "Top Die Shoe",
            "holeClass": "FASTENER",
            "origin": [0.1, 0.2, 0.035]
        }))
        .unwrap();

        assert_eq!(hole.part_name, "Top Die Shoe");
        assert_eq!(hole.hole_class, HoleClass::FastenerClearance);
        assert_eq!(hole.recommended_size_code, "M8");
        assert_eq!(hole.position, Position::new(0.1, 0.2, 0.035));
    }

    #[test]
    fn test_record_fallbacks() {
        let hole = hole_from_record(&json!({
            "diameter": 8.4,
            "partName": "",
            "origin": [0, 0, 0]
        }))
        .unwrap();

        assert_eq!(hole.part_name, "Unknown");
        assert_eq!(hole.hole_class, HoleClass::DowelPin);
    }

    #[test]
    fn test_malformed_records_rejected() {
        assert!(hole_from_record(&json!({ "diameter": 9.0 })).is_none());
        assert!(hole_from_record(&json!({ "diameter": 9.0, "origin": [0.0, 1.0] })).is_none());
        assert!(hole_from_record(&json!({ "diameter": "9", "origin": [0, 0, 0] })).is_none());
        assert!(hole_from_record(&json!({ "diameter": 50.0, "origin": [0, 0, 0] })).is_none());
    }
}
