// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Batch Inserter
//!
//! Places one copy of a template instance at each target position.
//!
//! # Architecture
//!
//! - **Layer:** Application Layer
//! - **Purpose:** Orchestrates locate → {snapshot, insert, snapshot, transform}*
//!
//! # Phases
//!
//! `NoTemplate → TemplateFound → Inserting(0..n) → Done`
//!
//! - A failed or empty template lookup aborts before any item is attempted.
//! - Items run strictly one after another; the before/after snapshots of an
//!   item are only meaningful if no other insert interleaves with them.
//! - A rejected insert fails that item only. An insert whose new id cannot be
//!   resolved is counted as succeeded but unplaced.
//! - A failed transform still counts the item as succeeded; the instance then
//!   sits at the platform's default placement.

use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::application::instance_differ::{resolve, InstanceDiffer};
use crate::application::template_locator::TemplateLocator;
use crate::domain::hole::{HoleClass, Position};
use crate::domain::platform::{paths, PlatformError, PlatformRequest, PlatformTransport};
use crate::domain::session::ScanSession;
use crate::domain::template::{transform_body, TemplateReference};

/// Assembly the batch inserts into
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssemblyTarget {
    pub document_id: String,
    pub workspace_id: String,
    pub element_id: String,
}

impl AssemblyTarget {
    pub fn new(
        document_id: impl Into<String>,
        workspace_id: impl Into<String>,
        element_id: impl Into<String>,
    ) -> Self {
        Self {
            document_id: document_id.into(),
            workspace_id: workspace_id.into(),
            element_id: element_id.into(),
        }
    }
}

/// Batch-level failures. Per-item failures are reported in [`BatchReport`].
#[derive(Debug, Error)]
pub enum PlacementError {
    #[error("No hole positions are pending; run an analysis first")]
    NoTargets,

    #[error("No template instance matching {keywords:?} was found in the assembly; insert one copy of the part manually and retry")]
    TemplateNotFound { keywords: Vec<String> },

    #[error("Template lookup failed: {0}")]
    TemplateLookup(#[source] PlatformError),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ItemOutcome {
    /// Inserted and moved to the target
    Placed { instance_id: String },
    /// Inserted, identified, but the transform call failed
    PlacementFailed { instance_id: String, reason: String },
    /// Inserted, but the new instance could not be identified
    Unplaced,
    Failed { reason: String },
}

impl ItemOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, ItemOutcome::Failed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemReport {
    pub index: usize,
    pub target: Position,
    pub outcome: ItemOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    pub template: TemplateReference,
    pub items: Vec<ItemReport>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.items.iter().filter(|i| i.outcome.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.items.len() - self.succeeded()
    }

    /// Succeeded items left at the default placement
    pub fn unplaced(&self) -> usize {
        self.items
            .iter()
            .filter(|i| {
                matches!(
                    i.outcome,
                    ItemOutcome::Unplaced | ItemOutcome::PlacementFailed { .. }
                )
            })
            .count()
    }

    pub fn summary(&self) -> String {
        let mut summary = format!(
            "Inserted {} of {} '{}' instance(s)",
            self.succeeded(),
            self.items.len(),
            self.template.source_name
        );
        if self.failed() > 0 {
            summary.push_str(&format!(", {} failed", self.failed()));
        }
        if self.unplaced() > 0 {
            summary.push_str(&format!(
                ", {} left at the default position",
                self.unplaced()
            ));
        }
        summary
    }
}

#[derive(Debug, Clone, Copy)]
enum Phase {
    NoTemplate,
    TemplateFound,
    Inserting(usize),
    Done,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::NoTemplate => f.write_str("no-template"),
            Phase::TemplateFound => f.write_str("template-found"),
            Phase::Inserting(i) => write!(f, "inserting({})", i),
            Phase::Done => f.write_str("done"),
        }
    }
}

pub struct BatchInserter {
    platform: Arc<dyn PlatformTransport>,
    locator: TemplateLocator,
    differ: InstanceDiffer,
}

impl BatchInserter {
    pub fn new(platform: Arc<dyn PlatformTransport>) -> Self {
        Self {
            locator: TemplateLocator::new(platform.clone()),
            differ: InstanceDiffer::new(platform.clone()),
            platform,
        }
    }

    /// Insert one template copy per pending hole in `session`, optionally only
    /// for holes of one class. The session is cleared once the batch has run;
    /// an aborted batch leaves it untouched so the caller can retry.
    pub async fn insert_from_session(
        &self,
        session: &mut ScanSession,
        assembly: &AssemblyTarget,
        keywords: &[String],
        class: Option<HoleClass>,
    ) -> Result<BatchReport, PlacementError> {
        let targets = session.targets(class);
        let report = self.insert_all(assembly, keywords, &targets).await?;
        session.clear();
        Ok(report)
    }

    pub async fn insert_all(
        &self,
        assembly: &AssemblyTarget,
        keywords: &[String],
        targets: &[Position],
    ) -> Result<BatchReport, PlacementError> {
        if targets.is_empty() {
            return Err(PlacementError::NoTargets);
        }

        let mut phase = Phase::NoTemplate;
        debug!(%phase, targets = targets.len(), "Starting batch insert");

        let template = self
            .locator
            .locate(
                &assembly.document_id,
                &assembly.workspace_id,
                &assembly.element_id,
                keywords,
            )
            .await
            .map_err(PlacementError::TemplateLookup)?
            .ok_or_else(|| PlacementError::TemplateNotFound {
                keywords: keywords.to_vec(),
            })?;

        phase = Phase::TemplateFound;
        debug!(%phase, template = %template.source_name, "Template resolved");

        let mut items = Vec::with_capacity(targets.len());
        for (index, target) in targets.iter().enumerate() {
            phase = Phase::Inserting(index);
            debug!(%phase, x = target.x, y = target.y, z = target.z, "Inserting");

            let outcome = self.insert_one(assembly, &template, target).await;
            match &outcome {
                ItemOutcome::Failed { reason } => {
                    warn!(index, reason = %reason, "Insert failed")
                }
                ItemOutcome::Unplaced => warn!(
                    index,
                    "Inserted but new instance could not be identified; left at default position"
                ),
                ItemOutcome::PlacementFailed {
                    instance_id,
                    reason,
                } => warn!(
                    index,
                    instance_id = %instance_id,
                    reason = %reason,
                    "Inserted but transform failed; counted as success"
                ),
                ItemOutcome::Placed { instance_id } => {
                    debug!(index, instance_id = %instance_id, "Placed")
                }
            }
            items.push(ItemReport {
                index,
                target: *target,
                outcome,
            });
        }

        phase = Phase::Done;
        let report = BatchReport { template, items };
        info!(
            %phase,
            succeeded = report.succeeded(),
            failed = report.failed(),
            unplaced = report.unplaced(),
            "Batch insert finished"
        );
        Ok(report)
    }

    async fn insert_one(
        &self,
        assembly: &AssemblyTarget,
        template: &TemplateReference,
        target: &Position,
    ) -> ItemOutcome {
        let AssemblyTarget {
            document_id: did,
            workspace_id: wid,
            element_id: eid,
        } = assembly;

        let before = match self.differ.snapshot(did, wid, eid).await {
            Ok(ids) => ids,
            Err(e) => {
                return ItemOutcome::Failed {
                    reason: format!("snapshot before insert failed: {}", e),
                }
            }
        };

        let inserted = self
            .platform
            .send(PlatformRequest::post(
                paths::assembly_instances(did, wid, eid),
                template.insert_body(),
            ))
            .await
            .and_then(|response| response.into_success());
        if let Err(e) = inserted {
            return ItemOutcome::Failed {
                reason: e.to_string(),
            };
        }

        let after = match self.differ.snapshot(did, wid, eid).await {
            Ok(ids) => ids,
            Err(e) => {
                warn!(error = %e, "Snapshot after insert failed");
                return ItemOutcome::Unplaced;
            }
        };

        let instance_id = match resolve(&before, &after).instance_id() {
            Some(id) => id.to_string(),
            None => return ItemOutcome::Unplaced,
        };

        let moved = self
            .platform
            .send(PlatformRequest::post(
                paths::occurrence_transform(did, wid, eid),
                transform_body(&instance_id, target),
            ))
            .await
            .and_then(|response| response.into_success());

        match moved {
            Ok(_) => ItemOutcome::Placed { instance_id },
            Err(e) => ItemOutcome::PlacementFailed {
                instance_id,
                reason: e.to_string(),
            },
        }
    }
}
