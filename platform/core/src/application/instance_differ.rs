// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Instance Differ
//!
//! The insert-instance call does not return the id of what it created. The
//! id is recovered by snapshotting the assembly's instance ids before and
//! after the insert and taking the difference.

use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::warn;

use crate::domain::platform::{paths, PlatformError, PlatformRequest, PlatformTransport};

/// Instance ids present in an assembly. Ordered so that picks are deterministic.
pub type InstanceIdSet = BTreeSet<String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffOutcome {
    /// Nothing new appeared
    NoNewInstance,
    Single(String),
    /// Several new ids; the first in sort order was chosen
    Ambiguous { chosen: String, candidates: usize },
}

impl DiffOutcome {
    pub fn instance_id(&self) -> Option<&str> {
        match self {
            DiffOutcome::NoNewInstance => None,
            DiffOutcome::Single(id) => Some(id),
            DiffOutcome::Ambiguous { chosen, .. } => Some(chosen),
        }
    }
}

pub struct InstanceDiffer {
    platform: Arc<dyn PlatformTransport>,
}

impl InstanceDiffer {
    pub fn new(platform: Arc<dyn PlatformTransport>) -> Self {
        Self { platform }
    }

    /// Ids of every top-level instance currently in the assembly.
    pub async fn snapshot(
        &self,
        document_id: &str,
        workspace_id: &str,
        element_id: &str,
    ) -> Result<InstanceIdSet, PlatformError> {
        let body = self
            .platform
            .send(PlatformRequest::get(paths::assembly(
                document_id,
                workspace_id,
                element_id,
            )))
            .await?
            .into_success()?;

        Ok(root_instances(&body)
            .iter()
            .filter_map(|instance| instance.get("id").and_then(Value::as_str))
            .map(str::to_string)
            .collect())
    }
}

/// `after - before`
pub fn new_instances(before: &InstanceIdSet, after: &InstanceIdSet) -> InstanceIdSet {
    after.difference(before).cloned().collect()
}

pub fn resolve(before: &InstanceIdSet, after: &InstanceIdSet) -> DiffOutcome {
    let created = new_instances(before, after);
    let mut ids = created.iter();
    match (ids.next(), created.len()) {
        (None, _) => DiffOutcome::NoNewInstance,
        (Some(id), 1) => DiffOutcome::Single(id.clone()),
        (Some(id), candidates) => {
            warn!(
                chosen = %id,
                candidates,
                "Several instances appeared during one insert; picking the first by id"
            );
            DiffOutcome::Ambiguous {
                chosen: id.clone(),
                candidates,
            }
        }
    }
}

/// `rootAssembly.instances` of an assembly definition, empty when absent.
pub(crate) fn root_instances(assembly: &Value) -> &[Value] {
    let instances = assembly
        .pointer("/rootAssembly/instances")
        .and_then(Value::as_array);
    if instances.is_none() {
        warn!("Assembly response has no rootAssembly.instances; treating as empty");
    }
    instances.map(Vec::as_slice).unwrap_or(&[])
}
