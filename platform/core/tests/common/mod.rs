// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! In-memory stand-in for the remote platform.
//!
//! Keeps a live instance list so that inserts really change what the next
//! assembly snapshot returns.

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::HashSet;

use holefit_core::domain::platform::{
    HttpMethod, PlatformError, PlatformRequest, PlatformResponse, PlatformTransport,
};
use holefit_core::domain::tagged_value::encode;

#[derive(Default)]
struct State {
    instances: Vec<Value>,
    next_id: u32,
    featurescript: Option<(u16, Value)>,
    failing_inserts: HashSet<usize>,
    unreachable_inserts: HashSet<usize>,
    failing_snapshots: HashSet<usize>,
    silent_inserts: bool,
    transform_status: Option<u16>,
    assembly_unreachable: bool,
    insert_calls: usize,
    assembly_reads: usize,
    requests: Vec<PlatformRequest>,
}

#[derive(Default)]
pub struct ScriptedPlatform {
    state: Mutex<State>,
}

impl ScriptedPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_instance(self, instance: Value) -> Self {
        self.state.lock().instances.push(instance);
        self
    }

    /// Answer the featurescript endpoint with these plain records, encoded as
    /// the kernel would encode them.
    pub fn with_scan_records(self, records: Vec<Value>) -> Self {
        let encoded = encode(&Value::Array(records));
        self.state.lock().featurescript = Some((200, json!({ "result": encoded })));
        self
    }

    pub fn with_featurescript_response(self, status: u16, body: Value) -> Self {
        self.state.lock().featurescript = Some((status, body));
        self
    }

    /// Zero-based insert calls that answer HTTP 500
    pub fn failing_inserts(self, calls: &[usize]) -> Self {
        self.state.lock().failing_inserts = calls.iter().copied().collect();
        self
    }

    /// Zero-based insert calls that fail at the transport level
    pub fn unreachable_inserts(self, calls: &[usize]) -> Self {
        self.state.lock().unreachable_inserts = calls.iter().copied().collect();
        self
    }

    /// Zero-based assembly reads (template lookup included) that fail at the
    /// transport level
    pub fn failing_snapshots(self, reads: &[usize]) -> Self {
        self.state.lock().failing_snapshots = reads.iter().copied().collect();
        self
    }

    /// Inserts report success but add nothing to the assembly
    pub fn silent_inserts(self) -> Self {
        self.state.lock().silent_inserts = true;
        self
    }

    pub fn transform_status(self, status: u16) -> Self {
        self.state.lock().transform_status = Some(status);
        self
    }

    pub fn assembly_unreachable(self) -> Self {
        self.state.lock().assembly_unreachable = true;
        self
    }

    pub fn requests(&self) -> Vec<PlatformRequest> {
        self.state.lock().requests.clone()
    }

    pub fn requests_to(&self, suffix: &str) -> Vec<PlatformRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path.ends_with(suffix))
            .collect()
    }

    pub fn instance_count(&self) -> usize {
        self.state.lock().instances.len()
    }
}

#[async_trait]
impl PlatformTransport for ScriptedPlatform {
    async fn send(&self, request: PlatformRequest) -> Result<PlatformResponse, PlatformError> {
        let mut state = self.state.lock();
        state.requests.push(request.clone());

        let ok = |body: Value| -> Result<PlatformResponse, PlatformError> {
            Ok(PlatformResponse { status: 200, body })
        };

        match request.method {
            HttpMethod::Post if request.path.ends_with("/featurescript") => {
                match state.featurescript.clone() {
                    Some((status, body)) => Ok(PlatformResponse { status, body }),
                    None => Err(PlatformError::Transport("connection refused".into())),
                }
            }
            HttpMethod::Post if request.path.ends_with("/instances") => {
                let call = state.insert_calls;
                state.insert_calls += 1;
                if state.unreachable_inserts.contains(&call) {
                    return Err(PlatformError::Transport("connection reset".into()));
                }
                if state.failing_inserts.contains(&call) {
                    return Ok(PlatformResponse {
                        status: 500,
                        body: json!({ "message": "insert failed" }),
                    });
                }
                if !state.silent_inserts {
                    state.next_id += 1;
                    let id = format!("new{:03}", state.next_id);
                    let name = format!("Inserted <{}>", state.next_id);
                    state.instances.push(json!({ "id": id, "name": name }));
                }
                ok(json!({}))
            }
            HttpMethod::Post if request.path.ends_with("/occurrences/transform") => {
                let status = state.transform_status.unwrap_or(200);
                Ok(PlatformResponse {
                    status,
                    body: Value::Null,
                })
            }
            HttpMethod::Get if request.path.starts_with("/api/assemblies/") => {
                let read = state.assembly_reads;
                state.assembly_reads += 1;
                if state.assembly_unreachable || state.failing_snapshots.contains(&read) {
                    return Err(PlatformError::Transport("connection reset".into()));
                }
                ok(json!({ "rootAssembly": { "instances": state.instances.clone() } }))
            }
            _ => Ok(PlatformResponse {
                status: 404,
                body: json!({ "message": "not found" }),
            }),
        }
    }
}

pub fn screw_template() -> Value {
    json!({
        "id": "tmpl01",
        "name": "Hex Socket Screw M8x65 <1>",
        "documentId": "lib-doc",
        "elementId": "lib-elem",
        "partId": "JHD",
        "configuration": "default"
    })
}

pub fn plate_instance() -> Value {
    json!({
        "id": "plate01",
        "name": "Top Die Shoe <1>",
        "documentId": "doc",
        "elementId": "ps",
        "partId": "JFD"
    })
}

pub fn record(diameter: f64, part: &str, class: &str, origin: [f64; 3]) -> Value {
    json!({
        "diameter": diameter,
        "partName": part,
        "holeClass": class,
        "origin": origin.to_vec(),
    })
}
