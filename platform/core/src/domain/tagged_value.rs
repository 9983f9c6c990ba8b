// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Tagged values
//!
//! The geometry kernel serializes script results as self-describing nodes:
//!
//! ```text
//! { "typeName": "BTFSValueArray", "message": { "value": [ <node>, ... ] } }
//! { "typeName": "BTFSValueMap",   "message": { "value": [ <entry>, ... ] } }
//! entry = { "message": { "key": <node>, "value": <node> } }
//! { "typeName": "BTFSValueString", "message": { "value": "M8" } }
//! ```
//!
//! Some responses only carry the fully qualified `type`
//! (`com.belmonttech.serialize.fsvalue.BTFSValueNumber`); its last segment is
//! used as the discriminator in that case.

use serde_json::{Map, Value};

const STRING: &str = "BTFSValueString";
const NUMBER: &str = "BTFSValueNumber";
const BOOLEAN: &str = "BTFSValueBoolean";
const ARRAY: &str = "BTFSValueArray";
const MAP: &str = "BTFSValueMap";
const MAP_ENTRY: &str = "BTFSValueMapEntry";

/// One wire node, parsed into a closed set of shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum TaggedValue {
    /// String, number or boolean payload (null when the payload is missing)
    Scalar(Value),
    Array(Vec<TaggedValue>),
    /// Entries in wire order; duplicates are resolved when flattened
    Map(Vec<(TaggedValue, TaggedValue)>),
    /// Unrecognized discriminator, kept verbatim
    Unknown(Value),
}

impl TaggedValue {
    /// Parse a wire node. Never fails: missing fields read as empty containers.
    pub fn from_wire(node: &Value) -> Self {
        match discriminator(node) {
            Some(STRING) | Some(NUMBER) | Some(BOOLEAN) => {
                TaggedValue::Scalar(payload(node).cloned().unwrap_or(Value::Null))
            }
            Some(ARRAY) => TaggedValue::Array(
                payload_items(node).iter().map(TaggedValue::from_wire).collect(),
            ),
            Some(MAP) => TaggedValue::Map(
                payload_items(node)
                    .iter()
                    .map(|entry| {
                        let message = entry.get("message");
                        let key = message.and_then(|m| m.get("key")).unwrap_or(&Value::Null);
                        let value = message.and_then(|m| m.get("value")).unwrap_or(&Value::Null);
                        (TaggedValue::from_wire(key), TaggedValue::from_wire(value))
                    })
                    .collect(),
            ),
            _ => TaggedValue::Unknown(node.clone()),
        }
    }

    /// Flatten into a plain JSON tree.
    pub fn into_plain(self) -> Value {
        match self {
            TaggedValue::Scalar(value) | TaggedValue::Unknown(value) => value,
            TaggedValue::Array(items) => {
                Value::Array(items.into_iter().map(TaggedValue::into_plain).collect())
            }
            TaggedValue::Map(entries) => {
                let mut map = Map::new();
                for (key, value) in entries {
                    map.insert(plain_key(key.into_plain()), value.into_plain());
                }
                Value::Object(map)
            }
        }
    }
}

/// Decode one wire node into a plain value.
pub fn decode(node: &Value) -> Value {
    TaggedValue::from_wire(node).into_plain()
}

/// Encode a plain value in the kernel's wire format.
///
/// Nulls have no wire counterpart and are emitted as an untyped node, which
/// decodes back to itself.
pub fn encode(value: &Value) -> Value {
    match value {
        Value::String(_) => wire_node(STRING, value.clone()),
        Value::Number(_) => wire_node(NUMBER, value.clone()),
        Value::Bool(_) => wire_node(BOOLEAN, value.clone()),
        Value::Array(items) => wire_node(ARRAY, Value::Array(items.iter().map(encode).collect())),
        Value::Object(map) => {
            let entries = map
                .iter()
                .map(|(key, value)| {
                    serde_json::json!({
                        "typeName": MAP_ENTRY,
                        "message": {
                            "key": encode(&Value::String(key.clone())),
                            "value": encode(value),
                        }
                    })
                })
                .collect();
            wire_node(MAP, Value::Array(entries))
        }
        Value::Null => Value::Null,
    }
}

fn wire_node(type_name: &str, value: Value) -> Value {
    serde_json::json!({
        "type": format!("com.belmonttech.serialize.fsvalue.{}", type_name),
        "typeName": type_name,
        "message": { "value": value },
    })
}

fn discriminator(node: &Value) -> Option<&str> {
    if let Some(name) = node.get("typeName").and_then(Value::as_str) {
        return Some(name);
    }
    node.get("type")
        .and_then(Value::as_str)
        .and_then(|full| full.rsplit('.').next())
}

fn payload(node: &Value) -> Option<&Value> {
    node.get("message").and_then(|m| m.get("value"))
}

fn payload_items(node: &Value) -> &[Value] {
    payload(node)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn plain_key(key: Value) -> String {
    match key {
        Value::String(s) => s,
        other => other.to_string(),
    }
}
