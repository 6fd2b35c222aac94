//! Literal values rendered as source-level literal types.

use super::sanitize::is_identifier;
use crate::registry::PortType;
use itertools::Itertools;
use serde_json::{Value, json};

/// The literal an entry node receives for a required port the user left empty.
pub fn default_value(port_type: PortType) -> Value {
    match port_type {
        PortType::String => json!("hello_world"),
        PortType::Number => json!(42),
        PortType::Boolean => json!(true),
        PortType::Object => json!({ "id": 1, "name": "example" }),
        PortType::Array => json!([1, 2, 3]),
        PortType::Function | PortType::Any => Value::Null,
    }
}

/// Renders a JSON value as a literal type: strings double-quoted with JSON
/// escapes, objects as `{ key: value; ... }`, arrays as tuples.
pub fn render_literal(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(_) => value.to_string(),
        Value::Array(items) => format!("[{}]", items.iter().map(render_literal).join(", ")),
        Value::Object(map) if map.is_empty() => "{}".to_string(),
        Value::Object(map) => format!(
            "{{ {} }}",
            map.iter()
                .map(|(k, v)| format!("{}: {}", render_key(k), render_literal(v)))
                .join("; ")
        ),
    }
}

/// A property key, quoted unless it is a plain identifier.
pub fn render_key(key: &str) -> String {
    if is_identifier(key) {
        key.to_string()
    } else {
        Value::String(key.to_string()).to_string()
    }
}

/// A single-quoted string literal type, used for node and port names.
///
/// Escapes follow JSON, so control characters never break the line.
pub fn quote(text: &str) -> String {
    let escaped = Value::String(text.to_string()).to_string();
    let inner = &escaped[1..escaped.len() - 1];
    format!("'{}'", inner.replace("\\\"", "\"").replace('\'', "\\'"))
}
