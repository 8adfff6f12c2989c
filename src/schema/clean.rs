//! Post-processing of built nodes before export.

use rustc_hash::FxHashSet;
use serde_json::Value;

use super::Node;
use crate::log;
use crate::utils::html::strip_tags;

/// Keys kept even when their value is empty, zero or false.
pub const NULLABLE: &[&str] = &[
    "price",
    "lowPrice",
    "highPrice",
    "ratingValue",
    "worstRating",
    "bestRating",
    "ratingCount",
    "reviewCount",
    "position",
];

/// Clean every node and drop later nodes that repeat an `@id`.
pub fn parse_graphs(nodes: Vec<Node>) -> Vec<Node> {
    let mut seen = FxHashSet::default();
    nodes
        .into_iter()
        .filter_map(|node| {
            let node = clean_map(node)?;
            if let Some(id) = node.get("@id").and_then(Value::as_str)
                && !seen.insert(id.to_owned())
            {
                log!("schema"; "duplicate node `{}` dropped", id);
                return None;
            }
            Some(node)
        })
        .collect()
}

/// Drop bare `{"@id": ..}` references to nodes that are not in the graph.
pub fn drop_dangling_refs(nodes: &mut [Node]) {
    let ids: FxHashSet<String> = nodes
        .iter()
        .filter_map(|node| node.get("@id").and_then(Value::as_str))
        .map(str::to_owned)
        .collect();
    for node in nodes.iter_mut() {
        node.retain(|key, value| key == "@id" || !prune(value, &ids));
    }
}

/// Prune `value` in place; `true` when nothing worth keeping is left.
fn prune(value: &mut Value, ids: &FxHashSet<String>) -> bool {
    match value {
        Value::Object(map) => {
            if map.len() == 1
                && let Some(id) = map.get("@id").and_then(Value::as_str)
            {
                let dangling = !ids.contains(id);
                if dangling {
                    log!("schema"; "reference to missing node `{}` dropped", id);
                }
                return dangling;
            }
            map.retain(|_, v| !prune(v, ids));
            map.is_empty()
        }
        Value::Array(items) => {
            items.retain_mut(|item| !prune(item, ids));
            items.is_empty()
        }
        _ => false,
    }
}

/// Cleaned map, `None` once nothing is left in it.
fn clean_map(map: Node) -> Option<Node> {
    let cleaned: Node = map
        .into_iter()
        .filter_map(|(key, value)| {
            let value = if key == "@type" {
                collapse_type(value)
            } else {
                value
            };
            clean_value(&key, value).map(|value| (key, value))
        })
        .collect();
    (!cleaned.is_empty()).then_some(cleaned)
}

fn clean_value(key: &str, value: Value) -> Option<Value> {
    let keep_empty = NULLABLE.contains(&key);
    match value {
        Value::String(s) => {
            let s = strip_tags(&s).trim().to_owned();
            (keep_empty || !s.is_empty()).then_some(Value::String(s))
        }
        Value::Array(items) => {
            let items: Vec<Value> = items
                .into_iter()
                .filter_map(|item| clean_value(key, item))
                .collect();
            (!items.is_empty()).then_some(Value::Array(items))
        }
        Value::Object(map) => clean_map(map).map(Value::Object),
        Value::Number(n) if !keep_empty && n.as_f64() == Some(0.0) => None,
        Value::Bool(false) | Value::Null if !keep_empty => None,
        other => Some(other),
    }
}

/// `["A", "B", "A"]` → `["A", "B"]`, `["A"]` → `"A"`.
fn collapse_type(value: Value) -> Value {
    let Value::Array(items) = value else {
        return value;
    };
    let mut unique: Vec<Value> = Vec::with_capacity(items.len());
    for item in items {
        if !unique.contains(&item) {
            unique.push(item);
        }
    }
    if unique.len() == 1 {
        unique.swap_remove(0)
    } else {
        Value::Array(unique)
    }
}
