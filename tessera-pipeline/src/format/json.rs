//! JSON renderers.

use serde_json::{Map, Value};

use crate::transform::{Token, TransformedDocument};

fn pretty(value: &Value) -> String {
    let mut out = serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string());
    out.push('\n');
    out
}

/// `{ "name": value }` keyed by the token name as declared.
pub(super) fn flat(tokens: &[Token]) -> String {
    let map: Map<String, Value> = tokens
        .iter()
        .map(|t| (t.name.clone(), t.value.clone()))
        .collect();
    pretty(&Value::Object(map))
}

/// `{ "props": { name: token }, "aliases": {...}, ...extra }`
pub(super) fn raw(tokens: &[Token], doc: &TransformedDocument) -> String {
    let mut root = Map::new();

    let props: Map<String, Value> = tokens
        .iter()
        .map(|t| {
            let token = serde_json::to_value(t).unwrap_or(Value::Null);
            (t.name.clone(), token)
        })
        .collect();
    root.insert("props".to_string(), Value::Object(props));

    if !doc.aliases.is_empty() {
        let aliases: Map<String, Value> = doc
            .aliases
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        root.insert("aliases".to_string(), Value::Object(aliases));
    }

    for (key, value) in &doc.extra {
        root.entry(key.clone()).or_insert_with(|| value.clone());
    }

    pretty(&Value::Object(root))
}
