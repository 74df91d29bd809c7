//! Alias reference syntax.
//!
//! A string value may reference another token with `{!name}`. A string
//! consisting of exactly one reference is replaced by the referenced value
//! (keeping its JSON type); otherwise every reference is substituted
//! textually. References inside arrays and objects are followed too.

use serde_json::Value;

/// A piece of a string value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Reference(&'a str),
}

/// Split a string into literal text and `{!name}` references.
///
/// An unterminated `{!` or an empty name is kept as literal text.
pub fn segments(s: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut rest = s;

    while let Some(start) = rest.find("{!") {
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            break;
        };
        let name = after[..end].trim();
        if name.is_empty() {
            out.push(Segment::Text(&rest[..start + 2 + end + 1]));
        } else {
            if start > 0 {
                out.push(Segment::Text(&rest[..start]));
            }
            out.push(Segment::Reference(name));
        }
        rest = &after[end + 1..];
    }

    if !rest.is_empty() {
        out.push(Segment::Text(rest));
    }
    out
}

/// Collect every alias name referenced by `value`, in order of appearance.
pub fn references(value: &Value) -> Vec<&str> {
    let mut out = Vec::new();
    collect_references(value, &mut out);
    out
}

fn collect_references<'a>(value: &'a Value, out: &mut Vec<&'a str>) {
    match value {
        Value::String(s) => {
            for segment in segments(s) {
                if let Segment::Reference(name) = segment {
                    out.push(name);
                }
            }
        }
        Value::Array(items) => items.iter().for_each(|v| collect_references(v, out)),
        Value::Object(map) => map.values().for_each(|v| collect_references(v, out)),
        _ => {}
    }
}

/// Whether `value` contains any reference.
pub fn has_references(value: &Value) -> bool {
    !references(value).is_empty()
}

/// Substitute every reference in `value` using `lookup`.
///
/// Returns the first name `lookup` cannot resolve as the error.
pub fn interpolate<F>(value: &Value, lookup: &mut F) -> Result<Value, String>
where
    F: FnMut(&str) -> Option<Value>,
{
    match value {
        Value::String(s) => interpolate_str(s, lookup),
        Value::Array(items) => items
            .iter()
            .map(|v| interpolate(v, lookup))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        Value::Object(map) => {
            let mut out = serde_json::Map::new();
            for (key, v) in map {
                out.insert(key.clone(), interpolate(v, lookup)?);
            }
            Ok(Value::Object(out))
        }
        other => Ok(other.clone()),
    }
}

fn interpolate_str<F>(s: &str, lookup: &mut F) -> Result<Value, String>
where
    F: FnMut(&str) -> Option<Value>,
{
    let parts = segments(s);
    if let &[Segment::Reference(name)] = parts.as_slice() {
        return lookup(name).ok_or_else(|| name.to_string());
    }

    let mut out = String::new();
    for part in parts {
        match part {
            Segment::Text(text) => out.push_str(text),
            Segment::Reference(name) => {
                let resolved = lookup(name).ok_or_else(|| name.to_string())?;
                out.push_str(&display_value(&resolved));
            }
        }
    }
    Ok(Value::String(out))
}

/// Render a value the way it reads inside a composite string.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
