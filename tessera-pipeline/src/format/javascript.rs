//! JavaScript module renderers.

use std::collections::HashMap;

use serde_json::Value;
use tessera_core::{CodeBuilder, Indent, to_camel_case};
use tracing::warn;

use crate::transform::Token;

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

fn literal(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}

fn object_key(name: &str) -> String {
    let key = to_camel_case(name);
    if is_identifier(&key) {
        key
    } else {
        literal(&Value::String(key))
    }
}

fn binding_name(name: &str) -> String {
    let key = to_camel_case(name);
    if is_identifier(&key) {
        key
    } else {
        format!("_{}", key)
    }
}

/// Keys that more than one token renders to. Each collision is logged.
fn colliding_keys(tokens: &[Token], key: fn(&str) -> String) -> Vec<String> {
    let mut seen: HashMap<String, &str> = HashMap::new();
    let mut collisions = Vec::new();
    for token in tokens {
        let rendered = key(&token.name);
        match seen.get(rendered.as_str()) {
            Some(first) => {
                warn!(
                    key = %rendered,
                    first = %first,
                    token = %token.name,
                    "tokens render to the same key"
                );
                collisions.push(rendered);
            }
            None => {
                seen.insert(rendered, &token.name);
            }
        }
    }
    collisions
}

/// `module.exports = { camelName: value, ... };`
pub(super) fn common_js(tokens: &[Token]) -> String {
    if tokens.is_empty() {
        return "module.exports = {};\n".to_string();
    }

    colliding_keys(tokens, object_key);
    let mut code = CodeBuilder::new(Indent::JS);
    code.push_line("module.exports = {").push_indent();
    for token in tokens {
        if let Some(comment) = &token.comment {
            code.push_comment("//", comment);
        }
        code.push_line(&format!(
            "{}: {},",
            object_key(&token.name),
            literal(&token.value)
        ));
    }
    code.push_dedent().push_line("};");
    code.build()
}

/// `export const camelName = value;` per token.
pub(super) fn module_js(tokens: &[Token]) -> String {
    colliding_keys(tokens, binding_name);
    let mut code = CodeBuilder::new(Indent::JS);
    for token in tokens {
        if let Some(comment) = &token.comment {
            code.push_comment("//", comment);
        }
        code.push_line(&format!(
            "export const {} = {};",
            binding_name(&token.name),
            literal(&token.value)
        ));
    }
    code.build()
}
