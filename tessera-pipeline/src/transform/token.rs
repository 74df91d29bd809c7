//! Fully resolved tokens, the output of the transform stage.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// A property whose value is a concrete platform literal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub name: String,
    pub value: Value,
    pub category: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(flatten)]
    pub meta: IndexMap<String, Value>,
}

impl Token {
    /// Create a token with no type, comment or extra keys.
    pub fn new(name: impl Into<String>, value: Value, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value,
            category: category.into(),
            ty: None,
            comment: None,
            meta: IndexMap::new(),
        }
    }

    /// The kind used for matching: `type` if set, else `category`.
    pub fn kind(&self) -> &str {
        self.ty.as_deref().unwrap_or(&self.category)
    }
}

/// A merged document after every alias has been substituted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformedDocument {
    /// Tokens in declaration order.
    pub tokens: Vec<Token>,
    /// Alias table with references resolved.
    pub aliases: IndexMap<String, Value>,
    /// Unrecognized top-level keys from the sources.
    pub extra: IndexMap<String, Value>,
}

impl TransformedDocument {
    /// Look up a token by name.
    pub fn token(&self, name: &str) -> Option<&Token> {
        self.tokens.iter().find(|t| t.name == name)
    }
}
