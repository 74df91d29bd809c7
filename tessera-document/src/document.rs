//! The parsed form of a single token source file.

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

/// One design token as declared in a source file.
///
/// Nothing here is guaranteed present until validation: a freshly parsed
/// property may lack its `value` or `category`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Property {
    /// Property name (the key in `props`, or the `name` field in list form).
    #[serde(default)]
    pub name: String,
    /// Literal or alias expression.
    #[serde(default)]
    pub value: Option<Value>,
    /// Classification such as `color` or `spacing`.
    #[serde(default)]
    pub category: Option<String>,
    /// Optional refinement of the category (e.g. `color`, `size`).
    #[serde(default, rename = "type")]
    pub ty: Option<String>,
    /// Free-form description carried into formats that support comments.
    #[serde(default)]
    pub comment: Option<String>,
    /// Any other keys declared on the property.
    #[serde(flatten)]
    pub meta: IndexMap<String, Value>,
}

impl Property {
    /// Create a property with a value and category.
    pub fn new(name: impl Into<String>, value: Value, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value),
            category: Some(category.into()),
            ty: None,
            comment: None,
            meta: IndexMap::new(),
        }
    }

    /// Set the property type.
    pub fn with_type(mut self, ty: impl Into<String>) -> Self {
        self.ty = Some(ty.into());
        self
    }

    /// The kind used to match value transforms: `type` if set, else `category`.
    pub fn kind(&self) -> Option<&str> {
        self.ty.as_deref().or(self.category.as_deref())
    }
}

/// Defaults applied to every property of one file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Global {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, rename = "type")]
    pub ty: Option<String>,
}

/// Document-level metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Meta {
    /// Named values referenced with `{!name}` that are not themselves emitted.
    pub aliases: IndexMap<String, Value>,
    /// File-local property defaults.
    pub global: Global,
    /// Unrecognized top-level keys, preserved verbatim.
    pub extra: IndexMap<String, Value>,
}

/// A parsed token document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// Path the document was read from.
    pub path: PathBuf,
    /// Properties in declaration order.
    pub properties: IndexMap<String, Property>,
    /// Import specifiers in declaration order.
    pub imports: Vec<String>,
    pub meta: Meta,
}

impl Document {
    /// Create an empty document for `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }
}

// ============================================================================
// Source shape
// ============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct RawDocument {
    #[serde(default)]
    props: RawProps,
    #[serde(default)]
    imports: Vec<String>,
    #[serde(default)]
    aliases: IndexMap<String, RawAlias>,
    #[serde(default)]
    global: Global,
    #[serde(flatten)]
    extra: IndexMap<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawProps {
    Map(IndexMap<String, Property>),
    List(Vec<Property>),
}

impl Default for RawProps {
    fn default() -> Self {
        Self::Map(IndexMap::new())
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawAlias {
    Detailed { value: Value },
    Plain(Value),
}

impl RawDocument {
    /// Build the document, applying `global` defaults to its own properties.
    pub(crate) fn into_document(self, path: PathBuf) -> Document {
        let global = self.global;

        let declared: Vec<(String, Property)> = match self.props {
            RawProps::Map(map) => map
                .into_iter()
                .map(|(name, mut prop)| {
                    prop.name = name.clone();
                    (name, prop)
                })
                .collect(),
            RawProps::List(list) => list.into_iter().map(|p| (p.name.clone(), p)).collect(),
        };

        let properties = declared
            .into_iter()
            .map(|(name, mut prop)| {
                if prop.category.is_none() {
                    prop.category = global.category.clone();
                }
                if prop.ty.is_none() {
                    prop.ty = global.ty.clone();
                }
                (name, prop)
            })
            .collect();

        let aliases = self
            .aliases
            .into_iter()
            .map(|(name, alias)| match alias {
                RawAlias::Detailed { value } | RawAlias::Plain(value) => (name, value),
            })
            .collect();

        Document {
            path,
            properties,
            imports: self.imports,
            meta: Meta {
                aliases,
                global,
                extra: self.extra,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_kind_prefers_type() {
        let prop = Property::new("one", json!("#f00"), "background-color").with_type("color");
        assert_eq!(prop.kind(), Some("color"));

        let prop = Property::new("two", json!("4px"), "size");
        assert_eq!(prop.kind(), Some("size"));
    }

    #[test]
    fn test_global_defaults_fill_missing_fields() {
        let raw: RawDocument = serde_json::from_value(json!({
            "global": { "category": "color", "type": "color" },
            "props": {
                "one": { "value": "red" },
                "two": { "value": "4px", "category": "spacing" }
            }
        }))
        .unwrap();
        let doc = raw.into_document(PathBuf::from("/t/props.json"));

        assert_eq!(doc.properties["one"].category.as_deref(), Some("color"));
        assert_eq!(doc.properties["one"].ty.as_deref(), Some("color"));
        assert_eq!(doc.properties["two"].category.as_deref(), Some("spacing"));
        assert_eq!(doc.properties["two"].name, "two");
    }

    #[test]
    fn test_list_form_props() {
        let raw: RawDocument = serde_json::from_value(json!({
            "props": [
                { "name": "b", "value": 1, "category": "n" },
                { "name": "a", "value": 2, "category": "n" }
            ]
        }))
        .unwrap();
        let doc = raw.into_document(PathBuf::from("/t/props.json"));
        let names: Vec<_> = doc.properties.keys().cloned().collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_aliases_and_extra_keys() {
        let raw: RawDocument = serde_json::from_value(json!({
            "aliases": { "red": "#ff0000", "brand": { "value": "{!red}" } },
            "version": 2
        }))
        .unwrap();
        let doc = raw.into_document(PathBuf::from("/t/props.json"));

        assert_eq!(doc.meta.aliases["red"], json!("#ff0000"));
        assert_eq!(doc.meta.aliases["brand"], json!("{!red}"));
        assert_eq!(doc.meta.extra["version"], json!(2));
        assert!(doc.properties.is_empty());
    }

    #[test]
    fn test_unknown_property_keys_kept_in_meta() {
        let raw: RawDocument = serde_json::from_value(json!({
            "props": { "one": { "value": 1, "category": "n", "deprecated": true } }
        }))
        .unwrap();
        let doc = raw.into_document(PathBuf::from("/t/props.json"));
        assert_eq!(doc.properties["one"].meta["deprecated"], json!(true));
    }
}
