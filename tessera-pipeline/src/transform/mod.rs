//! Transform engine: alias substitution and platform value conversion.
//!
//! Values are evaluated in alias-dependency order. A value that is exactly
//! one reference to another property takes that property's transformed
//! value unchanged; every other value is interpolated and then run through
//! the platform's value transforms that match the property's kind.
//!
//! Alias-table entries always hold unconverted values, so a property that
//! reaches another property through an alias entry is converted once, in
//! its own kind.

mod color;
mod token;
mod value;

use std::{collections::HashMap, str::FromStr};

use serde_json::Value;
use tessera_document::{MergedDocument, alias};
use tracing::{debug, trace};

pub use color::Color;
pub use token::{Token, TransformedDocument};
pub use value::ValueTransform;

use crate::{
    Error, Result,
    graph::{AliasGraph, Symbol, lookup},
};

/// A named platform transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// Aliases resolved, values untouched.
    Raw,
    /// CSS-ready values.
    Web,
    Ios,
    Android,
}

impl Transform {
    /// All transforms, in display order.
    pub const ALL: [Transform; 4] = [Self::Raw, Self::Web, Self::Ios, Self::Android];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::Web => "web",
            Self::Ios => "ios",
            Self::Android => "android",
        }
    }

    /// The value conversions applied, in order.
    pub fn value_transforms(&self) -> &'static [ValueTransform] {
        use ValueTransform::*;
        match self {
            Self::Raw => &[],
            Self::Web => &[ColorRgb],
            Self::Ios => &[ColorRgb, RelativePixelValue, PercentageFloat],
            Self::Android => &[ColorHex8Argb, RelativePixelValue, PercentageFloat],
        }
    }

    /// Transform a merged document.
    pub fn apply(&self, doc: &MergedDocument) -> Result<TransformedDocument> {
        Engine::new(*self, doc).run()
    }
}

impl FromStr for Transform {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| {
                Box::new(Error::UnknownTransform {
                    name: s.to_string(),
                    valid: Self::ALL.map(|t| t.name()).join(", "),
                })
            })
    }
}

/// Transform `doc` with the transform named `name`.
pub fn transform(doc: &MergedDocument, name: &str) -> Result<TransformedDocument> {
    name.parse::<Transform>()?.apply(doc)
}

/// Which value a property reference substitutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    /// Values after alias substitution, before any conversion.
    Source,
    /// Property references take the converted value.
    Output,
}

struct Engine<'a> {
    transform: Transform,
    doc: &'a MergedDocument,
    source: HashMap<Symbol, Value>,
    output: HashMap<String, Value>,
}

impl<'a> Engine<'a> {
    fn new(transform: Transform, doc: &'a MergedDocument) -> Self {
        Self {
            transform,
            doc,
            source: HashMap::new(),
            output: HashMap::new(),
        }
    }

    fn run(mut self) -> Result<TransformedDocument> {
        let graph = AliasGraph::build(self.doc);
        if let Some((owner, alias)) = graph.first_undefined() {
            return Err(Box::new(Error::UndefinedAlias {
                owner: owner.clone(),
                alias: alias.to_string(),
            }));
        }
        let order = graph
            .topological_order()
            .map_err(|cycle| Box::new(Error::AliasCycle { cycle }))?;

        debug!(
            transform = self.transform.name(),
            nodes = order.len(),
            "evaluating values"
        );

        for symbol in order {
            match &symbol {
                Symbol::Alias(name) => {
                    let value = self.resolve_alias(name)?;
                    self.source.insert(symbol, value);
                }
                Symbol::Property(name) => {
                    let (source, output) = self.resolve_property(name)?;
                    self.output.insert(name.clone(), output);
                    self.source.insert(symbol, source);
                }
            }
        }

        let mut tokens = Vec::with_capacity(self.doc.properties.len());
        for (name, prop) in &self.doc.properties {
            let category = prop
                .category
                .clone()
                .ok_or_else(|| Error::missing_key(name, "category"))?;
            let value = self.output.remove(name).unwrap_or(Value::Null);
            tokens.push(Token {
                name: name.clone(),
                value,
                category,
                ty: prop.ty.clone(),
                comment: prop.comment.clone(),
                meta: prop.meta.clone(),
            });
        }

        let aliases = self
            .doc
            .aliases
            .keys()
            .map(|name| {
                let value = self
                    .source
                    .remove(&Symbol::Alias(name.clone()))
                    .unwrap_or(Value::Null);
                (name.clone(), value)
            })
            .collect();

        Ok(TransformedDocument {
            tokens,
            aliases,
            extra: self.doc.extra.clone(),
        })
    }

    fn substitute(&self, owner: Symbol, value: &Value, stage: Stage) -> Result<Value> {
        let mut resolve = |name: &str| match lookup(self.doc, name)? {
            Symbol::Property(prop) if stage == Stage::Output => self.output.get(&prop).cloned(),
            symbol => self.source.get(&symbol).cloned(),
        };
        alias::interpolate(value, &mut resolve)
            .map_err(|alias| Box::new(Error::UndefinedAlias { owner, alias }))
    }

    fn resolve_alias(&self, name: &str) -> Result<Value> {
        self.substitute(
            Symbol::Alias(name.to_string()),
            &self.doc.aliases[name],
            Stage::Source,
        )
    }

    /// The property's source value and its converted value.
    fn resolve_property(&self, name: &str) -> Result<(Value, Value)> {
        let prop = &self.doc.properties[name];
        let raw = prop
            .value
            .as_ref()
            .ok_or_else(|| Error::missing_key(name, "value"))?;
        let owner = Symbol::Property(name.to_string());
        let source = self.substitute(owner.clone(), raw, Stage::Source)?;

        if let Value::String(s) = raw
            && let &[alias::Segment::Reference(target)] = alias::segments(s).as_slice()
            && let Some(Symbol::Property(_)) = lookup(self.doc, target)
        {
            trace!(property = name, alias = target, "copying transformed alias");
            let output = self.substitute(owner, raw, Stage::Output)?;
            return Ok((source, output));
        }

        let mut output = self.substitute(owner, raw, Stage::Output)?;
        for vt in self.transform.value_transforms() {
            if vt.matches(prop.kind(), &output) {
                output = vt
                    .apply(&output)
                    .map_err(|reason| Error::unsupported_value(name, vt.name(), reason))?;
            }
        }
        Ok((source, output))
    }
}
