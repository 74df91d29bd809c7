//! Alias dependency graph over a merged document.
//!
//! Nodes are properties and alias-table entries; an edge `a -> b` means the
//! value of `a` references `b`. A reference name resolves to a property
//! first, then to an alias entry.

use std::{collections::HashMap, fmt};

use indexmap::IndexMap;
use serde_json::Value;
use tessera_document::{MergedDocument, alias};

/// A node in the alias graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    Property(String),
    Alias(String),
}

impl Symbol {
    /// The declared name of the node.
    pub fn name(&self) -> &str {
        match self {
            Self::Property(name) | Self::Alias(name) => name,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Property(name) => write!(f, "Property \"{}\"", name),
            Self::Alias(name) => write!(f, "Alias \"{}\"", name),
        }
    }
}

/// Resolve a reference name against a merged document.
pub fn lookup(doc: &MergedDocument, name: &str) -> Option<Symbol> {
    if doc.properties.contains_key(name) {
        Some(Symbol::Property(name.to_string()))
    } else if doc.aliases.contains_key(name) {
        Some(Symbol::Alias(name.to_string()))
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

/// Edges between properties and aliases, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct AliasGraph {
    edges: IndexMap<Symbol, Vec<Symbol>>,
    undefined: Vec<(Symbol, String)>,
}

impl AliasGraph {
    /// Build the graph for a merged document.
    ///
    /// Properties come first, then alias entries, each in declaration order.
    /// References that resolve to nothing are recorded, not fatal.
    pub fn build(doc: &MergedDocument) -> Self {
        let mut graph = Self::default();

        let nodes = doc
            .properties
            .iter()
            .map(|(name, prop)| (Symbol::Property(name.clone()), prop.value.as_ref()))
            .chain(
                doc.aliases
                    .iter()
                    .map(|(name, value)| (Symbol::Alias(name.clone()), Some(value))),
            );

        for (symbol, value) in nodes {
            let targets = value.map(|v| graph.targets(doc, &symbol, v)).unwrap_or_default();
            graph.edges.insert(symbol, targets);
        }

        graph
    }

    fn targets(&mut self, doc: &MergedDocument, owner: &Symbol, value: &Value) -> Vec<Symbol> {
        let mut out = Vec::new();
        for name in alias::references(value) {
            match lookup(doc, name) {
                Some(target) => {
                    if !out.contains(&target) {
                        out.push(target);
                    }
                }
                None => self.undefined.push((owner.clone(), name.to_string())),
            }
        }
        out
    }

    /// The first reference that resolves to nothing, with its owner.
    pub fn first_undefined(&self) -> Option<(&Symbol, &str)> {
        self.undefined
            .first()
            .map(|(owner, name)| (owner, name.as_str()))
    }

    /// Symbols referenced by `symbol`.
    pub fn dependencies(&self, symbol: &Symbol) -> &[Symbol] {
        self.edges.get(symbol).map(Vec::as_slice).unwrap_or_default()
    }

    /// Order every node so that each comes after everything it references.
    ///
    /// Ties keep declaration order. On a cycle, returns the names along it,
    /// starting and ending with the same node.
    pub fn topological_order(&self) -> std::result::Result<Vec<Symbol>, Vec<String>> {
        let mut marks: HashMap<&Symbol, Mark> = HashMap::new();
        let mut order = Vec::with_capacity(self.edges.len());
        let mut path: Vec<&Symbol> = Vec::new();

        for start in self.edges.keys() {
            self.visit(start, &mut marks, &mut path, &mut order)?;
        }
        Ok(order)
    }

    fn visit<'a>(
        &'a self,
        symbol: &'a Symbol,
        marks: &mut HashMap<&'a Symbol, Mark>,
        path: &mut Vec<&'a Symbol>,
        order: &mut Vec<Symbol>,
    ) -> std::result::Result<(), Vec<String>> {
        match marks.get(symbol) {
            Some(Mark::Done) => return Ok(()),
            Some(Mark::Visiting) => {
                let start = path.iter().position(|s| *s == symbol).unwrap_or(0);
                let mut cycle: Vec<String> =
                    path[start..].iter().map(|s| s.name().to_string()).collect();
                cycle.push(symbol.name().to_string());
                return Err(cycle);
            }
            None => {}
        }

        marks.insert(symbol, Mark::Visiting);
        path.push(symbol);
        for dep in self.dependencies(symbol) {
            self.visit(dep, marks, path, order)?;
        }
        path.pop();
        marks.insert(symbol, Mark::Done);
        order.push(symbol.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tessera_document::Property;

    use super::*;

    fn doc(props: &[(&str, Value)], aliases: &[(&str, Value)]) -> MergedDocument {
        let mut doc = MergedDocument::new();
        for (name, value) in props {
            doc.properties.insert(
                name.to_string(),
                Property::new(*name, value.clone(), "color"),
            );
        }
        for (name, value) in aliases {
            doc.aliases.insert(name.to_string(), value.clone());
        }
        doc
    }

    fn names(order: &[Symbol]) -> Vec<&str> {
        order.iter().map(Symbol::name).collect()
    }

    #[test]
    fn test_dependency_order() {
        let doc = doc(
            &[
                ("c", json!("{!b}")),
                ("b", json!("{!a}")),
                ("a", json!("#fff")),
            ],
            &[],
        );
        let graph = AliasGraph::build(&doc);
        let order = graph.topological_order().unwrap();
        assert_eq!(names(&order), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_independent_nodes_keep_declaration_order() {
        let doc = doc(&[("x", json!(1)), ("y", json!(2))], &[("z", json!(3))]);
        let order = AliasGraph::build(&doc).topological_order().unwrap();
        assert_eq!(names(&order), vec!["x", "y", "z"]);
    }

    #[test]
    fn test_property_shadows_alias() {
        let doc = doc(
            &[("red", json!("#f00")), ("one", json!("{!red}"))],
            &[("red", json!("#e00"))],
        );
        let graph = AliasGraph::build(&doc);
        assert_eq!(
            graph.dependencies(&Symbol::Property("one".into())),
            &[Symbol::Property("red".into())]
        );
    }

    #[test]
    fn test_alias_entries_reference_each_other() {
        let doc = doc(
            &[("one", json!("{!brand}"))],
            &[("brand", json!("{!red}")), ("red", json!("#f00"))],
        );
        let order = AliasGraph::build(&doc).topological_order().unwrap();
        assert_eq!(names(&order), vec!["red", "brand", "one"]);
    }

    #[test]
    fn test_cycle_detected() {
        let doc = doc(&[("a", json!("{!b}")), ("b", json!("{!a}"))], &[]);
        let cycle = AliasGraph::build(&doc).topological_order().unwrap_err();
        assert_eq!(cycle, vec!["a", "b", "a"]);
    }

    #[test]
    fn test_self_reference_is_a_cycle() {
        let doc = doc(&[("a", json!("1px {!a}"))], &[]);
        let cycle = AliasGraph::build(&doc).topological_order().unwrap_err();
        assert_eq!(cycle, vec!["a", "a"]);
    }

    #[test]
    fn test_undefined_reference_recorded() {
        let doc = doc(&[("one", json!("{!missing}"))], &[]);
        let graph = AliasGraph::build(&doc);
        let (owner, name) = graph.first_undefined().unwrap();
        assert_eq!(owner, &Symbol::Property("one".into()));
        assert_eq!(name, "missing");
        assert!(graph.topological_order().is_ok());
    }
}
