//! Typed component trees.
//!
//! These are only produced by validation (or built directly in code); raw
//! candidate trees travel as `serde_json::Value` until then. They implement
//! `Serialize` only; the validator is the one way to build them from JSON.

use crate::grammar::ComponentKind;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// A node's properties, in insertion order.
pub type Properties = IndexMap<String, Value>;

/// A single component in the tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentNode {
    pub kind: ComponentKind,
    pub properties: Properties,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ComponentNode>,
}

impl ComponentNode {
    /// Create a node with no properties and no children.
    pub fn new(kind: ComponentKind) -> Self {
        Self {
            kind,
            properties: Properties::new(),
            children: Vec::new(),
        }
    }

    /// Add a property.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Add a child node.
    pub fn with_child(mut self, child: ComponentNode) -> Self {
        self.children.push(child);
        self
    }
}

/// A validated component tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentTree {
    pub components: Vec<ComponentNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub styles: Option<IndexMap<String, Value>>,
}

impl ComponentTree {
    /// Create a tree from its top-level components.
    pub fn new(components: Vec<ComponentNode>) -> Self {
        Self {
            components,
            styles: None,
        }
    }

    /// Iterate over every node in depth-first pre-order.
    pub fn nodes(&self) -> Nodes<'_> {
        Nodes {
            stack: self.components.iter().rev().collect(),
        }
    }

    /// Total number of nodes at every depth.
    pub fn node_count(&self) -> usize {
        self.nodes().count()
    }
}

/// Depth-first pre-order iterator over a tree's nodes.
pub struct Nodes<'a> {
    stack: Vec<&'a ComponentNode>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = &'a ComponentNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
