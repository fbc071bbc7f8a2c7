//! Import and style-reference resolution over a whole tree.

use crate::generator::STYLE_PROPERTY;
use crate::styles;
use indexmap::IndexSet;
use serde_json::Value;
use sprout_core::{ComponentKind, ComponentTree};

/// Distinct kinds anywhere in the tree, in depth-first first-appearance order.
pub fn collect_kinds(tree: &ComponentTree) -> Vec<ComponentKind> {
    tree.nodes()
        .map(|node| node.kind)
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}

/// Style names referenced by `style` properties that the fixed table lacks.
pub fn unresolved_style_refs(tree: &ComponentTree) -> Vec<String> {
    tree.nodes()
        .filter_map(|node| match node.properties.get(STYLE_PROPERTY) {
            Some(Value::String(name)) if !styles::is_declared(name) => Some(name.clone()),
            _ => None,
        })
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}
