//! React Native screen generator.

use crate::imports::{collect_kinds, unresolved_style_refs};
use crate::styles::{render_style_table, STYLE_SYMBOL};
use crate::{EmitOptions, EmittedModule};
use sprout_core::{ComponentKind, ComponentNode, ComponentTree, Properties};
use serde_json::Value;

/// Property rendered as a reference into the generated style table.
pub const STYLE_PROPERTY: &str = "style";

/// Indent of top-level nodes inside `return (`.
const BODY_INDENT: usize = 4;

/// Extra indent per nesting level.
const CHILD_INDENT: usize = 2;

/// React Native screen generator.
#[derive(Debug, Clone, Default)]
pub struct ScreenGenerator {
    options: EmitOptions,
}

impl ScreenGenerator {
    /// Create a generator with the given options.
    pub fn new(options: EmitOptions) -> Self {
        Self { options }
    }

    /// Generate the screen module for a tree.
    pub fn generate(&self, tree: &ComponentTree) -> EmittedModule {
        let kinds = collect_kinds(tree);
        let unresolved_styles = unresolved_style_refs(tree);
        for name in &unresolved_styles {
            tracing::warn!(style = %name, "style reference is not declared in the style table");
        }

        let body = tree
            .components
            .iter()
            .map(|node| self.generate_jsx(node, BODY_INDENT))
            .collect::<Vec<_>>()
            .join("\n");

        let code = self.generate_module(&kinds, &body);
        tracing::debug!(
            nodes = tree.node_count(),
            kinds = kinds.len(),
            bytes = code.len(),
            "emitted screen module"
        );

        EmittedModule {
            code,
            kinds,
            unresolved_styles,
        }
    }

    /// Generate JSX for a node and its subtree.
    fn generate_jsx(&self, node: &ComponentNode, indent: usize) -> String {
        let spaces = " ".repeat(indent);
        let tag = node.kind.name();
        let attributes = self.generate_attributes(&node.properties);
        let open = if attributes.is_empty() {
            format!("{spaces}<{tag}>")
        } else {
            format!("{spaces}<{tag} {attributes}>")
        };

        if node.children.is_empty() {
            return format!("{open}</{tag}>");
        }

        let mut lines = vec![open];
        for child in &node.children {
            lines.push(self.generate_jsx(child, indent + CHILD_INDENT));
        }
        lines.push(format!("{spaces}</{tag}>"));
        lines.join("\n")
    }

    /// Render properties as space-separated `key={value}` attributes.
    fn generate_attributes(&self, properties: &Properties) -> String {
        properties
            .iter()
            .map(|(key, value)| match value {
                Value::String(name) if key == STYLE_PROPERTY => format!("{key}={{styles.{name}}}"),
                // Display on Value is its compact JSON serialization.
                _ => format!("{key}={{{value}}}"),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Assemble imports, the screen function, and the style table.
    fn generate_module(&self, kinds: &[ComponentKind], body: &str) -> String {
        let imports = kinds
            .iter()
            .map(|kind| kind.name())
            .chain(std::iter::once(STYLE_SYMBOL))
            .collect::<Vec<_>>()
            .join(", ");

        let lines = [
            format!("import {{ {imports} }} from '{}';", self.options.runtime_module),
            String::new(),
            format!("export default function {}() {{", self.options.component_name),
            "  return (".to_string(),
            body.to_string(),
            "  );".to_string(),
            "}".to_string(),
            String::new(),
            render_style_table(),
        ];
        lines.join("\n")
    }
}
