//! The fixed style table appended to every emitted module.
//!
//! The table never depends on the input tree; a node's `style` property only
//! names one of these entries.

/// Symbol imported alongside the component kinds to build the table.
pub const STYLE_SYMBOL: &str = "StyleSheet";

/// A named style with literal declarations, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleEntry {
    pub name: &'static str,
    /// `(property, JavaScript literal)` pairs.
    pub declarations: &'static [(&'static str, &'static str)],
}

pub const STYLE_TABLE: &[StyleEntry] = &[
    StyleEntry {
        name: "container",
        declarations: &[("flex", "1"), ("padding", "20")],
    },
    StyleEntry {
        name: "text",
        declarations: &[("fontSize", "16"), ("color", "'#000'")],
    },
    StyleEntry {
        name: "input",
        declarations: &[
            ("height", "40"),
            ("borderWidth", "1"),
            ("borderColor", "'#ccc'"),
            ("borderRadius", "8"),
            ("padding", "10"),
            ("marginVertical", "10"),
        ],
    },
    StyleEntry {
        name: "button",
        declarations: &[
            ("backgroundColor", "'#007AFF'"),
            ("padding", "15"),
            ("borderRadius", "8"),
            ("alignItems", "'center'"),
        ],
    },
    StyleEntry {
        name: "buttonText",
        declarations: &[("color", "'#fff'"), ("fontSize", "16"), ("fontWeight", "'bold'")],
    },
    StyleEntry {
        name: "image",
        declarations: &[
            ("width", "'100%'"),
            ("height", "200"),
            ("borderRadius", "8"),
            ("marginVertical", "10"),
        ],
    },
];

/// Whether `name` is an entry of the fixed table.
pub fn is_declared(name: &str) -> bool {
    STYLE_TABLE.iter().any(|entry| entry.name == name)
}

/// Render the `const styles = StyleSheet.create({ ... });` declaration.
pub fn render_style_table() -> String {
    let mut lines = vec![format!("const styles = {STYLE_SYMBOL}.create({{")];
    for entry in STYLE_TABLE {
        lines.push(format!("  {}: {{", entry.name));
        for (property, literal) in entry.declarations {
            lines.push(format!("    {property}: {literal},"));
        }
        lines.push("  },".to_string());
    }
    lines.push("});".to_string());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_has_six_fixed_entries() {
        let names: Vec<_> = STYLE_TABLE.iter().map(|e| e.name).collect();
        assert_eq!(
            names,
            vec!["container", "text", "input", "button", "buttonText", "image"]
        );
    }

    #[test]
    fn test_is_declared() {
        assert!(is_declared("buttonText"));
        assert!(!is_declared("title"));
    }

    #[test]
    fn test_render_style_table() {
        let table = render_style_table();
        assert!(table.starts_with("const styles = StyleSheet.create({\n  container: {\n    flex: 1,"));
        assert!(table.contains("  image: {\n    width: '100%',\n"));
        assert!(table.ends_with("  },\n});"));
    }
}
