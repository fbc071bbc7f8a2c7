//! The closed component grammar.
//!
//! A well-formed tree is described by one recursive shape:
//!
//! ```text
//! Tree      := { components: [Component, ...], styles?: { name: any } }
//! Component := { kind: ComponentKind, properties?: { key: any }, children?: [Component] }
//! ```
//!
//! The grammar carries no per-kind rules. Leaf-like kinds (`Text`, `Image`) may
//! still have children.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Field holding the component sequence of a tree.
pub const COMPONENTS_FIELD: &str = "components";

/// Field holding the optional style mapping of a tree.
pub const STYLES_FIELD: &str = "styles";

/// Accepted spellings of a node's kind field, canonical first.
pub const KIND_FIELDS: [&str; 2] = ["kind", "type"];

/// Accepted spellings of a node's property mapping, canonical first.
pub const PROPERTIES_FIELDS: [&str; 2] = ["properties", "props"];

/// Field holding a node's children.
pub const CHILDREN_FIELD: &str = "children";

/// A node kind from the closed set of UI primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ComponentKind {
    #[serde(alias = "View")]
    Container,
    Text,
    TextInput,
    #[serde(alias = "Pressable")]
    Button,
    Image,
}

impl ComponentKind {
    /// Every kind, in declaration order.
    pub const ALL: [ComponentKind; 5] = [
        ComponentKind::Container,
        ComponentKind::Text,
        ComponentKind::TextInput,
        ComponentKind::Button,
        ComponentKind::Image,
    ];

    /// Canonical name, used as the emitted tag and import name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Container => "Container",
            Self::Text => "Text",
            Self::TextInput => "TextInput",
            Self::Button => "Button",
            Self::Image => "Image",
        }
    }

    /// Resolve a tag to a kind, accepting the canonical names and the
    /// upstream aliases `View` and `Pressable`. Matching is case-sensitive.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "Container" | "View" => Some(Self::Container),
            "Text" => Some(Self::Text),
            "TextInput" => Some(Self::TextInput),
            "Button" | "Pressable" => Some(Self::Button),
            "Image" => Some(Self::Image),
            _ => None,
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether `tag` names a kind of the grammar.
pub fn is_known_kind(tag: &str) -> bool {
    ComponentKind::from_tag(tag).is_some()
}
