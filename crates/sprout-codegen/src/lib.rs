//! Code generation from validated Sprout trees to React Native screens.
//!
//! Emission is total: every [`ComponentTree`] yields a module, and the same
//! tree always yields byte-identical output.
//!
//! # Example
//!
//! ```ignore
//! use sprout_codegen::emit;
//!
//! let tree = sprout_validator::validate(&raw)?;
//! let module = emit(&tree);
//! println!("{}", module.code);
//! ```

mod generator;
mod imports;
pub mod styles;

pub use generator::{ScreenGenerator, STYLE_PROPERTY};
pub use imports::{collect_kinds, unresolved_style_refs};
pub use styles::{StyleEntry, STYLE_TABLE};

use serde::Serialize;
use sprout_core::{ComponentKind, ComponentTree};

/// Options for module emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    /// Module the component kinds and `StyleSheet` are imported from.
    pub runtime_module: String,
    /// Name of the default-exported screen function.
    pub component_name: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            runtime_module: "react-native-web".to_string(),
            component_name: "GeneratedScreen".to_string(),
        }
    }
}

/// An emitted screen module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmittedModule {
    /// Module source.
    pub code: String,
    /// Distinct kinds in first-appearance order, as listed in the import line.
    pub kinds: Vec<ComponentKind>,
    /// Style names referenced by nodes but missing from [`STYLE_TABLE`].
    pub unresolved_styles: Vec<String>,
}

/// Emit a module with the default options.
pub fn emit(tree: &ComponentTree) -> EmittedModule {
    ScreenGenerator::default().generate(tree)
}

/// Emit a module.
pub fn emit_with_options(tree: &ComponentTree, options: &EmitOptions) -> EmittedModule {
    ScreenGenerator::new(options.clone()).generate(tree)
}
