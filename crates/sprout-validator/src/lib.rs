//! Structural validation for Sprout component trees.
//!
//! Validation turns an untyped candidate tree (`serde_json::Value`) into a
//! typed [`ComponentTree`], or reports the first structural violation found in
//! depth-first order. Property values and style objects are accepted as
//! free-form JSON and are never rewritten.

mod descent;

use serde_json::Value;
use sprout_core::{ComponentTree, ValidationError};

/// Default maximum nesting depth; top-level components are at depth 1.
///
/// Each node level costs two levels of JSON nesting (the node object and its
/// `children` array), so this stays well inside `serde_json`'s parse limit of
/// 128 and deep trees reach the validator instead of failing to parse.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Options for validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatorOptions {
    /// Deepest allowed node level. Deeper trees fail as malformed input.
    pub max_depth: usize,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Validate a candidate tree with the default options.
///
/// # Example
///
/// ```ignore
/// use serde_json::json;
///
/// let tree = sprout_validator::validate(&json!({
///     "components": [{ "kind": "Container", "properties": {}, "children": [] }]
/// }))?;
/// assert_eq!(tree.components.len(), 1);
/// ```
pub fn validate(raw: &Value) -> Result<ComponentTree, ValidationError> {
    validate_with_options(raw, &ValidatorOptions::default())
}

/// Validate a candidate tree.
pub fn validate_with_options(
    raw: &Value,
    options: &ValidatorOptions,
) -> Result<ComponentTree, ValidationError> {
    descent::TreeValidator::new(options).validate_tree(raw)
}
