//! Recursive-descent checking of candidate trees.

use crate::ValidatorOptions;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use sprout_core::{
    ComponentKind, ComponentNode, ComponentTree, Properties, ValidationError,
    ValidationErrorKind, CHILDREN_FIELD, COMPONENTS_FIELD, KIND_FIELDS, PROPERTIES_FIELDS,
    STYLES_FIELD,
};

type Result<T> = std::result::Result<T, ValidationError>;

pub(crate) struct TreeValidator {
    max_depth: usize,
}

impl TreeValidator {
    pub(crate) fn new(options: &ValidatorOptions) -> Self {
        Self {
            max_depth: options.max_depth,
        }
    }

    pub(crate) fn validate_tree(&self, raw: &Value) -> Result<ComponentTree> {
        let Value::Object(root) = raw else {
            return Err(malformed(
                "$",
                format!("expected a tree object, found {}", describe(raw)),
            ));
        };

        let items = match root.get(COMPONENTS_FIELD) {
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(malformed(
                    COMPONENTS_FIELD,
                    format!("expected a sequence of components, found {}", describe(other)),
                ))
            }
            None => return Err(malformed("$", "missing 'components' sequence")),
        };

        // Only the top level must be non-empty; nested children may be empty.
        if items.is_empty() {
            return Err(ValidationError::new(
                ValidationErrorKind::EmptyTree,
                COMPONENTS_FIELD,
                "tree must contain at least one component",
            ));
        }

        let components = items
            .iter()
            .enumerate()
            .map(|(i, item)| self.validate_node(item, &format!("{COMPONENTS_FIELD}[{i}]"), 1))
            .collect::<Result<Vec<_>>>()?;

        let styles = match root.get(STYLES_FIELD) {
            None => None,
            Some(Value::Object(map)) => Some(to_index_map(map)),
            Some(other) => {
                return Err(malformed(
                    STYLES_FIELD,
                    format!("expected a mapping of style names, found {}", describe(other)),
                ))
            }
        };

        Ok(ComponentTree { components, styles })
    }

    fn validate_node(&self, value: &Value, path: &str, depth: usize) -> Result<ComponentNode> {
        if depth > self.max_depth {
            return Err(malformed(
                path,
                format!("nesting exceeds the maximum depth of {}", self.max_depth),
            ));
        }

        let Value::Object(fields) = value else {
            return Err(malformed(
                path,
                format!("expected a component object, found {}", describe(value)),
            ));
        };

        let kind = self.validate_kind(fields, path)?;
        let properties = self.validate_properties(fields, path)?;

        let children = match fields.get(CHILDREN_FIELD) {
            None => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    self.validate_node(item, &format!("{path}.{CHILDREN_FIELD}[{i}]"), depth + 1)
                })
                .collect::<Result<Vec<_>>>()?,
            Some(other) => {
                return Err(malformed(
                    format!("{path}.{CHILDREN_FIELD}"),
                    format!("expected a sequence of components, found {}", describe(other)),
                ))
            }
        };

        Ok(ComponentNode {
            kind,
            properties,
            children,
        })
    }

    fn validate_kind(&self, fields: &Map<String, Value>, path: &str) -> Result<ComponentKind> {
        let Some(tag) = KIND_FIELDS.iter().find_map(|name| fields.get(*name)) else {
            return Err(malformed(path, "component is missing its 'kind'"));
        };

        match tag {
            Value::String(tag) => ComponentKind::from_tag(tag).ok_or_else(|| {
                ValidationError::new(
                    ValidationErrorKind::UnknownComponentKind,
                    path,
                    format!("unknown component kind '{tag}'"),
                )
            }),
            other => Err(malformed(
                path,
                format!("component kind must be a string, found {}", describe(other)),
            )),
        }
    }

    fn validate_properties(&self, fields: &Map<String, Value>, path: &str) -> Result<Properties> {
        let found = PROPERTIES_FIELDS
            .iter()
            .find_map(|name| fields.get(*name).map(|value| (*name, value)));

        match found {
            None => Ok(Properties::new()),
            Some((_, Value::Object(map))) => Ok(to_index_map(map)),
            Some((field, other)) => Err(ValidationError::new(
                ValidationErrorKind::InvalidProperties,
                format!("{path}.{field}"),
                format!("expected a key/value mapping, found {}", describe(other)),
            )),
        }
    }
}

fn to_index_map(map: &Map<String, Value>) -> IndexMap<String, Value> {
    map.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
}

fn malformed(path: impl Into<String>, message: impl Into<String>) -> ValidationError {
    ValidationError::new(ValidationErrorKind::MalformedInput, path, message)
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
