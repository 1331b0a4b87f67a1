//! Field registry: per-key metadata for every fillable blank

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use super::error::ConfigurationError;

/// Kind of control a field is rendered with
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    /// Free text input
    Input,
    /// Dropdown over a fixed option list
    #[serde(alias = "select-with-options")]
    Select,
}

/// A selectable option of a choice field
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NameValue {
    /// Label shown to the user
    #[serde(alias = "label")]
    pub name: String,
    /// Value stored in the control when selected
    pub value: Value,
}

impl NameValue {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Static metadata describing one field
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub placeholder: String,
    /// Initial value of the control; `null` when absent
    #[serde(default)]
    pub default: Value,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<NameValue>,
}

impl FieldDescriptor {
    /// Text input with a `null` default
    pub fn input(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
            default: Value::Null,
            kind: FieldKind::Input,
            options: Vec::new(),
        }
    }

    /// Dropdown with a `null` default
    pub fn select(placeholder: impl Into<String>, options: Vec<NameValue>) -> Self {
        Self {
            placeholder: placeholder.into(),
            default: Value::Null,
            kind: FieldKind::Select,
            options,
        }
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = default.into();
        self
    }

    /// Find the option whose value equals `value`.
    ///
    /// Options with a `null` value never match.
    pub fn option_for(&self, value: &Value) -> Option<&NameValue> {
        self.options
            .iter()
            .find(|option| !option.value.is_null() && &option.value == value)
    }

    /// Position of the option whose value equals `value`
    pub fn option_index(&self, value: &Value) -> Option<usize> {
        self.options
            .iter()
            .position(|option| !option.value.is_null() && &option.value == value)
    }
}

/// Mapping from field key to its descriptor
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldRegistry {
    fields: HashMap<String, FieldDescriptor>,
}

impl FieldRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, descriptor: FieldDescriptor) -> Self {
        self.insert(key, descriptor);
        self
    }

    /// Insert a descriptor, returning the one it replaced
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        descriptor: FieldDescriptor,
    ) -> Option<FieldDescriptor> {
        self.fields.insert(key.into(), descriptor)
    }

    pub fn get(&self, key: &str) -> Option<&FieldDescriptor> {
        self.fields.get(key)
    }

    /// Like [`get`](Self::get), but a missing key is a configuration error
    pub fn resolve(&self, key: &str) -> Result<&FieldDescriptor, ConfigurationError> {
        self.fields
            .get(key)
            .ok_or_else(|| ConfigurationError::UnknownField {
                key: key.to_string(),
            })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Entries sorted by key
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldDescriptor)> {
        let mut entries: Vec<_> = self
            .fields
            .iter()
            .map(|(key, descriptor)| (key.as_str(), descriptor))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries.into_iter()
    }
}
