//! Declarative widget tree
//!
//! A form is an ordered list of [`Widget`]s. Text widgets are display-only;
//! field controls bind a registry key and may own conditional [`Branch`]es
//! whose children only exist while the branch filter matches the field value.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Widgets
// ============================================================================

/// A node of the widget tree
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Widget {
    /// Literal text between blanks
    Text { data: String },
    /// A blank bound to a field of the registry
    FieldControl(FieldControl),
}

impl Widget {
    pub fn text(data: impl Into<String>) -> Self {
        Widget::Text { data: data.into() }
    }

    /// The field control, if this widget is one
    pub fn as_field_control(&self) -> Option<&FieldControl> {
        match self {
            Widget::FieldControl(control) => Some(control),
            Widget::Text { .. } => None,
        }
    }
}

impl From<FieldControl> for Widget {
    fn from(control: FieldControl) -> Self {
        Widget::FieldControl(control)
    }
}

/// A blank bound to a registry field
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldControl {
    /// Key into the field registry
    #[serde(rename = "formDataPointer")]
    pub field_key: String,
    #[serde(default)]
    pub validators: Vec<ValidatorDescriptor>,
    /// Conditional sub-trees governed by this field's value
    #[serde(rename = "nodes", default, skip_serializing_if = "Vec::is_empty")]
    pub branches: Vec<Branch>,
}

impl FieldControl {
    pub fn new(field_key: impl Into<String>) -> Self {
        Self {
            field_key: field_key.into(),
            validators: Vec::new(),
            branches: Vec::new(),
        }
    }

    /// Attach a `required` validator
    pub fn required(self) -> Self {
        self.validator(ValidatorDescriptor::required())
    }

    pub fn validator(mut self, descriptor: ValidatorDescriptor) -> Self {
        self.validators.push(descriptor);
        self
    }

    /// Add a branch shown while the value is one of `values`
    pub fn branch<I, V>(mut self, values: I, children: Vec<Widget>) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.branches.push(Branch {
            filter: Filter::any_of(values),
            children,
        });
        self
    }
}

// ============================================================================
// Branches and filters
// ============================================================================

/// Conditionally materialized sub-tree
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub filter: Filter,
    #[serde(default)]
    pub children: Vec<Widget>,
}

/// Predicate over the governing field's value
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Filter {
    /// Value is a member of the set
    #[serde(rename = "$in")]
    In(Vec<Value>),
}

impl Filter {
    pub fn any_of<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Filter::In(values.into_iter().map(Into::into).collect())
    }

    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Filter::In(set) => set.contains(value),
        }
    }
}

// ============================================================================
// Validator descriptors
// ============================================================================

/// Declarative validator reference, compiled by [`crate::engine::validators`].
///
/// Any `type` string deserializes; unknown ones are rejected at compile time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorDescriptor {
    #[serde(rename = "type")]
    pub kind: String,
}

impl ValidatorDescriptor {
    pub fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into() }
    }

    pub fn required() -> Self {
        Self::new("required")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_widget_tree() {
        let widgets: Vec<Widget> = serde_json::from_value(json!([
            { "type": "text", "data": "Please enter the widget name:" },
            {
                "type": "fieldControl",
                "formDataPointer": "labelType",
                "validators": [{ "type": "required" }],
                "nodes": [
                    {
                        "filter": { "$in": ["currency"] },
                        "children": [
                            { "type": "text", "data": "Pick currency:" },
                            { "type": "fieldControl", "formDataPointer": "labelCurrency", "validators": [] }
                        ]
                    }
                ]
            }
        ]))
        .unwrap();

        assert_eq!(widgets.len(), 2);
        assert_eq!(widgets[0], Widget::text("Please enter the widget name:"));

        let control = widgets[1].as_field_control().unwrap();
        assert_eq!(control.field_key, "labelType");
        assert_eq!(control.validators, vec![ValidatorDescriptor::required()]);
        assert_eq!(control.branches.len(), 1);
        assert_eq!(control.branches[0].filter, Filter::any_of(["currency"]));
        assert_eq!(
            control.branches[0].children[1].as_field_control().unwrap().field_key,
            "labelCurrency"
        );
    }

    #[test]
    fn test_unknown_validator_type_still_deserializes() {
        let control: FieldControl = serde_json::from_value(json!({
            "formDataPointer": "name",
            "validators": [{ "type": "email" }]
        }))
        .unwrap();
        assert_eq!(control.validators[0].kind, "email");
        assert!(control.branches.is_empty());
    }

    #[test]
    fn test_filter_membership() {
        let filter = Filter::any_of(["currency", "custom-label"]);
        assert!(filter.matches(&json!("currency")));
        assert!(filter.matches(&json!("custom-label")));
        assert!(!filter.matches(&json!("no-label")));
        assert!(!filter.matches(&Value::Null));

        let numeric = Filter::any_of([1, 2]);
        assert!(numeric.matches(&json!(2)));
        assert!(!numeric.matches(&json!("2")));
    }

    #[test]
    fn test_builder_serializes_to_config_shape() {
        let widget: Widget = FieldControl::new("labelType")
            .required()
            .branch(["currency"], vec![Widget::text("Pick currency:")])
            .into();

        let value = serde_json::to_value(&widget).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "fieldControl",
                "formDataPointer": "labelType",
                "validators": [{ "type": "required" }],
                "nodes": [{
                    "filter": { "$in": ["currency"] },
                    "children": [{ "type": "text", "data": "Pick currency:" }]
                }]
            })
        );
    }
}
