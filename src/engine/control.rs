//! Runtime state of one materialized field

use serde_json::Value;

use super::validators::{self, ValidationFailure, Validator};

/// Live state of a materialized field control.
///
/// Only [`FormSession`](super::session::FormSession) mutates controls;
/// everyone else reads them through shared references.
#[derive(Clone, Debug, PartialEq)]
pub struct LiveControl {
    key: String,
    value: Value,
    validators: Vec<Validator>,
    errors: Vec<ValidationFailure>,
    touched: bool,
    dirty: bool,
    disabled: bool,
}

impl LiveControl {
    pub(crate) fn new(key: impl Into<String>, value: Value, validators: Vec<Validator>) -> Self {
        let errors = validators::run(&validators, &value);
        Self {
            key: key.into(),
            value,
            validators,
            errors,
            touched: false,
            dirty: false,
            disabled: false,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn validators(&self) -> &[Validator] {
        &self.validators
    }

    /// Failures of the current value, empty when valid
    pub fn errors(&self) -> &[ValidationFailure] {
        &self.errors
    }

    /// Disabled controls always report valid
    pub fn is_valid(&self) -> bool {
        self.disabled || self.errors.is_empty()
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Replace the value, mark dirty and re-validate
    pub(crate) fn set_value(&mut self, value: Value) {
        self.value = value;
        self.dirty = true;
        self.errors = validators::run(&self.validators, &self.value);
    }

    pub(crate) fn mark_touched(&mut self) {
        self.touched = true;
    }

    pub(crate) fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub(crate) fn mark_pristine(&mut self) {
        self.dirty = false;
        self.touched = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_control_is_validated_immediately() {
        let control = LiveControl::new("name", Value::Null, vec![Validator::Required]);
        assert!(!control.is_valid());
        assert_eq!(control.errors(), &[ValidationFailure::Required]);
        assert!(!control.is_dirty());
        assert!(!control.is_touched());
    }

    #[test]
    fn test_set_value_revalidates_and_marks_dirty() {
        let mut control = LiveControl::new("name", Value::Null, vec![Validator::Required]);
        control.set_value(json!("gauge"));
        assert!(control.is_valid());
        assert!(control.is_dirty());

        control.set_value(json!(""));
        assert!(!control.is_valid());
    }

    #[test]
    fn test_disabled_control_keeps_value_and_reports_valid() {
        let mut control = LiveControl::new("name", json!(""), vec![Validator::Required]);
        control.set_disabled(true);
        assert!(control.is_valid());
        assert_eq!(control.value(), &json!(""));

        control.set_disabled(false);
        assert!(!control.is_valid());
    }
}
