//! Validator compiler
//!
//! Turns [`ValidatorDescriptor`]s from configuration into executable
//! [`Validator`]s. Unknown descriptor types are configuration errors: a
//! validator is never dropped silently.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

use crate::domain::{ConfigurationError, ValidatorDescriptor};

/// Executable validation rule
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Validator {
    /// Fails for `null`, `""` and `[]`
    Required,
}

/// Why a value failed validation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationFailure {
    Required,
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationFailure::Required => write!(f, "This field is required"),
        }
    }
}

impl Validator {
    pub fn check(&self, value: &Value) -> Option<ValidationFailure> {
        match self {
            Validator::Required => is_empty(value).then_some(ValidationFailure::Required),
        }
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Compile one descriptor attached to `field`
pub fn compile(
    field: &str,
    descriptor: &ValidatorDescriptor,
) -> Result<Validator, ConfigurationError> {
    match descriptor.kind.as_str() {
        "required" => Ok(Validator::Required),
        other => Err(ConfigurationError::UnsupportedValidator {
            field: field.to_string(),
            kind: other.to_string(),
        }),
    }
}

/// Compile every descriptor of a field, failing on the first unsupported one
pub fn compile_all(
    field: &str,
    descriptors: &[ValidatorDescriptor],
) -> Result<Vec<Validator>, ConfigurationError> {
    descriptors
        .iter()
        .map(|descriptor| compile(field, descriptor))
        .collect()
}

/// Run every validator against `value`
pub fn run(validators: &[Validator], value: &Value) -> Vec<ValidationFailure> {
    validators
        .iter()
        .filter_map(|validator| validator.check(value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_compile_required() {
        let validator = compile("name", &ValidatorDescriptor::required()).unwrap();
        assert_eq!(validator, Validator::Required);
    }

    #[test]
    fn test_compile_unknown_fails() {
        let err = compile("name", &ValidatorDescriptor::new("unknown")).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::UnsupportedValidator {
                field: "name".to_string(),
                kind: "unknown".to_string(),
            }
        );
        assert_eq!(
            err.to_string(),
            "Validator of type 'unknown' on field 'name' is not supported"
        );
    }

    #[test]
    fn test_compile_all_does_not_drop_unknown() {
        let descriptors = vec![
            ValidatorDescriptor::required(),
            ValidatorDescriptor::new("min-length"),
        ];
        assert!(compile_all("name", &descriptors).is_err());
        assert_eq!(compile_all("name", &[]).unwrap(), Vec::<Validator>::new());
    }

    #[test]
    fn test_required_rule() {
        let required = Validator::Required;
        assert_eq!(required.check(&Value::Null), Some(ValidationFailure::Required));
        assert_eq!(required.check(&json!("")), Some(ValidationFailure::Required));
        assert_eq!(required.check(&json!([])), Some(ValidationFailure::Required));
        assert_eq!(required.check(&json!("x")), None);
        assert_eq!(required.check(&json!(0)), None);
        assert_eq!(required.check(&json!(false)), None);
    }

    #[test]
    fn test_run_collects_failures() {
        let failures = run(&[Validator::Required, Validator::Required], &json!(""));
        assert_eq!(failures.len(), 2);
        assert!(run(&[], &Value::Null).is_empty());
    }
}
