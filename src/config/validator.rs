use std::collections::HashMap;
use thiserror::Error;

use crate::config::FormConfig;
use crate::domain::{FieldKind, FieldRegistry, Filter, Widget};
use crate::engine::validators;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Cross-reference error: {0}")]
    CrossReference(String),

    #[error("Duplicate entry: {0}")]
    Duplicate(String),
}

/// Load-time checks of a form definition.
///
/// Catches every problem a session would only hit when a branch is first
/// materialized, and reports all of them at once.
pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(form: &FormConfig) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = Self::validate_fields(&form.form_data) {
            errors.extend(e);
        }

        if let Err(e) = Self::validate_widgets(form) {
            errors.extend(e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_fields(registry: &FieldRegistry) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        for (key, descriptor) in registry.iter() {
            if descriptor.placeholder.is_empty() {
                errors.push(ValidationError::MissingField(format!(
                    "formData.{}.placeholder",
                    key
                )));
            }

            match descriptor.kind {
                FieldKind::Select => {
                    if descriptor.options.is_empty() {
                        errors.push(ValidationError::MissingField(format!(
                            "formData.{}.options",
                            key
                        )));
                    }

                    let mut seen_values = HashMap::new();
                    for (idx, option) in descriptor.options.iter().enumerate() {
                        if let Some(prev_idx) = seen_values.insert(option.value.to_string(), idx) {
                            errors.push(ValidationError::Duplicate(format!(
                                "Option value {} of field '{}' appears at indices {} and {}",
                                option.value, key, prev_idx, idx
                            )));
                        }
                    }

                    if !descriptor.default.is_null() && descriptor.option_for(&descriptor.default).is_none() {
                        errors.push(ValidationError::InvalidValue {
                            field: format!("formData.{}.default", key),
                            reason: format!("{} is not one of the options", descriptor.default),
                        });
                    }
                }
                FieldKind::Input => {
                    if !descriptor.options.is_empty() {
                        errors.push(ValidationError::InvalidValue {
                            field: format!("formData.{}.options", key),
                            reason: "Input fields do not take options".to_string(),
                        });
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_widgets(form: &FormConfig) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if form.widgets().is_empty() {
            errors.push(ValidationError::MissingField(
                "formDataFillInTheBlanks.data".to_string(),
            ));
        }

        let mut bound = HashMap::new();
        Self::validate_widget_list(
            form.widgets(),
            "formDataFillInTheBlanks.data",
            &form.form_data,
            &mut bound,
            &mut errors,
        );

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_widget_list<'a>(
        widgets: &'a [Widget],
        path: &str,
        registry: &FieldRegistry,
        bound: &mut HashMap<&'a str, String>,
        errors: &mut Vec<ValidationError>,
    ) {
        for (idx, widget) in widgets.iter().enumerate() {
            let Widget::FieldControl(control) = widget else {
                continue;
            };
            let widget_path = format!("{}[{}]", path, idx);
            let key = control.field_key.as_str();

            if key.is_empty() {
                errors.push(ValidationError::MissingField(format!(
                    "{}.formDataPointer",
                    widget_path
                )));
            } else if !registry.contains(key) {
                errors.push(ValidationError::CrossReference(format!(
                    "{} points at unknown field '{}'",
                    widget_path, key
                )));
            }

            if let Some(previous) = bound.insert(key, widget_path.clone()) {
                errors.push(ValidationError::Duplicate(format!(
                    "Field '{}' is bound at {} and {}",
                    key, previous, widget_path
                )));
            }

            for (v_idx, descriptor) in control.validators.iter().enumerate() {
                if let Err(e) = validators::compile(key, descriptor) {
                    errors.push(ValidationError::InvalidValue {
                        field: format!("{}.validators[{}]", widget_path, v_idx),
                        reason: e.to_string(),
                    });
                }
            }

            for (b_idx, branch) in control.branches.iter().enumerate() {
                let branch_path = format!("{}.nodes[{}]", widget_path, b_idx);
                match &branch.filter {
                    Filter::In(values) if values.is_empty() => {
                        errors.push(ValidationError::InvalidValue {
                            field: format!("{}.filter", branch_path),
                            reason: "'$in' must list at least one value".to_string(),
                        });
                    }
                    Filter::In(_) => {}
                }

                Self::validate_widget_list(
                    &branch.children,
                    &format!("{}.children", branch_path),
                    registry,
                    bound,
                    errors,
                );
            }
        }
    }
}
