//! Dropdown adapter

use serde_json::Value;

use super::{base_view, edit_blocked, touch_enabled, FieldAdapter, FieldView};
use crate::domain::{FieldDescriptor, FormError, NameValue};
use crate::engine::{FormSession, TreeChange};

/// Binds a choice control to its option list
pub struct SelectAdapter<'a> {
    key: &'a str,
    descriptor: &'a FieldDescriptor,
}

impl<'a> SelectAdapter<'a> {
    pub fn new(key: &'a str, descriptor: &'a FieldDescriptor) -> Self {
        Self { key, descriptor }
    }

    pub fn options(&self) -> &'a [NameValue] {
        &self.descriptor.options
    }

    /// Option whose value equals `value`; `None` displays as unselected
    pub fn selected_option(&self, value: &Value) -> Option<&'a NameValue> {
        self.descriptor.option_for(value)
    }

    /// The user picked an option value
    pub fn on_select(&self, session: &mut FormSession<'_>, value: Value) -> Result<TreeChange, FormError> {
        if edit_blocked(session, self.key)? {
            return Ok(TreeChange::default());
        }
        session.set_value(self.key, value)
    }

    /// Closing the dropdown marks the control touched
    pub fn on_open_changed(&self, session: &mut FormSession<'_>, opened: bool) -> Result<(), FormError> {
        if opened {
            return Ok(());
        }
        touch_enabled(session, self.key)
    }

    /// Map raw text to an option value, matching the option value first and
    /// the option name second. Unmatched text is kept as a string.
    pub fn resolve_raw(&self, raw: &str) -> Value {
        let options = self.options();
        options
            .iter()
            .find(|option| option.value.as_str() == Some(raw))
            .or_else(|| options.iter().find(|option| option.name.eq_ignore_ascii_case(raw)))
            .map(|option| option.value.clone())
            .unwrap_or_else(|| Value::String(raw.to_string()))
    }
}

impl FieldAdapter for SelectAdapter<'_> {
    fn key(&self) -> &str {
        self.key
    }

    fn view(&self, session: &FormSession<'_>) -> Option<FieldView> {
        let control = session.get_control(self.key)?;
        let selected = self.descriptor.option_index(control.value());
        let display = selected.map(|idx| self.options()[idx].name.clone());

        let mut view = base_view(control, self.descriptor, session.is_submitted(), display);
        view.options = self.options().to_vec();
        view.selected = selected;
        Some(view)
    }

    fn edit(&self, session: &mut FormSession<'_>, raw: &str) -> Result<TreeChange, FormError> {
        let value = self.resolve_raw(raw);
        self.on_select(session, value)
    }

    fn leave(&self, session: &mut FormSession<'_>) -> Result<(), FormError> {
        self.on_open_changed(session, false)
    }
}
