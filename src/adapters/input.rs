//! Text input adapter

use serde_json::Value;

use super::{base_view, edit_blocked, touch_enabled, FieldAdapter, FieldView};
use crate::domain::{FieldDescriptor, FormError};
use crate::engine::{FormSession, TreeChange};

/// Binds a free-text control
pub struct InputAdapter<'a> {
    key: &'a str,
    descriptor: &'a FieldDescriptor,
}

impl<'a> InputAdapter<'a> {
    pub fn new(key: &'a str, descriptor: &'a FieldDescriptor) -> Self {
        Self { key, descriptor }
    }

    /// Push the text currently in the input
    pub fn on_input(&self, session: &mut FormSession<'_>, text: &str) -> Result<TreeChange, FormError> {
        if edit_blocked(session, self.key)? {
            return Ok(TreeChange::default());
        }
        session.set_value(self.key, Value::String(text.to_string()))
    }

    pub fn on_blur(&self, session: &mut FormSession<'_>) -> Result<(), FormError> {
        touch_enabled(session, self.key)
    }
}

fn display(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

impl FieldAdapter for InputAdapter<'_> {
    fn key(&self) -> &str {
        self.key
    }

    fn view(&self, session: &FormSession<'_>) -> Option<FieldView> {
        let control = session.get_control(self.key)?;
        Some(base_view(
            control,
            self.descriptor,
            session.is_submitted(),
            display(control.value()),
        ))
    }

    fn edit(&self, session: &mut FormSession<'_>, raw: &str) -> Result<TreeChange, FormError> {
        self.on_input(session, raw)
    }

    fn leave(&self, session: &mut FormSession<'_>) -> Result<(), FormError> {
        self.on_blur(session)
    }
}
