//! Field presentation adapters
//!
//! An adapter binds to one live control by key. It never owns control state:
//! it reads the control through the session and pushes edits back through
//! [`FormSession::set_value`] and [`FormSession::mark_touched`].

pub mod input;
pub mod render;
pub mod select;

use serde_json::Value;

use crate::domain::{FieldDescriptor, FieldKind, FormError, NameValue};
use crate::engine::{FormSession, LiveControl, TreeChange, ValidationFailure};

pub use input::InputAdapter;
pub use render::{render, render_json, render_text, Segment};
pub use select::SelectAdapter;

/// What a presentation layer needs to draw one field
#[derive(Clone, Debug, PartialEq)]
pub struct FieldView {
    pub key: String,
    pub kind: FieldKind,
    pub placeholder: String,
    pub value: Value,
    /// Text to show in the control, `None` when empty or unselected
    pub display: Option<String>,
    pub errors: Vec<ValidationFailure>,
    /// Invalid and already dirty, touched or submitted
    pub show_invalid: bool,
    pub disabled: bool,
    pub options: Vec<NameValue>,
    /// Index into `options` of the selected option
    pub selected: Option<usize>,
}

/// Binding between one live control and a presentation
pub trait FieldAdapter {
    /// Key of the bound control
    fn key(&self) -> &str;

    /// Current view of the control, `None` while it is not materialized
    fn view(&self, session: &FormSession<'_>) -> Option<FieldView>;

    /// Push a raw user edit; ignored while the control is disabled
    fn edit(&self, session: &mut FormSession<'_>, raw: &str) -> Result<TreeChange, FormError>;

    /// The user left the control (blur for inputs, close for dropdowns)
    fn leave(&self, session: &mut FormSession<'_>) -> Result<(), FormError>;
}

/// Pick the adapter matching a field's kind
pub fn adapter_for<'a>(key: &'a str, descriptor: &'a FieldDescriptor) -> Box<dyn FieldAdapter + 'a> {
    match descriptor.kind {
        FieldKind::Input => Box::new(InputAdapter::new(key, descriptor)),
        FieldKind::Select => Box::new(SelectAdapter::new(key, descriptor)),
    }
}

/// Apply a raw edit to the field `key` through its adapter
pub fn edit_field(session: &mut FormSession<'_>, key: &str, raw: &str) -> Result<TreeChange, FormError> {
    let descriptor = session
        .descriptor(key)
        .ok_or_else(|| FormError::ControlNotFound(key.to_string()))?;
    adapter_for(key, descriptor).edit(session, raw)
}

/// Mark the field `key` as left by the user
pub fn leave_field(session: &mut FormSession<'_>, key: &str) -> Result<(), FormError> {
    let descriptor = session
        .descriptor(key)
        .ok_or_else(|| FormError::ControlNotFound(key.to_string()))?;
    adapter_for(key, descriptor).leave(session)
}

fn show_invalid(control: &LiveControl, submitted: bool) -> bool {
    !control.is_valid() && (control.is_dirty() || control.is_touched() || submitted)
}

/// Shared part of every view
fn base_view(
    control: &LiveControl,
    descriptor: &FieldDescriptor,
    submitted: bool,
    display: Option<String>,
) -> FieldView {
    FieldView {
        key: control.key().to_string(),
        kind: descriptor.kind,
        placeholder: descriptor.placeholder.clone(),
        value: control.value().clone(),
        display,
        errors: control.errors().to_vec(),
        show_invalid: show_invalid(control, submitted),
        disabled: control.is_disabled(),
        options: Vec::new(),
        selected: None,
    }
}

/// Touch a control unless it is disabled
fn touch_enabled(session: &mut FormSession<'_>, key: &str) -> Result<(), FormError> {
    let control = session
        .get_control(key)
        .ok_or_else(|| FormError::ControlNotFound(key.to_string()))?;
    if control.is_disabled() {
        return Ok(());
    }
    session.mark_touched(key)
}

/// `true` when edits must be dropped
fn edit_blocked(session: &FormSession<'_>, key: &str) -> Result<bool, FormError> {
    session
        .get_control(key)
        .map(LiveControl::is_disabled)
        .ok_or_else(|| FormError::ControlNotFound(key.to_string()))
}
