//! Control tree synchronizer
//!
//! A [`FormSession`] borrows an immutable form definition and owns the live
//! [`ControlTree`] built from it. Controls are materialized depth-first from
//! the widget tree; a conditional branch's controls exist only while the
//! branch filter matches the governing field's current value.
//!
//! Every mutation goes through the session. Value changes are planned before
//! anything is touched, so a configuration error found while materializing a
//! branch leaves the tree exactly as it was.

use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::{debug, info};

use super::control::LiveControl;
use super::tree::ControlTree;
use super::validators;
use crate::config::FormConfig;
use crate::domain::{ConfigurationError, FieldControl, FieldDescriptor, FieldRegistry, FormError, Widget};

// ============================================================================
// Change notifications
// ============================================================================

/// Keys added to or removed from the control tree by one operation,
/// in processing order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TreeChange {
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

impl TreeChange {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

type Listener<'a> = Box<dyn FnMut(&TreeChange) + 'a>;

// ============================================================================
// Session
// ============================================================================

#[derive(Clone, Copy)]
struct IndexEntry<'a> {
    node: &'a FieldControl,
    /// Pre-order position among all field controls of the widget tree
    position: usize,
}

/// Planned mutation for one branch transition
enum Step {
    Remove(Vec<String>),
    Add(Vec<(usize, LiveControl)>),
}

/// Live form state for one fill-in session
pub struct FormSession<'a> {
    registry: &'a FieldRegistry,
    widgets: &'a [Widget],
    index: HashMap<&'a str, IndexEntry<'a>>,
    tree: ControlTree,
    submitted: bool,
    listeners: Vec<Listener<'a>>,
}

impl<'a> FormSession<'a> {
    /// Build the initial control tree for a loaded form
    pub fn new(form: &'a FormConfig) -> Result<Self, FormError> {
        Self::with_parts(&form.form_data, form.widgets())
    }

    /// Build the initial control tree from a registry and a widget tree.
    ///
    /// Only branches whose filter matches the default value of their
    /// governing field are materialized.
    pub fn with_parts(registry: &'a FieldRegistry, widgets: &'a [Widget]) -> Result<Self, FormError> {
        let mut index = HashMap::new();
        let mut next = 0;
        index_widgets(widgets, &mut index, &mut next)?;

        let mut session = Self {
            registry,
            widgets,
            index,
            tree: ControlTree::new(),
            submitted: false,
            listeners: Vec::new(),
        };

        let mut initial = Vec::new();
        session.plan_materialize(widgets, &mut initial)?;
        for (position, control) in initial {
            session.tree.insert(position, control);
        }

        info!(
            "Form session created with {} of {} controls materialized",
            session.tree.len(),
            session.index.len()
        );
        Ok(session)
    }

    // ------------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------------

    pub fn registry(&self) -> &'a FieldRegistry {
        self.registry
    }

    pub fn widgets(&self) -> &'a [Widget] {
        self.widgets
    }

    pub fn descriptor(&self, key: &str) -> Option<&'a FieldDescriptor> {
        self.registry.get(key)
    }

    pub fn tree(&self) -> &ControlTree {
        &self.tree
    }

    pub fn get_control(&self, key: &str) -> Option<&LiveControl> {
        self.tree.get(key)
    }

    /// Live controls in widget order
    pub fn controls(&self) -> impl Iterator<Item = &LiveControl> {
        self.tree.iter()
    }

    /// Live keys in widget order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.tree.keys()
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Values of all enabled controls
    pub fn value(&self) -> Map<String, Value> {
        self.tree
            .iter()
            .filter(|control| !control.is_disabled())
            .map(|control| (control.key().to_string(), control.value().clone()))
            .collect()
    }

    pub fn is_valid(&self) -> bool {
        self.tree.iter().all(LiveControl::is_valid)
    }

    /// Keys of invalid controls in widget order
    pub fn invalid_keys(&self) -> Vec<&str> {
        self.tree
            .iter()
            .filter(|control| !control.is_valid())
            .map(LiveControl::key)
            .collect()
    }

    // ------------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------------

    /// Register a callback fired whenever the set of live keys changes
    pub fn subscribe(&mut self, listener: impl FnMut(&TreeChange) + 'a) {
        self.listeners.push(Box::new(listener));
    }

    /// Set a control's value and synchronize the branches it governs.
    ///
    /// Branches are processed in declaration order. Setting the value a
    /// control already holds is a no-op.
    pub fn set_value(&mut self, key: &str, value: Value) -> Result<TreeChange, FormError> {
        let control = self
            .tree
            .get(key)
            .ok_or_else(|| FormError::ControlNotFound(key.to_string()))?;
        if control.value() == &value {
            debug!(field = %key, "Value unchanged");
            return Ok(TreeChange::default());
        }
        let previous = control.value().clone();
        let node = self
            .index
            .get(key)
            .map(|entry| entry.node)
            .ok_or_else(|| FormError::ControlNotFound(key.to_string()))?;

        let mut steps = Vec::new();
        for branch in &node.branches {
            match (branch.filter.matches(&previous), branch.filter.matches(&value)) {
                (false, true) => {
                    let mut added = Vec::new();
                    self.plan_materialize(&branch.children, &mut added)?;
                    steps.push(Step::Add(added));
                }
                (true, false) => {
                    let mut removed = Vec::new();
                    self.collect_live(&branch.children, &mut removed);
                    steps.push(Step::Remove(removed));
                }
                _ => {}
            }
        }

        if let Some(control) = self.tree.get_mut(key) {
            control.set_value(value);
        }

        let mut change = TreeChange::default();
        for step in steps {
            match step {
                Step::Remove(keys) => {
                    for removed in keys {
                        if self.tree.remove(&removed).is_some() {
                            debug!(field = %removed, governed_by = %key, "Removed control");
                            change.removed.push(removed);
                        }
                    }
                }
                Step::Add(controls) => {
                    for (position, control) in controls {
                        let added = control.key().to_string();
                        if self.tree.insert(position, control) {
                            debug!(field = %added, governed_by = %key, "Added control");
                            change.added.push(added);
                        }
                    }
                }
            }
        }

        self.notify(&change);
        Ok(change)
    }

    /// Restore a control to its descriptor default, pristine and untouched
    pub fn reset_value(&mut self, key: &str) -> Result<TreeChange, FormError> {
        let default = self.registry.resolve(key)?.default.clone();
        let change = self.set_value(key, default)?;
        if let Some(control) = self.tree.get_mut(key) {
            control.mark_pristine();
        }
        Ok(change)
    }

    /// Mark a control touched; its value is unaffected
    pub fn mark_touched(&mut self, key: &str) -> Result<(), FormError> {
        self.control_mut(key)?.mark_touched();
        Ok(())
    }

    /// Enable or disable a control without losing its value
    pub fn set_disabled(&mut self, key: &str, disabled: bool) -> Result<(), FormError> {
        self.control_mut(key)?.set_disabled(disabled);
        debug!(field = %key, disabled, "Control disabled state changed");
        Ok(())
    }

    /// Mark the form submitted and return its value, or the invalid keys
    pub fn submit(&mut self) -> Result<Map<String, Value>, Vec<String>> {
        self.submitted = true;
        let invalid: Vec<String> = self.invalid_keys().into_iter().map(str::to_string).collect();
        if invalid.is_empty() {
            let value = self.value();
            info!("Form submitted with {} values", value.len());
            Ok(value)
        } else {
            info!("Form submission rejected, {} invalid controls", invalid.len());
            Err(invalid)
        }
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    fn control_mut(&mut self, key: &str) -> Result<&mut LiveControl, FormError> {
        self.tree
            .get_mut(key)
            .ok_or_else(|| FormError::ControlNotFound(key.to_string()))
    }

    /// Every field control reachable from the session's widgets is indexed
    fn position_of(&self, key: &str) -> usize {
        self.index.get(key).map_or(usize::MAX, |entry| entry.position)
    }

    /// Build controls for `widgets`, descending into branches that match the
    /// freshly defaulted value of their governing field
    fn plan_materialize(
        &self,
        widgets: &'a [Widget],
        out: &mut Vec<(usize, LiveControl)>,
    ) -> Result<(), ConfigurationError> {
        for node in widgets.iter().filter_map(Widget::as_field_control) {
            let descriptor = self.registry.resolve(&node.field_key)?;
            let validators = validators::compile_all(&node.field_key, &node.validators)?;
            out.push((
                self.position_of(&node.field_key),
                LiveControl::new(node.field_key.clone(), descriptor.default.clone(), validators),
            ));

            for branch in &node.branches {
                if branch.filter.matches(&descriptor.default) {
                    self.plan_materialize(&branch.children, out)?;
                }
            }
        }
        Ok(())
    }

    /// Keys of live controls anywhere under `widgets`, parents first
    fn collect_live(&self, widgets: &'a [Widget], out: &mut Vec<String>) {
        for node in widgets.iter().filter_map(Widget::as_field_control) {
            if self.tree.contains(&node.field_key) {
                out.push(node.field_key.clone());
            }
            for branch in &node.branches {
                self.collect_live(&branch.children, out);
            }
        }
    }

    fn notify(&mut self, change: &TreeChange) {
        if change.is_empty() {
            return;
        }
        for listener in self.listeners.iter_mut() {
            listener(change);
        }
    }
}

fn index_widgets<'a>(
    widgets: &'a [Widget],
    index: &mut HashMap<&'a str, IndexEntry<'a>>,
    next: &mut usize,
) -> Result<(), ConfigurationError> {
    for node in widgets.iter().filter_map(Widget::as_field_control) {
        let entry = IndexEntry {
            node,
            position: *next,
        };
        *next += 1;
        if index.insert(node.field_key.as_str(), entry).is_some() {
            return Err(ConfigurationError::DuplicateField {
                key: node.field_key.clone(),
            });
        }
        for branch in &node.branches {
            index_widgets(&branch.children, index, next)?;
        }
    }
    Ok(())
}
