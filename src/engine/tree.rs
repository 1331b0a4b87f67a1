//! Ordered collection of live controls

use std::collections::{BTreeMap, HashMap};

use super::control::LiveControl;

/// Mapping from field key to [`LiveControl`].
///
/// Each control carries its pre-order position in the full widget tree, so
/// iteration follows widget order no matter when a control was added.
#[derive(Debug, Default)]
pub struct ControlTree {
    order: BTreeMap<usize, String>,
    controls: HashMap<String, (usize, LiveControl)>,
}

impl ControlTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.controls.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&LiveControl> {
        self.controls.get(key).map(|(_, control)| control)
    }

    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut LiveControl> {
        self.controls.get_mut(key).map(|(_, control)| control)
    }

    /// Insert a control at `position`. An existing control with the same key
    /// is kept and `false` is returned.
    pub(crate) fn insert(&mut self, position: usize, control: LiveControl) -> bool {
        if self.controls.contains_key(control.key()) {
            return false;
        }
        let key = control.key().to_string();
        self.order.insert(position, key.clone());
        self.controls.insert(key, (position, control));
        true
    }

    pub(crate) fn remove(&mut self, key: &str) -> Option<LiveControl> {
        let (position, control) = self.controls.remove(key)?;
        self.order.remove(&position);
        Some(control)
    }

    /// Keys in widget order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.values().map(String::as_str)
    }

    /// Controls in widget order
    pub fn iter(&self) -> impl Iterator<Item = &LiveControl> {
        self.order
            .values()
            .filter_map(move |key| self.controls.get(key).map(|(_, control)| control))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn control(key: &str) -> LiveControl {
        LiveControl::new(key, Value::Null, Vec::new())
    }

    #[test]
    fn test_iteration_follows_position() {
        let mut tree = ControlTree::new();
        assert!(tree.insert(0, control("name")));
        assert!(tree.insert(4, control("suffix")));
        assert!(tree.insert(1, control("labelType")));

        let keys: Vec<&str> = tree.keys().collect();
        assert_eq!(keys, vec!["name", "labelType", "suffix"]);
        let keys: Vec<&str> = tree.iter().map(LiveControl::key).collect();
        assert_eq!(keys, vec!["name", "labelType", "suffix"]);
    }

    #[test]
    fn test_insert_does_not_replace() {
        let mut tree = ControlTree::new();
        assert!(tree.insert(0, control("name")));
        assert!(!tree.insert(3, control("name")));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.keys().collect::<Vec<_>>(), vec!["name"]);
    }

    #[test]
    fn test_remove() {
        let mut tree = ControlTree::new();
        tree.insert(0, control("name"));
        tree.insert(1, control("labelType"));

        assert_eq!(tree.remove("name").unwrap().key(), "name");
        assert!(tree.remove("name").is_none());
        assert!(!tree.contains("name"));
        assert_eq!(tree.keys().collect::<Vec<_>>(), vec!["labelType"]);
        assert!(!tree.is_empty());
    }
}
