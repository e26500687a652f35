// SPDX-License-Identifier: MIT OR Apache-2.0

//! The name-keyed tree of settings instances.

use crate::service::settings::Settings;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// A tree of [`Settings`] nodes keyed by dot-delimited names.
///
/// `settings("com.app.module")` lazily creates the node and every missing
/// ancestor level (`com`, `com.app`), each linked to its parent and
/// ultimately to the root. The hierarchy owns the nodes; the parent
/// references inside them are weak, so ancestors stay alive exactly as long
/// as the hierarchy does.
pub struct SettingsHierarchy {
    root: Arc<Settings>,
    nodes: Mutex<HashMap<String, Arc<Settings>>>,
}

impl SettingsHierarchy {
    /// Creates a hierarchy with an empty root instance.
    pub fn new() -> Self {
        Self::with_root(Arc::new(Settings::new("root")))
    }

    /// Creates a hierarchy around the given root instance.
    pub fn with_root(root: Arc<Settings>) -> Self {
        Self {
            root,
            nodes: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the root instance.
    pub fn root(&self) -> Arc<Settings> {
        self.root.clone()
    }

    /// Returns the node with the given name, creating it and any missing
    /// ancestors on first access.
    ///
    /// The empty name addresses the root.
    pub fn settings(&self, name: &str) -> Arc<Settings> {
        if name.is_empty() {
            return self.root();
        }
        let mut nodes = match self.nodes.lock() {
            Ok(nodes) => nodes,
            Err(poisoned) => poisoned.into_inner(),
        };
        let mut parent = self.root.clone();
        let mut path = String::new();
        for level in name.split('.') {
            if !path.is_empty() {
                path.push('.');
            }
            path.push_str(level);
            let node = nodes
                .entry(path.clone())
                .or_insert_with(|| {
                    let node = Arc::new(Settings::new(path.clone()));
                    node.set_parent(&parent);
                    node
                })
                .clone();
            parent = node;
        }
        parent
    }

    /// Returns the node with the given name only if it already exists.
    pub fn exists(&self, name: &str) -> Option<Arc<Settings>> {
        if name.is_empty() {
            return Some(self.root());
        }
        self.nodes.lock().ok()?.get(name).cloned()
    }
}

impl Default for SettingsHierarchy {
    fn default() -> Self {
        Self::new()
    }
}
