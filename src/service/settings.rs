// SPDX-License-Identifier: MIT OR Apache-2.0

//! The settings instance: an ordered connector list with key aliasing and
//! hierarchical fallback.

use crate::domain::{ObjectValue, Result, SetStatus, SettingsError};
use crate::ports::Connector;
use crate::service::position::ConnectorPosition;
use arc_swap::ArcSwap;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock, Weak};
use tracing::debug;

/// A node in the settings tree, holding an ordered connector list and a
/// key-alias table.
///
/// Lookups scan the local connectors in insertion order and return the
/// first non-absent result; local connectors take precedence over inherited
/// ones. When the local list is exhausted, the scan continues into the
/// parent's list, transitively up to the root. Before each level's scan the
/// key is remapped through that level's alias table, if it holds an entry
/// for the exact key.
///
/// A node never owns its parent: the parent reference is weak, and the
/// [`SettingsHierarchy`](crate::service::SettingsHierarchy) that created
/// both keeps ancestors alive.
pub struct Settings {
    name: String,
    members: Mutex<Vec<Arc<dyn Connector>>>,
    snapshot: ArcSwap<Vec<Arc<dyn Connector>>>,
    by_name: Mutex<HashMap<String, Arc<dyn Connector>>>,
    mapping: RwLock<HashMap<String, String>>,
    parent: RwLock<Option<Weak<Settings>>>,
    nop: bool,
}

impl Settings {
    /// Creates an empty settings instance with the given node name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Mutex::new(Vec::new()),
            snapshot: ArcSwap::from_pointee(Vec::new()),
            by_name: Mutex::new(HashMap::new()),
            mapping: RwLock::new(HashMap::new()),
            parent: RwLock::new(None),
            nop: false,
        }
    }

    /// Creates the terminal no-op instance.
    ///
    /// A NOP instance is a permanently empty settings instance: every read
    /// is absent and every write is not possible. It is exempt from the
    /// repository's fallback-configuration trigger — it *is* the terminal
    /// fallback.
    pub fn nop() -> Self {
        Self {
            nop: true,
            ..Self::new("nop")
        }
    }

    /// Returns the node name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` for the terminal no-op instance.
    pub fn is_nop(&self) -> bool {
        self.nop
    }

    /// Returns the parent node, if this instance is part of a hierarchy.
    pub fn parent(&self) -> Option<Arc<Settings>> {
        self.parent.read().ok()?.as_ref()?.upgrade()
    }

    pub(crate) fn set_parent(&self, parent: &Arc<Settings>) {
        if let Ok(mut slot) = self.parent.write() {
            *slot = Some(Arc::downgrade(parent));
        }
    }

    /// Appends a connector to the end of the list.
    pub fn add_connector(&self, connector: Arc<dyn Connector>) -> Result<()> {
        self.add_connector_at(connector, &ConnectorPosition::AtLast)
    }

    /// Inserts a connector at a symbolic position.
    ///
    /// Fails with [`SettingsError::NoValidPosition`] when the strategy does
    /// not resolve to a definite index and with
    /// [`SettingsError::DuplicateConnector`] when the name is taken; in the
    /// first case callers commonly retry with a plain append.
    pub fn add_connector_at(
        &self,
        connector: Arc<dyn Connector>,
        position: &ConnectorPosition,
    ) -> Result<()> {
        let mut members = match self.members.lock() {
            Ok(members) => members,
            Err(poisoned) => poisoned.into_inner(),
        };
        let index = position
            .resolve(&members)
            .ok_or(SettingsError::NoValidPosition)?;
        let mut by_name = match self.by_name.lock() {
            Ok(by_name) => by_name,
            Err(poisoned) => poisoned.into_inner(),
        };
        if by_name.contains_key(connector.name()) {
            return Err(SettingsError::DuplicateConnector {
                name: connector.name().to_string(),
            });
        }
        by_name.insert(connector.name().to_string(), connector.clone());
        members.insert(index, connector);
        self.snapshot.store(Arc::new(members.clone()));
        Ok(())
    }

    /// Removes every connector, forcing reconfiguration on the next
    /// repository access.
    pub fn remove_all_connectors(&self) {
        if let Ok(mut members) = self.members.lock() {
            members.clear();
            self.snapshot.store(Arc::new(Vec::new()));
        }
        if let Ok(mut by_name) = self.by_name.lock() {
            by_name.clear();
        }
    }

    /// Returns a snapshot of the connector list, in priority order.
    pub fn connectors(&self) -> Vec<Arc<dyn Connector>> {
        self.snapshot.load().as_ref().clone()
    }

    /// Returns the connector registered under the given name.
    pub fn connector(&self, name: &str) -> Option<Arc<dyn Connector>> {
        self.by_name.lock().ok()?.get(name).cloned()
    }

    /// Returns the number of local connectors.
    pub fn connector_count(&self) -> usize {
        self.snapshot.load().len()
    }

    /// Returns a copy of the local key-alias table.
    pub fn mapping(&self) -> HashMap<String, String> {
        self.mapping
            .read()
            .map(|mapping| mapping.clone())
            .unwrap_or_default()
    }

    /// Replaces the local key-alias table.
    pub fn set_mapping(&self, mapping: HashMap<String, String>) {
        if let Ok(mut slot) = self.mapping.write() {
            *slot = mapping;
        }
    }

    fn mapped_key(&self, key: &str) -> String {
        if let Ok(mapping) = self.mapping.read() {
            if let Some(mapped) = mapping.get(key) {
                return mapped.clone();
            }
        }
        key.to_string()
    }

    /// Returns the first string value any connector in this instance or its
    /// ancestors holds for the key.
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.find(key, "String", |connector, key| connector.get_string(key))
    }

    /// Returns the first byte content any connector in this instance or its
    /// ancestors holds for the key.
    pub fn get_content(&self, key: &str) -> Option<Vec<u8>> {
        self.find(key, "Content", |connector, key| connector.get_content(key))
    }

    /// Returns the first object any connector in this instance or its
    /// ancestors holds for the key.
    pub fn get_object(&self, key: &str) -> Option<ObjectValue> {
        self.find(key, "Object", |connector, key| connector.get_object(key))
    }

    /// Writes the string value through the first connector willing to
    /// accept it.
    pub fn set_string(&self, key: &str, value: &str) -> Result<SetStatus> {
        self.write(key, |connector, key| connector.set_string(key, value))
    }

    /// Writes the byte content through the first connector willing to
    /// accept it.
    pub fn set_content(&self, key: &str, value: &[u8]) -> Result<SetStatus> {
        self.write(key, |connector, key| connector.set_content(key, value))
    }

    /// Writes the object through the first connector willing to accept it.
    pub fn set_object(&self, key: &str, value: ObjectValue) -> Result<SetStatus> {
        self.write(key, |connector, key| {
            connector.set_object(key, value.clone())
        })
    }

    fn find<T>(
        &self,
        key: &str,
        what: &str,
        lookup: impl Fn(&dyn Connector, &str) -> Option<T>,
    ) -> Option<T> {
        let mapped = self.mapped_key(key);
        for connector in self.snapshot.load().iter() {
            if let Some(value) = lookup(connector.as_ref(), &mapped) {
                debug!(
                    "found {} for key '{}' in connector '{}'",
                    what,
                    key,
                    connector.name()
                );
                return Some(value);
            }
        }
        let mut current = self.parent();
        while let Some(node) = current {
            let mapped = node.mapped_key(key);
            for connector in node.snapshot.load().iter() {
                if let Some(value) = lookup(connector.as_ref(), &mapped) {
                    debug!(
                        "found {} for key '{}' in inherited connector '{}'",
                        what,
                        key,
                        connector.name()
                    );
                    return Some(value);
                }
            }
            current = node.parent();
        }
        None
    }

    fn write(
        &self,
        key: &str,
        operation: impl Fn(&dyn Connector, &str) -> Result<SetStatus>,
    ) -> Result<SetStatus> {
        let mapped = self.mapped_key(key);
        for connector in self.snapshot.load().iter() {
            if operation(connector.as_ref(), &mapped)? == SetStatus::Success {
                return Ok(SetStatus::Success);
            }
        }
        let mut current = self.parent();
        while let Some(node) = current {
            let mapped = node.mapped_key(key);
            for connector in node.snapshot.load().iter() {
                if operation(connector.as_ref(), &mapped)? == SetStatus::Success {
                    return Ok(SetStatus::Success);
                }
            }
            current = node.parent();
        }
        Ok(SetStatus::NotPossible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap as StdHashMap;
    use std::sync::RwLock as StdRwLock;

    struct MapConnector {
        name: String,
        values: StdRwLock<StdHashMap<String, String>>,
        writable: bool,
    }

    impl MapConnector {
        fn new(name: &str) -> Self {
            Self {
                name: name.to_string(),
                values: StdRwLock::new(StdHashMap::new()),
                writable: false,
            }
        }

        fn writable(mut self) -> Self {
            self.writable = true;
            self
        }

        fn with_value(self, key: &str, value: &str) -> Self {
            if let Ok(mut values) = self.values.write() {
                values.insert(key.to_string(), value.to_string());
            }
            self
        }
    }

    impl Connector for MapConnector {
        fn name(&self) -> &str {
            &self.name
        }

        fn kind(&self) -> &'static str {
            "map"
        }

        fn get_string(&self, key: &str) -> Option<String> {
            self.values.read().ok()?.get(key).cloned()
        }

        fn get_content(&self, key: &str) -> Option<Vec<u8>> {
            self.get_string(key).map(String::into_bytes)
        }

        fn get_object(&self, key: &str) -> Option<ObjectValue> {
            self.get_string(key).map(crate::domain::object)
        }

        fn set_string(&self, key: &str, value: &str) -> Result<SetStatus> {
            if !self.writable {
                return Ok(SetStatus::NotPossible);
            }
            if let Ok(mut values) = self.values.write() {
                values.insert(key.to_string(), value.to_string());
            }
            Ok(SetStatus::Success)
        }
    }

    #[test]
    fn test_first_connector_wins() {
        let settings = Settings::new("root");
        settings
            .add_connector(Arc::new(MapConnector::new("a").with_value("k", "from-a")))
            .unwrap();
        settings
            .add_connector(Arc::new(MapConnector::new("b").with_value("k", "from-b")))
            .unwrap();

        assert_eq!(settings.get_string("k"), Some("from-a".to_string()));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let settings = Settings::new("root");
        settings
            .add_connector(Arc::new(MapConnector::new("a")))
            .unwrap();
        let result = settings.add_connector(Arc::new(MapConnector::new("a")));
        assert!(matches!(
            result,
            Err(SettingsError::DuplicateConnector { .. })
        ));
    }

    #[test]
    fn test_positional_insertion() {
        let settings = Settings::new("root");
        settings
            .add_connector(Arc::new(MapConnector::new("a").with_value("k", "from-a")))
            .unwrap();
        settings
            .add_connector_at(
                Arc::new(MapConnector::new("b").with_value("k", "from-b")),
                &ConnectorPosition::AtFirst,
            )
            .unwrap();

        assert_eq!(settings.get_string("k"), Some("from-b".to_string()));
    }

    #[test]
    fn test_unresolvable_position_is_an_error() {
        let settings = Settings::new("root");
        let result = settings.add_connector_at(
            Arc::new(MapConnector::new("a")),
            &ConnectorPosition::After("missing".to_string()),
        );
        assert!(matches!(result, Err(SettingsError::NoValidPosition)));
        // The caller falls back to a plain append.
        settings
            .add_connector(Arc::new(MapConnector::new("a")))
            .unwrap();
        assert_eq!(settings.connector_count(), 1);
    }

    #[test]
    fn test_mapping_applied_before_scan() {
        let settings = Settings::new("root");
        settings
            .add_connector(Arc::new(
                MapConnector::new("a").with_value("global/datasource", "real"),
            ))
            .unwrap();
        let mut mapping = HashMap::new();
        mapping.insert(
            "com/app/datasource".to_string(),
            "global/datasource".to_string(),
        );
        settings.set_mapping(mapping);

        assert_eq!(
            settings.get_string("com/app/datasource"),
            Some("real".to_string())
        );
        // Unmapped keys pass through unchanged.
        assert_eq!(
            settings.get_string("global/datasource"),
            Some("real".to_string())
        );
    }

    #[test]
    fn test_set_first_willing_connector_wins() {
        let settings = Settings::new("root");
        let readonly = Arc::new(MapConnector::new("ro"));
        let writable = Arc::new(MapConnector::new("rw").writable());
        settings.add_connector(readonly).unwrap();
        settings.add_connector(writable.clone()).unwrap();

        let status = settings.set_string("k", "v").unwrap();
        assert_eq!(status, SetStatus::Success);
        assert_eq!(writable.get_string("k"), Some("v".to_string()));
    }

    #[test]
    fn test_set_with_no_writable_connector() {
        let settings = Settings::new("root");
        settings
            .add_connector(Arc::new(MapConnector::new("ro")))
            .unwrap();
        let status = settings.set_string("k", "v").unwrap();
        assert_eq!(status, SetStatus::NotPossible);
    }

    #[test]
    fn test_remove_all_connectors() {
        let settings = Settings::new("root");
        settings
            .add_connector(Arc::new(MapConnector::new("a")))
            .unwrap();
        settings.remove_all_connectors();
        assert_eq!(settings.connector_count(), 0);
        assert!(settings.connector("a").is_none());
    }

    #[test]
    fn test_nop_instance() {
        let settings = Settings::nop();
        assert!(settings.is_nop());
        assert_eq!(settings.get_string("k"), None);
        assert_eq!(settings.set_string("k", "v").unwrap(), SetStatus::NotPossible);
    }

    #[test]
    fn test_hierarchical_precedence() {
        let root = Arc::new(Settings::new("root"));
        root.add_connector(Arc::new(
            MapConnector::new("root-conn")
                .with_value("shared", "from-root")
                .with_value("root-only", "root-value"),
        ))
        .unwrap();

        let child = Arc::new(Settings::new("child"));
        child.set_parent(&root);
        child
            .add_connector(Arc::new(
                MapConnector::new("child-conn").with_value("shared", "from-child"),
            ))
            .unwrap();

        // Local connectors take precedence over inherited ones.
        assert_eq!(child.get_string("shared"), Some("from-child".to_string()));
        // Keys only the parent holds are inherited.
        assert_eq!(child.get_string("root-only"), Some("root-value".to_string()));
        // The parent is not affected by child connectors.
        assert_eq!(root.get_string("shared"), Some("from-root".to_string()));
    }

    #[test]
    fn test_per_level_mapping() {
        let root = Arc::new(Settings::new("root"));
        root.add_connector(Arc::new(
            MapConnector::new("root-conn").with_value("global/ds", "mapped-value"),
        ))
        .unwrap();
        let mut mapping = HashMap::new();
        mapping.insert("com/app/ds".to_string(), "global/ds".to_string());
        root.set_mapping(mapping);

        let child = Arc::new(Settings::new("child"));
        child.set_parent(&root);

        // The child has no mapping; the root level remaps during its own
        // scan.
        assert_eq!(
            child.get_string("com/app/ds"),
            Some("mapped-value".to_string())
        );
    }

    #[test]
    fn test_write_falls_back_to_parent() {
        let root = Arc::new(Settings::new("root"));
        let writable = Arc::new(MapConnector::new("rw").writable());
        root.add_connector(writable.clone()).unwrap();

        let child = Arc::new(Settings::new("child"));
        child.set_parent(&root);
        child
            .add_connector(Arc::new(MapConnector::new("ro")))
            .unwrap();

        let status = child.set_string("k", "v").unwrap();
        assert_eq!(status, SetStatus::Success);
        assert_eq!(writable.get_string("k"), Some("v".to_string()));
    }
}
