// SPDX-License-Identifier: MIT OR Apache-2.0

//! User/system preferences connector.

use crate::adapters::connector::base::ConnectorBase;
use crate::domain::{properties, ObjectValue, Result, SetStatus};
use crate::ports::{Connector, ContentResolver, ObjectResolver};
use directories::ProjectDirs;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;

/// The kind identifier of [`PreferencesConnector`].
pub const PREFERENCES_CONNECTOR_KIND: &str = "preferences";

/// File name preference nodes are persisted under.
const NODE_FILE: &str = "prefs.properties";

/// A connector over per-user and per-machine preference trees.
///
/// A key splits at its last `/` into a node path and an entry name
/// (`com/app/db` → node `com/app`, entry `db`). Each node is persisted as a
/// properties file below a scope root; the user scope shadows the system
/// scope on reads, and writes go to the user scope (the system scope is
/// written only through [`set_system_string`]).
///
/// Raw values can point into an attached content/object resolver, as with
/// the environment connector.
///
/// [`set_system_string`]: PreferencesConnector::set_system_string
pub struct PreferencesConnector {
    base: ConnectorBase,
    user_root: PathBuf,
    system_root: PathBuf,
}

impl PreferencesConnector {
    /// Creates a connector over the platform's preference locations: the
    /// user scope below the per-user preference directory, the system scope
    /// below `/etc/cfgchain`.
    pub fn new(name: impl Into<String>) -> Self {
        let user_root = ProjectDirs::from("", "", "cfgchain")
            .map(|dirs| dirs.preference_dir().to_path_buf())
            .unwrap_or_else(|| {
                warn!("no home directory found, keeping user preferences in './.cfgchain'");
                PathBuf::from("./.cfgchain")
            });
        Self::with_roots(name, user_root, PathBuf::from("/etc/cfgchain"))
    }

    /// Creates a connector over explicit user and system scope roots.
    pub fn with_roots(
        name: impl Into<String>,
        user_root: impl Into<PathBuf>,
        system_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            base: ConnectorBase::new(name),
            user_root: user_root.into(),
            system_root: system_root.into(),
        }
    }

    /// Attaches a content resolver for pointer indirection.
    pub fn with_content_resolver(self, resolver: Arc<dyn ContentResolver>) -> Self {
        self.base.set_content_resolver(resolver);
        self
    }

    /// Attaches an object resolver for pointer indirection.
    pub fn with_object_resolver(self, resolver: Arc<dyn ObjectResolver>) -> Self {
        self.base.set_object_resolver(resolver);
        self
    }

    /// Stores the value in the system scope instead of the user scope.
    pub fn set_system_string(&self, key: &str, value: &str) -> Result<SetStatus> {
        let (node, entry) = Self::split(&Self::normalize(key));
        Self::write_scope(&self.system_root, node.as_deref(), &entry, value)
    }

    fn normalize(key: &str) -> String {
        let key = key.replace('\\', "/");
        key.strip_prefix('/').unwrap_or(&key).to_string()
    }

    fn split(key: &str) -> (Option<String>, String) {
        match key.rfind('/') {
            Some(pos) => (Some(key[..pos].to_string()), key[pos + 1..].to_string()),
            None => (None, key.to_string()),
        }
    }

    fn node_file(root: &Path, node: Option<&str>) -> PathBuf {
        match node {
            Some(node) => root.join(node).join(NODE_FILE),
            None => root.join(NODE_FILE),
        }
    }

    fn read_scope(root: &Path, node: Option<&str>, entry: &str) -> Option<String> {
        let file = Self::node_file(root, node);
        let bytes = std::fs::read(&file).ok()?;
        match properties::parse(&bytes) {
            Ok(table) => table.get(entry).cloned(),
            Err(e) => {
                warn!("malformed preference node '{}': {}", file.display(), e);
                None
            }
        }
    }

    fn write_scope(
        root: &Path,
        node: Option<&str>,
        entry: &str,
        value: &str,
    ) -> Result<SetStatus> {
        let file = Self::node_file(root, node);
        // Stable entry order keeps the node file diff-friendly.
        let mut table = BTreeMap::new();
        if let Ok(bytes) = std::fs::read(&file) {
            match properties::parse(&bytes) {
                Ok(existing) => table.extend(existing),
                Err(e) => warn!("replacing malformed preference node '{}': {}", file.display(), e),
            }
        }
        table.insert(entry.to_string(), value.to_string());

        if let Some(parent) = file.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                warn!("cannot create preference node '{}': {}", parent.display(), e);
                return Ok(SetStatus::NotPossible);
            }
        }
        let bytes =
            properties::to_bytes(table.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        match std::fs::write(&file, bytes) {
            Ok(()) => Ok(SetStatus::Success),
            Err(e) => {
                warn!("cannot flush preference node '{}': {}", file.display(), e);
                Ok(SetStatus::NotPossible)
            }
        }
    }
}

impl Connector for PreferencesConnector {
    fn name(&self) -> &str {
        self.base.name()
    }

    fn kind(&self) -> &'static str {
        PREFERENCES_CONNECTOR_KIND
    }

    fn get_string(&self, key: &str) -> Option<String> {
        let (node, entry) = Self::split(&Self::normalize(key));
        Self::read_scope(&self.user_root, node.as_deref(), &entry)
            .or_else(|| Self::read_scope(&self.system_root, node.as_deref(), &entry))
    }

    fn get_content(&self, key: &str) -> Option<Vec<u8>> {
        let pointer = self.get_string(key)?;
        self.base.content_via_pointer(&pointer)
    }

    fn get_object(&self, key: &str) -> Option<ObjectValue> {
        let pointer = self.get_string(key)?;
        self.base.object_via_pointer(&pointer)
    }

    fn set_string(&self, key: &str, value: &str) -> Result<SetStatus> {
        let (node, entry) = Self::split(&Self::normalize(key));
        Self::write_scope(&self.user_root, node.as_deref(), &entry, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn connector() -> (TempDir, TempDir, PreferencesConnector) {
        let user = TempDir::new().unwrap();
        let system = TempDir::new().unwrap();
        let connector = PreferencesConnector::with_roots("prefs", user.path(), system.path());
        (user, system, connector)
    }

    #[test]
    fn test_write_lands_in_user_scope() {
        let (user, _system, connector) = connector();
        let status = connector.set_string("com/app/db", "postgres://localhost").unwrap();
        assert_eq!(status, SetStatus::Success);
        assert!(user.path().join("com/app").join(NODE_FILE).exists());
        assert_eq!(
            connector.get_string("com/app/db"),
            Some("postgres://localhost".to_string())
        );
    }

    #[test]
    fn test_user_scope_shadows_system_scope() {
        let (_user, _system, connector) = connector();
        connector.set_system_string("com/app/db", "system-value").unwrap();
        assert_eq!(
            connector.get_string("com/app/db"),
            Some("system-value".to_string())
        );

        connector.set_string("com/app/db", "user-value").unwrap();
        assert_eq!(
            connector.get_string("com/app/db"),
            Some("user-value".to_string())
        );
    }

    #[test]
    fn test_key_without_node_path() {
        let (_user, _system, connector) = connector();
        connector.set_string("standalone", "v").unwrap();
        assert_eq!(connector.get_string("standalone"), Some("v".to_string()));
    }

    #[test]
    fn test_backslash_and_leading_slash_normalization() {
        let (_user, _system, connector) = connector();
        connector.set_string("com\\app\\db", "v").unwrap();
        assert_eq!(connector.get_string("/com/app/db"), Some("v".to_string()));
    }

    #[test]
    fn test_multiple_entries_per_node() {
        let (_user, _system, connector) = connector();
        connector.set_string("com/app/a", "1").unwrap();
        connector.set_string("com/app/b", "2").unwrap();
        assert_eq!(connector.get_string("com/app/a"), Some("1".to_string()));
        assert_eq!(connector.get_string("com/app/b"), Some("2".to_string()));
    }
}
