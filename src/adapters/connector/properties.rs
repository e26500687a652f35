// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory property table connector.

use crate::adapters::connector::base::ConnectorBase;
use crate::adapters::content_resolver::{
    ClasspathContentResolver, FsContentResolver, CLASSPATH_URL_PREFIX, FILE_URL_PREFIX,
};
use crate::domain::{properties, ObjectValue, Result, SettingsError};
use crate::ports::{Connector, ContentResolver, ObjectResolver};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, RwLock};

/// The kind identifier of [`PropertiesConnector`].
pub const PROPERTIES_CONNECTOR_KIND: &str = "properties";

/// A read-only connector over an in-memory property table.
///
/// The table is injected directly or loaded from a `file:` or `classpath:`
/// path. Values that are themselves `file:.`-relative paths can optionally
/// be resolved against the property file's own folder, so a property file
/// can point at sibling resources regardless of the working directory.
pub struct PropertiesConnector {
    base: ConnectorBase,
    table: RwLock<HashMap<String, String>>,
    resolve_relative_paths: bool,
}

impl PropertiesConnector {
    /// Creates a connector with an empty table.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            base: ConnectorBase::new(name),
            table: RwLock::new(HashMap::new()),
            resolve_relative_paths: false,
        }
    }

    /// Replaces the table with the given entries.
    pub fn with_table(self, table: HashMap<String, String>) -> Self {
        if let Ok(mut slot) = self.table.write() {
            *slot = table;
        }
        self
    }

    /// Enables rewriting of `file:.`-relative values against the loaded
    /// property file's folder.
    pub fn resolve_relative_paths(mut self, enabled: bool) -> Self {
        self.resolve_relative_paths = enabled;
        self
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

    /// Loads the table from a `file:` or `classpath:` path.
    ///
    /// Any other prefix is rejected; a missing resource is an error here
    /// (the connector was explicitly told where its data lives).
    pub fn load_from_path(&self, path: &str) -> Result<()> {
        let (content, folder) = if let Some(file_path) = path.strip_prefix(FILE_URL_PREFIX) {
            let content = FsContentResolver::default().get_content(path);
            let folder = Path::new(file_path).parent().map(Path::to_path_buf);
            (content, folder)
        } else if path.starts_with(CLASSPATH_URL_PREFIX) {
            (ClasspathContentResolver::new().get_content(path), None)
        } else {
            return Err(SettingsError::Parse {
                what: "property path",
                message: format!(
                    "the property path must start with '{FILE_URL_PREFIX}' or \
                     '{CLASSPATH_URL_PREFIX}', but was '{path}'"
                ),
            });
        };
        let Some(content) = content else {
            return Err(SettingsError::Parse {
                what: "property path",
                message: format!("no property resource found under '{path}'"),
            });
        };
        let mut table = properties::parse(&content)?;
        if self.resolve_relative_paths {
            if let Some(folder) = folder {
                Self::rewrite_relative_values(&mut table, &folder);
            }
        }
        if let Ok(mut slot) = self.table.write() {
            *slot = table;
        }
        Ok(())
    }

    fn rewrite_relative_values(table: &mut HashMap<String, String>, folder: &Path) {
        let relative_prefix = format!("{FILE_URL_PREFIX}.");
        for value in table.values_mut() {
            if let Some(rest) = value.strip_prefix(&relative_prefix) {
                let resolved = folder.join(format!(".{rest}"));
                *value = format!("{FILE_URL_PREFIX}{}", resolved.display());
            }
        }
    }
}

impl Connector for PropertiesConnector {
    fn name(&self) -> &str {
        self.base.name()
    }

    fn kind(&self) -> &'static str {
        PROPERTIES_CONNECTOR_KIND
    }

    fn get_string(&self, key: &str) -> Option<String> {
        self.table.read().ok()?.get(key).cloned()
    }

    fn get_content(&self, key: &str) -> Option<Vec<u8>> {
        let pointer = self.get_string(key)?;
        self.base.content_via_pointer(&pointer)
    }

    fn get_object(&self, key: &str) -> Option<ObjectValue> {
        let pointer = self.get_string(key)?;
        self.base.object_via_pointer(&pointer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SetStatus;
    use tempfile::TempDir;

    #[test]
    fn test_table_lookup() {
        let mut table = HashMap::new();
        table.insert("com/app/param".to_string(), "value".to_string());
        let connector = PropertiesConnector::new("props").with_table(table);

        assert_eq!(
            connector.get_string("com/app/param"),
            Some("value".to_string())
        );
        assert_eq!(connector.get_string("missing"), None);
    }

    #[test]
    fn test_read_only() {
        let connector = PropertiesConnector::new("props");
        assert_eq!(
            connector.set_string("k", "v").unwrap(),
            SetStatus::NotPossible
        );
    }

    #[test]
    fn test_load_from_file_path() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("app.properties");
        std::fs::write(&file, "com/app/param=from-file\n").unwrap();

        let connector = PropertiesConnector::new("props");
        connector
            .load_from_path(&format!("file:{}", file.display()))
            .unwrap();
        assert_eq!(
            connector.get_string("com/app/param"),
            Some("from-file".to_string())
        );
    }

    #[test]
    fn test_load_from_unknown_prefix() {
        let connector = PropertiesConnector::new("props");
        assert!(connector.load_from_path("ftp://example").is_err());
    }

    #[test]
    fn test_relative_values_resolved_against_folder() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("app.properties");
        std::fs::write(&file, "pointer=file:./data/payload.bin\n").unwrap();

        let connector = PropertiesConnector::new("props").resolve_relative_paths(true);
        connector
            .load_from_path(&format!("file:{}", file.display()))
            .unwrap();

        let value = connector.get_string("pointer").unwrap();
        assert!(value.starts_with("file:"));
        assert!(value.contains("data"));
        assert!(!value.starts_with("file:./"));
    }

    #[test]
    fn test_pointer_indirection() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("payload.txt"), b"indirect").unwrap();
        let fs = Arc::new(FsContentResolver::new(dir.path()).unwrap());

        let mut table = HashMap::new();
        table.insert("com/app/file".to_string(), "payload.txt".to_string());
        let connector = PropertiesConnector::new("props")
            .with_table(table)
            .with_content_resolver(fs);

        assert_eq!(
            connector.get_content("com/app/file"),
            Some(b"indirect".to_vec())
        );
    }
}
