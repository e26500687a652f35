// SPDX-License-Identifier: MIT OR Apache-2.0

//! Key-value store connector.
//!
//! The boundary rendition of a database-backed connector: records live
//! behind a [`SettingsStore`] DAO, and `init` wires the store in as the
//! first content source of the attached resolver chain so that an object
//! resolver can read content the store owns.

use crate::adapters::connector::base::ConnectorBase;
use crate::adapters::content_resolver::UnionContentResolver;
use crate::domain::{ObjectValue, Result, SetStatus};
use crate::ports::{Connector, ContentResolver, ObjectResolver};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

/// The kind identifier of [`StoreConnector`].
pub const STORE_CONNECTOR_KIND: &str = "store";

/// A stored settings record with independent string and content columns.
#[derive(Debug, Clone, Default)]
pub struct SettingsRecord {
    /// The record key.
    pub key: String,
    /// The string column.
    pub string_value: Option<String>,
    /// The byte content column.
    pub content_value: Option<Vec<u8>>,
}

/// Data access port for settings records.
///
/// Implementations are expected to be slow and fallible (a database round
/// trip); the connector catches read faults and converts them to absence,
/// but persistence faults on the string write path propagate to the caller.
pub trait SettingsStore: Send + Sync {
    /// Loads the record stored under `key`, if any.
    fn by_key(&self, key: &str) -> Result<Option<SettingsRecord>>;

    /// Inserts or replaces a record.
    fn store(&self, record: SettingsRecord) -> Result<()>;
}

/// An in-memory [`SettingsStore`], the in-tree implementation for tests and
/// bootstrapping.
#[derive(Default)]
pub struct InMemoryStore {
    records: Mutex<HashMap<String, SettingsRecord>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for InMemoryStore {
    fn by_key(&self, key: &str) -> Result<Option<SettingsRecord>> {
        match self.records.lock() {
            Ok(records) => Ok(records.get(key).cloned()),
            Err(_) => Ok(None),
        }
    }

    fn store(&self, record: SettingsRecord) -> Result<()> {
        if let Ok(mut records) = self.records.lock() {
            records.insert(record.key.clone(), record);
        }
        Ok(())
    }
}

/// Adapts a [`SettingsStore`]'s content column as a [`ContentResolver`].
struct StoreContentAdapter {
    store: Arc<dyn SettingsStore>,
}

impl ContentResolver for StoreContentAdapter {
    fn get_content(&self, key: &str) -> Option<Vec<u8>> {
        match self.store.by_key(key) {
            Ok(record) => record.and_then(|r| r.content_value),
            Err(e) => {
                info!("store lookup for key '{}' failed: {}", key, e);
                None
            }
        }
    }

    fn set_content(&self, key: &str, value: &[u8]) -> Result<SetStatus> {
        let mut record = match self.store.by_key(key) {
            Ok(Some(record)) => record,
            Ok(None) => SettingsRecord {
                key: key.to_string(),
                ..Default::default()
            },
            Err(e) => {
                warn!("store lookup for key '{}' failed: {}", key, e);
                return Ok(SetStatus::NotPossible);
            }
        };
        record.content_value = Some(value.to_vec());
        match self.store.store(record) {
            Ok(()) => Ok(SetStatus::Success),
            Err(e) => {
                warn!("store write for key '{}' failed: {}", key, e);
                Ok(SetStatus::NotPossible)
            }
        }
    }
}

/// A read-write connector over a [`SettingsStore`].
pub struct StoreConnector {
    base: ConnectorBase,
    store: Arc<dyn SettingsStore>,
}

impl StoreConnector {
    /// Creates a connector over the given store.
    pub fn new(name: impl Into<String>, store: Arc<dyn SettingsStore>) -> Self {
        Self {
            base: ConnectorBase::new(name),
            store,
        }
    }

    /// Attaches a content resolver; `init` places the store's own content
    /// ahead of it.
    pub fn with_content_resolver(self, resolver: Arc<dyn ContentResolver>) -> Self {
        self.base.set_content_resolver(resolver);
        self
    }

    /// Attaches an object resolver.
    pub fn with_object_resolver(self, resolver: Arc<dyn ObjectResolver>) -> Self {
        self.base.set_object_resolver(resolver);
        self
    }
}

impl Connector for StoreConnector {
    fn name(&self) -> &str {
        self.base.name()
    }

    fn kind(&self) -> &'static str {
        STORE_CONNECTOR_KIND
    }

    /// Injects a resolver over the store's own records at the first
    /// position of the content chain, ahead of any attached resolver.
    fn init(&self) {
        let union = UnionContentResolver::with_resolver(Arc::new(StoreContentAdapter {
            store: self.store.clone(),
        }));
        if let Some(existing) = self.base.content_resolver() {
            union.add_content_resolver(existing);
        }
        self.base.set_content_resolver(Arc::new(union));
    }

    fn get_string(&self, key: &str) -> Option<String> {
        match self.store.by_key(key) {
            Ok(record) => record.and_then(|r| r.string_value),
            Err(e) => {
                info!("store lookup for key '{}' failed: {}", key, e);
                None
            }
        }
    }

    fn get_content(&self, key: &str) -> Option<Vec<u8>> {
        match self.store.by_key(key) {
            Ok(record) => record.and_then(|r| r.content_value),
            Err(e) => {
                info!("store lookup for key '{}' failed: {}", key, e);
                None
            }
        }
    }

    fn get_object(&self, key: &str) -> Option<ObjectValue> {
        let object_resolver = self.base.object_resolver()?;
        let content_resolver = self.base.content_resolver()?;
        object_resolver.get_object(key, &*content_resolver)
    }

    /// Unlike the other write paths, a persistence fault here propagates:
    /// the caller asked for durable storage and silent loss is worse than
    /// an error.
    fn set_string(&self, key: &str, value: &str) -> Result<SetStatus> {
        let mut record = self.store.by_key(key)?.unwrap_or_else(|| SettingsRecord {
            key: key.to_string(),
            ..Default::default()
        });
        record.string_value = Some(value.to_string());
        self.store.store(record)?;
        Ok(SetStatus::Success)
    }

    fn set_content(&self, key: &str, value: &[u8]) -> Result<SetStatus> {
        let adapter = StoreContentAdapter {
            store: self.store.clone(),
        };
        adapter.set_content(key, value)
    }

    fn set_object(&self, key: &str, value: ObjectValue) -> Result<SetStatus> {
        let (Some(object_resolver), Some(content_resolver)) =
            (self.base.object_resolver(), self.base.content_resolver())
        else {
            return Ok(SetStatus::NotPossible);
        };
        object_resolver.set_object(key, &*content_resolver, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::object_resolver::{JsonObjectResolver, JSON_RESOLVER_KEY};
    use crate::domain::{object, SettingsError};
    use serde_json::json;

    #[test]
    fn test_string_round_trip() {
        let connector = StoreConnector::new("db", Arc::new(InMemoryStore::new()));
        assert_eq!(connector.get_string("k"), None);
        let status = connector.set_string("k", "v").unwrap();
        assert_eq!(status, SetStatus::Success);
        assert_eq!(connector.get_string("k"), Some("v".to_string()));
    }

    #[test]
    fn test_string_and_content_columns_are_independent() {
        let connector = StoreConnector::new("db", Arc::new(InMemoryStore::new()));
        connector.set_string("k", "text").unwrap();
        connector.set_content("k", b"bytes").unwrap();
        assert_eq!(connector.get_string("k"), Some("text".to_string()));
        assert_eq!(connector.get_content("k"), Some(b"bytes".to_vec()));
    }

    #[test]
    fn test_init_injects_store_content_first() {
        let connector = StoreConnector::new("db", Arc::new(InMemoryStore::new()))
            .with_object_resolver(Arc::new(JsonObjectResolver::new()));
        connector.init();

        // Both the payload and the sidecar live only in the store; the
        // object resolver reads them through the injected adapter.
        connector.set_content("com/app/obj", b"{\"a\": 1}").unwrap();
        connector
            .set_content(
                "com/app/obj.properties",
                format!("objectResolverKey={JSON_RESOLVER_KEY}\n").as_bytes(),
            )
            .unwrap();

        let result = connector.get_object("com/app/obj").unwrap();
        let doc = result.downcast_ref::<serde_json::Value>().unwrap();
        assert_eq!(doc["a"], json!(1));
    }

    #[test]
    fn test_set_object_through_resolver() {
        let connector = StoreConnector::new("db", Arc::new(InMemoryStore::new()))
            .with_object_resolver(Arc::new(JsonObjectResolver::new()));
        connector.init();
        connector
            .set_content(
                "k.properties",
                format!("objectResolverKey={JSON_RESOLVER_KEY}\n").as_bytes(),
            )
            .unwrap();

        let status = connector.set_object("k", object(json!([1, 2]))).unwrap();
        assert_eq!(status, SetStatus::Success);
        let stored = connector.get_content("k").unwrap();
        assert_eq!(
            serde_json::from_slice::<serde_json::Value>(&stored).unwrap(),
            json!([1, 2])
        );
    }

    struct BrokenStore;

    impl SettingsStore for BrokenStore {
        fn by_key(&self, _key: &str) -> Result<Option<SettingsRecord>> {
            Ok(None)
        }

        fn store(&self, record: SettingsRecord) -> Result<()> {
            Err(SettingsError::Store {
                key: record.key,
                message: "connection lost".to_string(),
                source: None,
            })
        }
    }

    #[test]
    fn test_set_string_propagates_store_fault() {
        let connector = StoreConnector::new("db", Arc::new(BrokenStore));
        let result = connector.set_string("k", "v");
        assert!(matches!(result, Err(SettingsError::Store { .. })));
    }

    #[test]
    fn test_set_content_converts_store_fault_to_not_possible() {
        let connector = StoreConnector::new("db", Arc::new(BrokenStore));
        let status = connector.set_content("k", b"v").unwrap();
        assert_eq!(status, SetStatus::NotPossible);
    }
}
