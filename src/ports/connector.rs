// SPDX-License-Identifier: MIT OR Apache-2.0

//! Connector trait definition.
//!
//! A connector is the top-level lookup unit: a named backend answering
//! string, byte-content and object queries, optionally delegating to an
//! attached content/object resolver chain to follow indirections (a raw
//! value that is itself a pointer to another resource).

use crate::domain::{ObjectValue, Result, SetStatus, SettingsError};
use std::sync::Arc;

/// A named configuration backend answering string/content/object queries.
///
/// Connectors are created once at configuration time and are treated as
/// immutable after [`init`](Connector::init); all methods therefore take
/// `&self` and implementations use interior mutability only for caches and
/// one-time wiring.
///
/// # Absence and faults
///
/// Every `get_*` returns `None` on a miss. Backend faults are caught at the
/// connector boundary, logged, and converted to absence for lookups and to
/// `Ok(SetStatus::NotPossible)` for writes — except where a backend's own
/// persistence step is documented to propagate, in which case `set_*`
/// returns an error.
pub trait Connector: Send + Sync {
    /// Returns the unique name of this connector.
    ///
    /// Names identify connectors inside a settings instance and are used for
    /// positional insertion and logging.
    fn name(&self) -> &str;

    /// Returns the kind identifier of this connector type.
    ///
    /// Position strategies that target "the first/last connector of a given
    /// kind" match on this value.
    fn kind(&self) -> &'static str;

    /// Returns the string value stored under `key`, or `None`.
    fn get_string(&self, key: &str) -> Option<String>;

    /// Returns the byte content stored under `key`, or `None`.
    fn get_content(&self, key: &str) -> Option<Vec<u8>>;

    /// Returns the object stored under `key`, or `None`.
    fn get_object(&self, key: &str) -> Option<ObjectValue>;

    /// Sets or replaces the string value under `key`.
    fn set_string(&self, _key: &str, _value: &str) -> Result<SetStatus> {
        Ok(SetStatus::NotPossible)
    }

    /// Sets or replaces the byte content under `key`.
    fn set_content(&self, _key: &str, _value: &[u8]) -> Result<SetStatus> {
        Ok(SetStatus::NotPossible)
    }

    /// Sets or replaces the object under `key`.
    fn set_object(&self, _key: &str, _value: ObjectValue) -> Result<SetStatus> {
        Ok(SetStatus::NotPossible)
    }

    /// One-time setup hook, called after the connector is fully wired.
    ///
    /// The default does nothing. Implementations may wire additional
    /// internal resolvers here; a store-backed connector, for example,
    /// injects a resolver over its own records so that an attached object
    /// resolver can read content the store owns.
    fn init(&self) {}

    /// Adds a child connector.
    ///
    /// Only composite connectors support this; the default rejects the call
    /// with [`SettingsError::Unsupported`].
    fn add_connector(&self, _connector: Arc<dyn Connector>) -> Result<()> {
        Err(SettingsError::Unsupported {
            component: "connector",
            operation: "add_connector",
        })
    }

    /// Drops any cached values held for `key`.
    ///
    /// The default does nothing; caching decorators override it.
    fn clear_cached_value(&self, _key: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestConnector;

    impl Connector for TestConnector {
        fn name(&self) -> &str {
            "test"
        }

        fn kind(&self) -> &'static str {
            "test"
        }

        fn get_string(&self, _key: &str) -> Option<String> {
            None
        }

        fn get_content(&self, _key: &str) -> Option<Vec<u8>> {
            None
        }

        fn get_object(&self, _key: &str) -> Option<ObjectValue> {
            None
        }
    }

    #[test]
    fn test_default_setters_not_possible() {
        let connector = TestConnector;
        assert_eq!(
            connector.set_string("k", "v").unwrap(),
            SetStatus::NotPossible
        );
        assert_eq!(
            connector.set_content("k", b"v").unwrap(),
            SetStatus::NotPossible
        );
        assert_eq!(
            connector
                .set_object("k", crate::domain::object(1u8))
                .unwrap(),
            SetStatus::NotPossible
        );
    }

    #[test]
    fn test_default_add_connector_rejected() {
        let connector = TestConnector;
        let result = connector.add_connector(Arc::new(TestConnector));
        assert!(matches!(result, Err(SettingsError::Unsupported { .. })));
    }

    #[test]
    fn test_connector_is_object_safe() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Box<dyn Connector>>();
    }
}
