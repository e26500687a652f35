// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process environment connector.

use crate::adapters::connector::base::ConnectorBase;
use crate::domain::ObjectValue;
use crate::ports::{Connector, ContentResolver, ObjectResolver};
use std::sync::Arc;
use tracing::debug;

/// The kind identifier of [`EnvironmentConnector`].
pub const ENVIRONMENT_CONNECTOR_KIND: &str = "environment";

/// A read-only connector over the process environment.
///
/// A key is looked up verbatim first; on a miss it is retried in
/// environment-variable convention, uppercased with every non-word character
/// replaced by `_` (`com/app/dbUrl` → `COM_APP_DBURL`).
///
/// Raw values can point into an attached content/object resolver, so an
/// environment variable may name the file that holds the real payload.
pub struct EnvironmentConnector {
    base: ConnectorBase,
}

impl EnvironmentConnector {
    /// Creates a connector with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            base: ConnectorBase::new(name),
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

    fn env_key(key: &str) -> String {
        key.chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect()
    }
}

impl Connector for EnvironmentConnector {
    fn name(&self) -> &str {
        self.base.name()
    }

    fn kind(&self) -> &'static str {
        ENVIRONMENT_CONNECTOR_KIND
    }

    fn get_string(&self, key: &str) -> Option<String> {
        if let Ok(value) = std::env::var(key) {
            return Some(value);
        }
        let uppercase_key = Self::env_key(key);
        debug!("retrying environment lookup with key '{}'", uppercase_key);
        std::env::var(uppercase_key).ok()
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
