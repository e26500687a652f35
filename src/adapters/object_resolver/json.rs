// SPDX-License-Identifier: MIT OR Apache-2.0

//! Self-describing JSON object resolver.

use crate::adapters::object_resolver::core::ResolverCore;
use crate::domain::{object, ObjectValue, Result, SetStatus};
use crate::ports::{ContentResolver, ObjectResolver};
use tracing::warn;

/// The identity key written into sidecars for content this resolver owns.
pub const JSON_RESOLVER_KEY: &str = "JsonObjectResolver";

/// An object resolver that round-trips arbitrary structured values through
/// a self-describing JSON encoding.
///
/// Resolved objects are [`serde_json::Value`] documents; writes accept an
/// [`ObjectValue`] holding a `serde_json::Value` and serialize it as
/// pretty-printed JSON.
pub struct JsonObjectResolver {
    core: ResolverCore,
}

impl JsonObjectResolver {
    /// Creates a resolver with default caching off.
    pub fn new() -> Self {
        Self {
            core: ResolverCore::new(JSON_RESOLVER_KEY),
        }
    }

    /// Creates a resolver with resolver-level default caching switched on.
    ///
    /// Sidecars can still opt out per key with `cached=false`.
    pub fn cached() -> Self {
        Self {
            core: ResolverCore::new(JSON_RESOLVER_KEY).cached_by_default(true),
        }
    }
}

impl Default for JsonObjectResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectResolver for JsonObjectResolver {
    fn get_object(
        &self,
        key: &str,
        content_resolver: &dyn ContentResolver,
    ) -> Option<ObjectValue> {
        self.core.get_object(key, content_resolver, |_props, content| {
            match serde_json::from_slice::<serde_json::Value>(content) {
                Ok(value) => Some(object(value)),
                Err(e) => {
                    warn!("cannot decode JSON content for key '{}': {}", key, e);
                    None
                }
            }
        })
    }

    fn set_object(
        &self,
        key: &str,
        content_resolver: &dyn ContentResolver,
        value: ObjectValue,
    ) -> Result<SetStatus> {
        self.core.set_object(key, content_resolver, value, |value| {
            let json = value.downcast_ref::<serde_json::Value>()?;
            match serde_json::to_vec_pretty(json) {
                Ok(bytes) => Some(bytes),
                Err(e) => {
                    warn!("cannot encode JSON content for key '{}': {}", key, e);
                    None
                }
            }
        })
    }

    fn notify_content_has_changed(&self, key: &str) {
        self.core.notify_content_has_changed(key);
    }
}
