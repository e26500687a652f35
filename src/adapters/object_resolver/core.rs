// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared sidecar-and-cache machinery for concrete object resolvers.

use crate::domain::properties::{self, PROP_CACHED, PROP_OBJECT_RESOLVER_KEY, PROP_READONLY};
use crate::domain::{ObjectValue, Result, SetStatus};
use crate::ports::ContentResolver;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::warn;

/// The sidecar handling, identity matching and per-key object cache that
/// every concrete object resolver shares.
///
/// A resolver embeds a core and supplies only its conversion closures. The
/// core implements the resolution state machine:
///
/// - a cached object is returned as-is, without re-validation, until
///   [`notify_content_has_changed`](ResolverCore::notify_content_has_changed)
///   is called for its key;
/// - content without a sidecar, or whose sidecar declares another resolver's
///   identity key, is not for this resolver and yields `None`;
/// - a converted object is cached when the sidecar says `cached=true`, or
///   when resolver-level default caching is on and the sidecar does not say
///   `cached=false`.
pub struct ResolverCore {
    resolver_key: String,
    property_suffix: String,
    cached_by_default: bool,
    cache: Mutex<HashMap<String, ObjectValue>>,
}

impl ResolverCore {
    /// Creates a core identified by the given resolver key, with default
    /// caching off.
    pub fn new(resolver_key: impl Into<String>) -> Self {
        Self {
            resolver_key: resolver_key.into(),
            property_suffix: ".properties".to_string(),
            cached_by_default: false,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Enables or disables resolver-level default caching.
    pub fn cached_by_default(mut self, cached: bool) -> Self {
        self.cached_by_default = cached;
        self
    }

    /// Returns the identity key sidecars are matched against.
    pub fn resolver_key(&self) -> &str {
        &self.resolver_key
    }

    /// Resolves `key` through the cache, the sidecar checks and the given
    /// conversion.
    pub fn get_object<F>(
        &self,
        key: &str,
        content_resolver: &dyn ContentResolver,
        convert: F,
    ) -> Option<ObjectValue>
    where
        F: FnOnce(&HashMap<String, String>, &[u8]) -> Option<ObjectValue>,
    {
        if let Ok(cache) = self.cache.lock() {
            if let Some(hit) = cache.get(key) {
                return Some(hit.clone());
            }
        }
        let content = content_resolver.get_content(key)?;
        let props = self.sidecar(key, content_resolver)?;
        match props.get(PROP_OBJECT_RESOLVER_KEY) {
            None => {
                warn!(
                    "the sidecar for key '{}' does not declare the required property '{}'",
                    key, PROP_OBJECT_RESOLVER_KEY
                );
                return None;
            }
            Some(declared) if declared != &self.resolver_key => return None,
            Some(_) => {}
        }
        let result = convert(&props, &content)?;
        if self.cache_enabled(&props) {
            if let Ok(mut cache) = self.cache.lock() {
                cache.insert(key.to_string(), result.clone());
            }
        }
        Some(result)
    }

    /// Serializes `value` through the given closure and writes it as the
    /// content under `key`, honoring the sidecar's `readonly` and identity
    /// declarations.
    pub fn set_object<F>(
        &self,
        key: &str,
        content_resolver: &dyn ContentResolver,
        value: ObjectValue,
        serialize: F,
    ) -> Result<SetStatus>
    where
        F: FnOnce(&ObjectValue) -> Option<Vec<u8>>,
    {
        let Some(props) = self.sidecar(key, content_resolver) else {
            return Ok(SetStatus::NotPossible);
        };
        if properties::is_true(&props, PROP_READONLY) {
            return Ok(SetStatus::NotPossible);
        }
        match props.get(PROP_OBJECT_RESOLVER_KEY) {
            Some(declared) if declared == &self.resolver_key => {}
            _ => return Ok(SetStatus::NotPossible),
        }
        let Some(content) = serialize(&value) else {
            return Ok(SetStatus::NotPossible);
        };
        let status = content_resolver.set_content(key, &content)?;
        if status == SetStatus::Success && self.cache_enabled(&props) {
            if let Ok(mut cache) = self.cache.lock() {
                cache.insert(key.to_string(), value);
            }
        }
        Ok(status)
    }

    /// Drops the cache entry for `key`, if any.
    ///
    /// This is the only way a cache entry is ever removed.
    pub fn notify_content_has_changed(&self, key: &str) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.remove(key);
        }
    }

    /// Reads and parses the sidecar properties for `key`.
    ///
    /// An absent or malformed sidecar yields `None`: the content is treated
    /// as "not for this resolver", not as an error.
    fn sidecar(
        &self,
        key: &str,
        content_resolver: &dyn ContentResolver,
    ) -> Option<HashMap<String, String>> {
        let sidecar_key = format!("{}{}", key, self.property_suffix);
        let bytes = content_resolver.get_content(&sidecar_key)?;
        match properties::parse(&bytes) {
            Ok(props) => Some(props),
            Err(e) => {
                warn!("malformed sidecar '{}': {}", sidecar_key, e);
                None
            }
        }
    }

    fn cache_enabled(&self, props: &HashMap<String, String>) -> bool {
        match props.get(PROP_CACHED) {
            Some(value) => value.eq_ignore_ascii_case("true"),
            None => self.cached_by_default,
        }
    }
}
