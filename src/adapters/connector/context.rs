// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-process naming context connector.
//!
//! The boundary rendition of a naming-service backend: entries bound into a
//! shared, possibly read-only context at startup, looked up under a context
//! path prefix, with raw string entries acting as pointers into attached
//! resolvers.

use crate::adapters::connector::base::ConnectorBase;
use crate::domain::{object, ObjectValue, Result, SetStatus};
use crate::ports::{Connector, ContentResolver, ObjectResolver};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::{debug, info};

/// The kind identifier of [`ContextConnector`].
pub const CONTEXT_CONNECTOR_KIND: &str = "context";

/// A value bound into a [`NamingContext`].
#[derive(Clone)]
pub enum ContextValue {
    /// A string entry; connectors treat it as a pointer when a resolver is
    /// attached.
    Str(String),
    /// Raw byte content.
    Bytes(Vec<u8>),
    /// An arbitrary bound object.
    Object(ObjectValue),
}

/// A process-wide bag of named bindings shared between the host application
/// and context connectors.
///
/// A read-only context accepts initial bindings through
/// [`bind`](NamingContext::bind) but rejects every
/// [`rebind`](NamingContext::rebind), the way a managed container's naming
/// service does.
pub struct NamingContext {
    entries: RwLock<HashMap<String, ContextValue>>,
    read_only: bool,
}

impl NamingContext {
    /// Creates a writable context.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            read_only: false,
        }
    }

    /// Creates a context that rejects rebinding.
    pub fn read_only() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            read_only: true,
        }
    }

    /// Returns `true` if rebinding is rejected.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Binds a value, regardless of the read-only flag.
    ///
    /// This is the setup API the host application populates the context
    /// with before handing it to connectors.
    pub fn bind(&self, name: impl Into<String>, value: ContextValue) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(name.into(), value);
        }
    }

    /// Looks a binding up by its exact name.
    pub fn lookup(&self, name: &str) -> Option<ContextValue> {
        self.entries.read().ok()?.get(name).cloned()
    }

    /// Replaces a binding, honoring the read-only flag.
    pub fn rebind(&self, name: impl Into<String>, value: ContextValue) -> SetStatus {
        if self.read_only {
            debug!("context is read only, cannot rebind");
            return SetStatus::NotPossible;
        }
        match self.entries.write() {
            Ok(mut entries) => {
                entries.insert(name.into(), value);
                SetStatus::Success
            }
            Err(_) => SetStatus::NotPossible,
        }
    }
}

impl Default for NamingContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A connector over a [`NamingContext`].
///
/// Keys are normalized before lookup: backslashes become slashes, a leading
/// slash is stripped, and the context path prefix (default `ctx/env/`) is
/// prepended unless already present. A key that misses with the prefix is
/// retried without it.
///
/// String entries follow the indirection contract: with a content/object
/// resolver attached, the string is a pointer to the real payload, and
/// writes go through an established pointer instead of overwriting it.
pub struct ContextConnector {
    base: ConnectorBase,
    context: Arc<NamingContext>,
    context_path_prefix: String,
}

impl ContextConnector {
    /// Creates a connector over the given context with the default context
    /// path prefix.
    pub fn new(name: impl Into<String>, context: Arc<NamingContext>) -> Self {
        Self {
            base: ConnectorBase::new(name),
            context,
            context_path_prefix: "ctx/env/".to_string(),
        }
    }

    /// Replaces the context path prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.context_path_prefix = prefix.into();
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

    fn normalize_key(&self, key: &str, with_prefix: bool) -> String {
        if key.starts_with(&self.context_path_prefix) {
            return key.to_string();
        }
        let key = key.replace('\\', "/");
        let key = key.strip_prefix('/').unwrap_or(&key);
        if with_prefix {
            format!("{}{}", self.context_path_prefix, key)
        } else {
            key.to_string()
        }
    }

    fn lookup(&self, key: &str) -> Option<ContextValue> {
        self.context
            .lookup(&self.normalize_key(key, true))
            .or_else(|| self.context.lookup(&self.normalize_key(key, false)))
    }
}

impl Connector for ContextConnector {
    fn name(&self) -> &str {
        self.base.name()
    }

    fn kind(&self) -> &'static str {
        CONTEXT_CONNECTOR_KIND
    }

    fn get_string(&self, key: &str) -> Option<String> {
        match self.lookup(key)? {
            ContextValue::Str(value) => Some(value),
            _ => {
                info!("entry for key '{}' is not a string", key);
                None
            }
        }
    }

    fn get_content(&self, key: &str) -> Option<Vec<u8>> {
        match self.lookup(key)? {
            ContextValue::Str(pointer) => {
                if let Some(content) = self.base.content_via_pointer(&pointer) {
                    return Some(content);
                }
                info!("string entry for key '{}' does not resolve to content", key);
                None
            }
            ContextValue::Bytes(content) => Some(content),
            ContextValue::Object(_) => {
                info!("entry for key '{}' is not byte content", key);
                None
            }
        }
    }

    fn get_object(&self, key: &str) -> Option<ObjectValue> {
        match self.lookup(key)? {
            ContextValue::Str(pointer) => {
                if let Some(resolved) = self.base.object_via_pointer(&pointer) {
                    return Some(resolved);
                }
                // Without a resolving chain the raw entry itself is the
                // object.
                Some(object(pointer))
            }
            ContextValue::Bytes(content) => Some(object(content)),
            ContextValue::Object(value) => Some(value),
        }
    }

    fn set_string(&self, key: &str, value: &str) -> Result<SetStatus> {
        let name = self.normalize_key(key, true);
        Ok(self.context.rebind(name, ContextValue::Str(value.to_string())))
    }

    fn set_content(&self, key: &str, value: &[u8]) -> Result<SetStatus> {
        // An established string entry is a pointer; write through it rather
        // than overwriting the pointer itself.
        if let Some(ContextValue::Str(pointer)) = self.lookup(key) {
            if let Some(content_resolver) = self.base.content_resolver() {
                return content_resolver.set_content(&pointer, value);
            }
        }
        let name = self.normalize_key(key, true);
        Ok(self.context.rebind(name, ContextValue::Bytes(value.to_vec())))
    }

    fn set_object(&self, key: &str, value: ObjectValue) -> Result<SetStatus> {
        if let Some(ContextValue::Str(pointer)) = self.lookup(key) {
            if let (Some(object_resolver), Some(content_resolver)) =
                (self.base.object_resolver(), self.base.content_resolver())
            {
                return object_resolver.set_object(&pointer, &*content_resolver, value);
            }
        }
        let name = self.normalize_key(key, true);
        Ok(self.context.rebind(name, ContextValue::Object(value)))
    }
}
