// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared state for connector implementations.

use crate::domain::ObjectValue;
use crate::ports::{ContentResolver, ObjectResolver};
use std::sync::{Arc, RwLock};

/// The name and resolver slots every concrete connector carries.
///
/// Connectors embed a base instead of inheriting one. The resolver slots are
/// wired at configuration time (or by [`Connector::init`]) and read-only
/// afterwards; interior mutability exists only so that `init` can rewire
/// them through a shared reference.
///
/// [`Connector::init`]: crate::ports::Connector::init
pub struct ConnectorBase {
    name: String,
    content_resolver: RwLock<Option<Arc<dyn ContentResolver>>>,
    object_resolver: RwLock<Option<Arc<dyn ObjectResolver>>>,
}

impl ConnectorBase {
    /// Creates a base with the given connector name and empty resolver
    /// slots.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content_resolver: RwLock::new(None),
            object_resolver: RwLock::new(None),
        }
    }

    /// Returns the connector name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the attached content resolver, if any.
    pub fn content_resolver(&self) -> Option<Arc<dyn ContentResolver>> {
        self.content_resolver.read().ok()?.clone()
    }

    /// Attaches or replaces the content resolver.
    pub fn set_content_resolver(&self, resolver: Arc<dyn ContentResolver>) {
        if let Ok(mut slot) = self.content_resolver.write() {
            *slot = Some(resolver);
        }
    }

    /// Returns the attached object resolver, if any.
    pub fn object_resolver(&self) -> Option<Arc<dyn ObjectResolver>> {
        self.object_resolver.read().ok()?.clone()
    }

    /// Attaches or replaces the object resolver.
    pub fn set_object_resolver(&self, resolver: Arc<dyn ObjectResolver>) {
        if let Ok(mut slot) = self.object_resolver.write() {
            *slot = Some(resolver);
        }
    }

    /// Follows a raw string value one indirection level into the attached
    /// content resolver.
    ///
    /// Connectors whose raw values can name another resource (a path into a
    /// content resolver) use this to return the pointed-to bytes. Without an
    /// attached resolver there is nothing to follow.
    pub fn content_via_pointer(&self, pointer: &str) -> Option<Vec<u8>> {
        self.content_resolver()?.get_content(pointer)
    }

    /// Follows a raw string value one indirection level into the attached
    /// object resolver.
    pub fn object_via_pointer(&self, pointer: &str) -> Option<ObjectValue> {
        let object_resolver = self.object_resolver()?;
        let content_resolver = self.content_resolver()?;
        object_resolver.get_object(pointer, &*content_resolver)
    }
}
