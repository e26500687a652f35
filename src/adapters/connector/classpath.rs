// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resource-path connector.

use crate::adapters::connector::base::ConnectorBase;
use crate::adapters::content_resolver::{ClasspathContentResolver, UnionContentResolver};
use crate::domain::ObjectValue;
use crate::ports::{Connector, ContentResolver, ObjectResolver};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// The kind identifier of [`ClasspathConnector`].
pub const CLASSPATH_CONNECTOR_KIND: &str = "classpath";

/// A read-only connector over the resource path.
///
/// Strings are the UTF-8 decoding of the resource content. As with the
/// filesystem connector, a custom content resolver attaches behind the
/// resource-path resolver in a union.
pub struct ClasspathConnector {
    base: ConnectorBase,
    classpath: Arc<ClasspathContentResolver>,
    union: Arc<UnionContentResolver>,
}

impl ClasspathConnector {
    /// Creates a connector over the default resource path.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_resolver(name, Arc::new(ClasspathContentResolver::new()))
    }

    /// Creates a connector over the given resource roots.
    pub fn with_roots(
        name: impl Into<String>,
        roots: impl IntoIterator<Item = impl Into<PathBuf>>,
    ) -> Self {
        Self::with_resolver(name, Arc::new(ClasspathContentResolver::with_roots(roots)))
    }

    fn with_resolver(name: impl Into<String>, classpath: Arc<ClasspathContentResolver>) -> Self {
        let base = ConnectorBase::new(name);
        let union = Arc::new(UnionContentResolver::with_resolver(classpath.clone()));
        base.set_content_resolver(union.clone());
        Self {
            base,
            classpath,
            union,
        }
    }

    /// Attaches an object resolver.
    pub fn with_object_resolver(self, resolver: Arc<dyn ObjectResolver>) -> Self {
        self.base.set_object_resolver(resolver);
        self
    }

    /// Attaches a custom content resolver behind the resource-path resolver.
    pub fn with_content_resolver(self, resolver: Arc<dyn ContentResolver>) -> Self {
        self.union.add_content_resolver(resolver);
        self
    }
}

impl Connector for ClasspathConnector {
    fn name(&self) -> &str {
        self.base.name()
    }

    fn kind(&self) -> &'static str {
        CLASSPATH_CONNECTOR_KIND
    }

    fn get_string(&self, key: &str) -> Option<String> {
        let content = self.classpath.get_content(key)?;
        match String::from_utf8(content) {
            Ok(value) => Some(value),
            Err(e) => {
                info!("resource under key '{}' is not valid UTF-8: {}", key, e);
                None
            }
        }
    }

    fn get_content(&self, key: &str) -> Option<Vec<u8>> {
        self.classpath.get_content(key)
    }

    fn get_object(&self, key: &str) -> Option<ObjectValue> {
        let object_resolver = self.base.object_resolver()?;
        object_resolver.get_object(key, &*self.union)
    }
}
