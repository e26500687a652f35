// SPDX-License-Identifier: MIT OR Apache-2.0

//! Filesystem connector.

use crate::adapters::connector::base::ConnectorBase;
use crate::adapters::content_resolver::{FsContentResolver, UnionContentResolver};
use crate::domain::{ObjectValue, Result, SetStatus};
use crate::ports::{Connector, ContentResolver, ObjectResolver};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// The kind identifier of [`FsConnector`].
pub const FS_CONNECTOR_KIND: &str = "fs";

/// A read-write connector over a filesystem root folder.
///
/// Strings are the UTF-8 decoding of the stored content. Custom content
/// resolvers attach *behind* the filesystem resolver in a union, so the
/// connector's own storage keeps priority while the attached object
/// resolver can still read foreign content.
pub struct FsConnector {
    base: ConnectorBase,
    fs: Arc<FsContentResolver>,
    union: Arc<UnionContentResolver>,
}

impl FsConnector {
    /// Creates a connector rooted at the given folder, creating it if
    /// needed.
    pub fn new(name: impl Into<String>, root_folder: impl Into<PathBuf>) -> Result<Self> {
        let base = ConnectorBase::new(name);
        let fs = Arc::new(FsContentResolver::new(root_folder)?);
        let union = Arc::new(UnionContentResolver::with_resolver(fs.clone()));
        base.set_content_resolver(union.clone());
        Ok(Self { base, fs, union })
    }

    /// Attaches an object resolver.
    pub fn with_object_resolver(self, resolver: Arc<dyn ObjectResolver>) -> Self {
        self.base.set_object_resolver(resolver);
        self
    }

    /// Attaches a custom content resolver behind the filesystem resolver.
    pub fn with_content_resolver(self, resolver: Arc<dyn ContentResolver>) -> Self {
        self.union.add_content_resolver(resolver);
        self
    }

    /// Returns the root folder content is stored under.
    pub fn root_folder(&self) -> &Path {
        self.fs.root_folder()
    }
}

impl Connector for FsConnector {
    fn name(&self) -> &str {
        self.base.name()
    }

    fn kind(&self) -> &'static str {
        FS_CONNECTOR_KIND
    }

    fn get_string(&self, key: &str) -> Option<String> {
        let content = self.fs.get_content(key)?;
        match String::from_utf8(content) {
            Ok(value) => Some(value),
            Err(e) => {
                info!("content under key '{}' is not valid UTF-8: {}", key, e);
                None
            }
        }
    }

    fn get_content(&self, key: &str) -> Option<Vec<u8>> {
        self.fs.get_content(key)
    }

    fn get_object(&self, key: &str) -> Option<ObjectValue> {
        let object_resolver = self.base.object_resolver()?;
        object_resolver.get_object(key, &*self.union)
    }

    fn set_string(&self, key: &str, value: &str) -> Result<SetStatus> {
        self.fs.set_content(key, value.as_bytes())
    }

    fn set_content(&self, key: &str, value: &[u8]) -> Result<SetStatus> {
        self.fs.set_content(key, value)
    }

    fn set_object(&self, key: &str, value: ObjectValue) -> Result<SetStatus> {
        match self.base.object_resolver() {
            Some(object_resolver) => object_resolver.set_object(key, &*self.union, value),
            None => Ok(SetStatus::NotPossible),
        }
    }
}
