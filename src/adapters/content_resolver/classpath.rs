// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resource-path content resolver.
//!
//! The read-only counterpart of the classpath lookup in managed runtimes:
//! keys resolve against an ordered list of resource root folders, the first
//! root holding the resource wins.

use crate::ports::ContentResolver;
use once_cell::sync::Lazy;
use std::path::PathBuf;
use tracing::info;

/// Pseudo URL prefix for resource-path keys: `classpath:`.
pub const CLASSPATH_URL_PREFIX: &str = "classpath:";

/// Environment variable holding the default resource path
/// (platform-specific path-separator separated folder list).
pub const RESOURCE_PATH_VAR: &str = "CFGCHAIN_RESOURCE_PATH";

static DEFAULT_RESOURCE_PATH: Lazy<Vec<PathBuf>> = Lazy::new(|| match std::env::var(
    RESOURCE_PATH_VAR,
) {
    Ok(value) => std::env::split_paths(&value).collect(),
    Err(_) => Vec::new(),
});

/// A read-only content resolver over an ordered list of resource roots.
///
/// An optional `classpath:` prefix and a leading `/` are stripped before
/// resolution. Writes are never possible.
#[derive(Debug, Clone)]
pub struct ClasspathContentResolver {
    roots: Vec<PathBuf>,
}

impl ClasspathContentResolver {
    /// Creates a resolver over the default resource path, taken from the
    /// `CFGCHAIN_RESOURCE_PATH` environment variable at first use.
    pub fn new() -> Self {
        Self {
            roots: DEFAULT_RESOURCE_PATH.clone(),
        }
    }

    /// Creates a resolver over the given resource roots.
    pub fn with_roots(roots: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }

    /// Strips the `classpath:` prefix and a leading `/` from a key.
    pub fn normalize_key(key: &str) -> &str {
        let key = key.strip_prefix(CLASSPATH_URL_PREFIX).unwrap_or(key);
        key.strip_prefix('/').unwrap_or(key)
    }
}

impl Default for ClasspathContentResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentResolver for ClasspathContentResolver {
    fn get_content(&self, key: &str) -> Option<Vec<u8>> {
        let normalized = Self::normalize_key(key);
        for root in &self.roots {
            let path = root.join(normalized);
            if !path.exists() {
                continue;
            }
            match std::fs::read(&path) {
                Ok(content) => return Some(content),
                Err(e) => info!("cannot read resource '{}': {}", path.display(), e),
            }
        }
        None
    }
}
