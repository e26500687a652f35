// SPDX-License-Identifier: MIT OR Apache-2.0

//! First-match-wins union over an ordered list of content resolvers.

use crate::domain::{Result, SetStatus};
use crate::ports::ContentResolver;
use arc_swap::ArcSwap;
use std::sync::{Arc, Mutex};

/// An ordered chain of content resolvers with first-match-wins semantics.
///
/// Registration order is the resolution priority order and is monotonic:
/// the member list is append-only. Appends happen under a writer mutex and
/// publish a fresh snapshot array; readers iterate the current snapshot
/// without locking and observe either the pre- or post-append list, never a
/// partial one.
///
/// # Examples
///
/// ```rust
/// use cfgchain::adapters::content_resolver::UnionContentResolver;
/// use cfgchain::ports::ContentResolver;
/// use std::sync::Arc;
///
/// let union = UnionContentResolver::new();
/// assert_eq!(union.get_content("anything"), None);
/// ```
pub struct UnionContentResolver {
    members: Mutex<Vec<Arc<dyn ContentResolver>>>,
    snapshot: ArcSwap<Vec<Arc<dyn ContentResolver>>>,
}

impl UnionContentResolver {
    /// Creates an empty union.
    pub fn new() -> Self {
        Self {
            members: Mutex::new(Vec::new()),
            snapshot: ArcSwap::from_pointee(Vec::new()),
        }
    }

    /// Creates a union seeded with a single resolver.
    pub fn with_resolver(resolver: Arc<dyn ContentResolver>) -> Self {
        let union = Self::new();
        union.add_content_resolver(resolver);
        union
    }

    /// Appends a resolver to the end of the chain.
    pub fn add_content_resolver(&self, resolver: Arc<dyn ContentResolver>) {
        if let Ok(mut members) = self.members.lock() {
            members.push(resolver);
            self.snapshot.store(Arc::new(members.clone()));
        }
    }

    /// Returns the current number of chain members.
    pub fn len(&self) -> usize {
        self.snapshot.load().len()
    }

    /// Returns `true` if the chain has no members.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for UnionContentResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentResolver for UnionContentResolver {
    fn get_content(&self, key: &str) -> Option<Vec<u8>> {
        for resolver in self.snapshot.load().iter() {
            if let Some(content) = resolver.get_content(key) {
                return Some(content);
            }
        }
        None
    }

    fn set_content(&self, key: &str, value: &[u8]) -> Result<SetStatus> {
        // The first member willing to accept the write wins; members that
        // report NotPossible are skipped.
        for resolver in self.snapshot.load().iter() {
            let status = resolver.set_content(key, value)?;
            if status != SetStatus::NotPossible {
                return Ok(status);
            }
        }
        Ok(SetStatus::NotPossible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::RwLock;

    struct MapResolver {
        values: RwLock<HashMap<String, Vec<u8>>>,
        writable: bool,
    }

    impl MapResolver {
        fn new(writable: bool) -> Self {
            Self {
                values: RwLock::new(HashMap::new()),
                writable,
            }
        }

        fn with_value(self, key: &str, value: &[u8]) -> Self {
            if let Ok(mut values) = self.values.write() {
                values.insert(key.to_string(), value.to_vec());
            }
            self
        }
    }

    impl ContentResolver for MapResolver {
        fn get_content(&self, key: &str) -> Option<Vec<u8>> {
            self.values.read().ok()?.get(key).cloned()
        }

        fn set_content(&self, key: &str, value: &[u8]) -> Result<SetStatus> {
            if !self.writable {
                return Ok(SetStatus::NotPossible);
            }
            if let Ok(mut values) = self.values.write() {
                values.insert(key.to_string(), value.to_vec());
            }
            Ok(SetStatus::Success)
        }
    }

    #[test]
    fn test_first_match_wins() {
        let union = UnionContentResolver::new();
        union.add_content_resolver(Arc::new(MapResolver::new(false).with_value("k", b"first")));
        union.add_content_resolver(Arc::new(MapResolver::new(false).with_value("k", b"second")));

        assert_eq!(union.get_content("k"), Some(b"first".to_vec()));
    }

    #[test]
    fn test_falls_through_to_later_member() {
        let union = UnionContentResolver::new();
        union.add_content_resolver(Arc::new(MapResolver::new(false)));
        union.add_content_resolver(Arc::new(MapResolver::new(false).with_value("k", b"second")));

        assert_eq!(union.get_content("k"), Some(b"second".to_vec()));
    }

    #[test]
    fn test_miss_returns_none() {
        let union = UnionContentResolver::new();
        union.add_content_resolver(Arc::new(MapResolver::new(false)));
        assert_eq!(union.get_content("missing"), None);
    }

    #[test]
    fn test_set_skips_unwilling_members() {
        let union = UnionContentResolver::new();
        let readonly = Arc::new(MapResolver::new(false));
        let writable = Arc::new(MapResolver::new(true));
        union.add_content_resolver(readonly.clone());
        union.add_content_resolver(writable.clone());

        let status = union.set_content("k", b"v").unwrap();
        assert_eq!(status, SetStatus::Success);
        assert_eq!(readonly.get_content("k"), None);
        assert_eq!(writable.get_content("k"), Some(b"v".to_vec()));
    }

    #[test]
    fn test_set_with_no_writable_member() {
        let union = UnionContentResolver::new();
        union.add_content_resolver(Arc::new(MapResolver::new(false)));
        let status = union.set_content("k", b"v").unwrap();
        assert_eq!(status, SetStatus::NotPossible);
    }

    #[test]
    fn test_registration_order_is_monotonic() {
        let union = UnionContentResolver::new();
        assert!(union.is_empty());
        union.add_content_resolver(Arc::new(MapResolver::new(false)));
        union.add_content_resolver(Arc::new(MapResolver::new(false)));
        assert_eq!(union.len(), 2);
    }
}
