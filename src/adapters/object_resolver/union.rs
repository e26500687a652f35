// SPDX-License-Identifier: MIT OR Apache-2.0

//! First-match-wins union over an ordered list of object resolvers.

use crate::domain::{ObjectValue, Result, SetStatus};
use crate::ports::{ContentResolver, ObjectResolver};
use arc_swap::ArcSwap;
use std::sync::{Arc, Mutex};

/// An ordered chain of object resolvers with first-match-wins semantics for
/// both reads and writes.
///
/// The member list is append-only with the same copy-on-write snapshot
/// behavior as the content resolver union. Caching is a property of the
/// individual member resolvers, not of the union; invalidation notifications
/// fan out to every member.
pub struct UnionObjectResolver {
    members: Mutex<Vec<Arc<dyn ObjectResolver>>>,
    snapshot: ArcSwap<Vec<Arc<dyn ObjectResolver>>>,
}

impl UnionObjectResolver {
    /// Creates an empty union.
    pub fn new() -> Self {
        Self {
            members: Mutex::new(Vec::new()),
            snapshot: ArcSwap::from_pointee(Vec::new()),
        }
    }

    /// Creates a union seeded with a single resolver.
    pub fn with_resolver(resolver: Arc<dyn ObjectResolver>) -> Self {
        let union = Self::new();
        union.add_object_resolver(resolver);
        union
    }

    /// Appends a resolver to the end of the chain.
    pub fn add_object_resolver(&self, resolver: Arc<dyn ObjectResolver>) {
        if let Ok(mut members) = self.members.lock() {
            members.push(resolver);
            self.snapshot.store(Arc::new(members.clone()));
        }
    }
}

impl Default for UnionObjectResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectResolver for UnionObjectResolver {
    fn get_object(
        &self,
        key: &str,
        content_resolver: &dyn ContentResolver,
    ) -> Option<ObjectValue> {
        for resolver in self.snapshot.load().iter() {
            if let Some(result) = resolver.get_object(key, content_resolver) {
                return Some(result);
            }
        }
        None
    }

    fn set_object(
        &self,
        key: &str,
        content_resolver: &dyn ContentResolver,
        value: ObjectValue,
    ) -> Result<SetStatus> {
        for resolver in self.snapshot.load().iter() {
            let status = resolver.set_object(key, content_resolver, value.clone())?;
            if status != SetStatus::NotPossible {
                return Ok(status);
            }
        }
        Ok(SetStatus::NotPossible)
    }

    fn notify_content_has_changed(&self, key: &str) {
        for resolver in self.snapshot.load().iter() {
            resolver.notify_content_has_changed(key);
        }
    }
}
