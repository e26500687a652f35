// SPDX-License-Identifier: MIT OR Apache-2.0

//! Decorators for object resolvers.

use crate::domain::{KeyFilter, ObjectValue, Result, SetStatus};
use crate::ports::{ContentResolver, ObjectResolver};
use std::sync::Arc;

/// Forces a wrapped object resolver to be read-only.
pub struct ReadOnlyObjectResolverWrapper {
    target: Arc<dyn ObjectResolver>,
}

impl ReadOnlyObjectResolverWrapper {
    /// Wraps the given resolver.
    pub fn new(target: Arc<dyn ObjectResolver>) -> Self {
        Self { target }
    }
}

impl ObjectResolver for ReadOnlyObjectResolverWrapper {
    fn get_object(
        &self,
        key: &str,
        content_resolver: &dyn ContentResolver,
    ) -> Option<ObjectValue> {
        self.target.get_object(key, content_resolver)
    }

    fn set_object(
        &self,
        _key: &str,
        _content_resolver: &dyn ContentResolver,
        _value: ObjectValue,
    ) -> Result<SetStatus> {
        Ok(SetStatus::NotPossible)
    }

    fn notify_content_has_changed(&self, key: &str) {
        self.target.notify_content_has_changed(key);
    }
}

/// Gates a wrapped object resolver through a [`KeyFilter`].
pub struct FilteredObjectResolverWrapper {
    target: Arc<dyn ObjectResolver>,
    filter: KeyFilter,
}

impl FilteredObjectResolverWrapper {
    /// Wraps the given resolver behind the given filter.
    pub fn new(target: Arc<dyn ObjectResolver>, filter: KeyFilter) -> Self {
        Self { target, filter }
    }
}

impl ObjectResolver for FilteredObjectResolverWrapper {
    fn get_object(
        &self,
        key: &str,
        content_resolver: &dyn ContentResolver,
    ) -> Option<ObjectValue> {
        if !self.filter.is_valid(key) {
            return None;
        }
        self.target.get_object(key, content_resolver)
    }

    fn set_object(
        &self,
        key: &str,
        content_resolver: &dyn ContentResolver,
        value: ObjectValue,
    ) -> Result<SetStatus> {
        if !self.filter.is_valid(key) {
            return Ok(SetStatus::NotPossible);
        }
        self.target.set_object(key, content_resolver, value)
    }

    fn notify_content_has_changed(&self, key: &str) {
        self.target.notify_content_has_changed(key);
    }
}
