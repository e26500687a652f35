// SPDX-License-Identifier: MIT OR Apache-2.0

//! Decorators for content resolvers.

use crate::domain::{KeyFilter, Result, SetStatus};
use crate::ports::ContentResolver;
use std::sync::Arc;

/// Forces a wrapped content resolver to be read-only.
///
/// Reads pass through; every write reports
/// [`SetStatus::NotPossible`] without touching the delegate.
pub struct ReadOnlyContentResolverWrapper {
    target: Arc<dyn ContentResolver>,
}

impl ReadOnlyContentResolverWrapper {
    /// Wraps the given resolver.
    pub fn new(target: Arc<dyn ContentResolver>) -> Self {
        Self { target }
    }
}

impl ContentResolver for ReadOnlyContentResolverWrapper {
    fn get_content(&self, key: &str) -> Option<Vec<u8>> {
        self.target.get_content(key)
    }

    fn set_content(&self, _key: &str, _value: &[u8]) -> Result<SetStatus> {
        Ok(SetStatus::NotPossible)
    }
}

/// Gates a wrapped content resolver through a [`KeyFilter`].
///
/// A call for a key outside the filter short-circuits to absent /
/// not-possible without reaching the wrapped target.
pub struct FilteredContentResolverWrapper {
    target: Arc<dyn ContentResolver>,
    filter: KeyFilter,
}

impl FilteredContentResolverWrapper {
    /// Wraps the given resolver behind the given filter.
    pub fn new(target: Arc<dyn ContentResolver>, filter: KeyFilter) -> Self {
        Self { target, filter }
    }
}

impl ContentResolver for FilteredContentResolverWrapper {
    fn get_content(&self, key: &str) -> Option<Vec<u8>> {
        if !self.filter.is_valid(key) {
            return None;
        }
        self.target.get_content(key)
    }

    fn set_content(&self, key: &str, value: &[u8]) -> Result<SetStatus> {
        if !self.filter.is_valid(key) {
            return Ok(SetStatus::NotPossible);
        }
        self.target.set_content(key, value)
    }
}
