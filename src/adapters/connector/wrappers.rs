// SPDX-License-Identifier: MIT OR Apache-2.0

//! Decorators for connectors.
//!
//! All wrappers delegate-and-modify and compose by nesting: a connector can
//! be filtered, made read-only and cached at the same time by stacking the
//! corresponding wrappers.

use crate::domain::{KeyFilter, ObjectValue, Result, SetStatus};
use crate::ports::{Connector, ObjectResolver};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// The kind identifier of [`CachedConnectorWrapper`].
pub const CACHED_WRAPPER_KIND: &str = "cached";

/// The kind identifier of [`ReadOnlyConnectorWrapper`].
pub const READ_ONLY_WRAPPER_KIND: &str = "read-only";

/// The kind identifier of [`FilteredConnectorWrapper`].
pub const FILTERED_WRAPPER_KIND: &str = "filtered";

/// The kind identifier of [`ContentChangeNotifierWrapper`].
pub const NOTIFIER_WRAPPER_KIND: &str = "change-notifier";

/// Caches a wrapped connector's lookups.
///
/// The three operations cache independently, keyed by the lookup key, and
/// populate lazily on the first non-absent result. Successful writes update
/// the corresponding cache entry; [`clear_cached_value`] drops a key from
/// all three caches.
///
/// [`clear_cached_value`]: Connector::clear_cached_value
pub struct CachedConnectorWrapper {
    target: Arc<dyn Connector>,
    strings: Mutex<HashMap<String, String>>,
    contents: Mutex<HashMap<String, Vec<u8>>>,
    objects: Mutex<HashMap<String, ObjectValue>>,
}

impl CachedConnectorWrapper {
    /// Wraps the given connector.
    pub fn new(target: Arc<dyn Connector>) -> Self {
        Self {
            target,
            strings: Mutex::new(HashMap::new()),
            contents: Mutex::new(HashMap::new()),
            objects: Mutex::new(HashMap::new()),
        }
    }

    fn cached<T: Clone>(cache: &Mutex<HashMap<String, T>>, key: &str) -> Option<T> {
        cache.lock().ok()?.get(key).cloned()
    }

    fn insert<T>(cache: &Mutex<HashMap<String, T>>, key: &str, value: T) {
        if let Ok(mut cache) = cache.lock() {
            cache.insert(key.to_string(), value);
        }
    }
}

impl Connector for CachedConnectorWrapper {
    fn name(&self) -> &str {
        self.target.name()
    }

    fn kind(&self) -> &'static str {
        CACHED_WRAPPER_KIND
    }

    fn get_string(&self, key: &str) -> Option<String> {
        if let Some(hit) = Self::cached(&self.strings, key) {
            return Some(hit);
        }
        let result = self.target.get_string(key)?;
        Self::insert(&self.strings, key, result.clone());
        Some(result)
    }

    fn get_content(&self, key: &str) -> Option<Vec<u8>> {
        if let Some(hit) = Self::cached(&self.contents, key) {
            return Some(hit);
        }
        let result = self.target.get_content(key)?;
        Self::insert(&self.contents, key, result.clone());
        Some(result)
    }

    fn get_object(&self, key: &str) -> Option<ObjectValue> {
        if let Some(hit) = Self::cached(&self.objects, key) {
            return Some(hit);
        }
        let result = self.target.get_object(key)?;
        Self::insert(&self.objects, key, result.clone());
        Some(result)
    }

    fn set_string(&self, key: &str, value: &str) -> Result<SetStatus> {
        let status = self.target.set_string(key, value)?;
        if status == SetStatus::Success {
            Self::insert(&self.strings, key, value.to_string());
        }
        Ok(status)
    }

    fn set_content(&self, key: &str, value: &[u8]) -> Result<SetStatus> {
        let status = self.target.set_content(key, value)?;
        if status == SetStatus::Success {
            Self::insert(&self.contents, key, value.to_vec());
        }
        Ok(status)
    }

    fn set_object(&self, key: &str, value: ObjectValue) -> Result<SetStatus> {
        let status = self.target.set_object(key, value.clone())?;
        if status == SetStatus::Success {
            Self::insert(&self.objects, key, value);
        }
        Ok(status)
    }

    fn init(&self) {
        self.target.init();
    }

    fn add_connector(&self, connector: Arc<dyn Connector>) -> Result<()> {
        self.target.add_connector(connector)
    }

    fn clear_cached_value(&self, key: &str) {
        if let Ok(mut strings) = self.strings.lock() {
            strings.remove(key);
        }
        if let Ok(mut contents) = self.contents.lock() {
            contents.remove(key);
        }
        if let Ok(mut objects) = self.objects.lock() {
            objects.remove(key);
        }
        self.target.clear_cached_value(key);
    }
}

/// Makes a wrapped connector read-only.
///
/// Every `set_*` short-circuits to [`SetStatus::NotPossible`] without
/// touching the delegate.
pub struct ReadOnlyConnectorWrapper {
    target: Arc<dyn Connector>,
}

impl ReadOnlyConnectorWrapper {
    /// Wraps the given connector.
    pub fn new(target: Arc<dyn Connector>) -> Self {
        Self { target }
    }
}

impl Connector for ReadOnlyConnectorWrapper {
    fn name(&self) -> &str {
        self.target.name()
    }

    fn kind(&self) -> &'static str {
        READ_ONLY_WRAPPER_KIND
    }

    fn get_string(&self, key: &str) -> Option<String> {
        self.target.get_string(key)
    }

    fn get_content(&self, key: &str) -> Option<Vec<u8>> {
        self.target.get_content(key)
    }

    fn get_object(&self, key: &str) -> Option<ObjectValue> {
        self.target.get_object(key)
    }

    fn init(&self) {
        self.target.init();
    }

    fn add_connector(&self, connector: Arc<dyn Connector>) -> Result<()> {
        self.target.add_connector(connector)
    }

    fn clear_cached_value(&self, key: &str) {
        self.target.clear_cached_value(key);
    }
}

/// Gates every operation of a wrapped connector through a [`KeyFilter`].
pub struct FilteredConnectorWrapper {
    target: Arc<dyn Connector>,
    filter: KeyFilter,
}

impl FilteredConnectorWrapper {
    /// Wraps the given connector behind the given filter.
    pub fn new(target: Arc<dyn Connector>, filter: KeyFilter) -> Self {
        Self { target, filter }
    }
}

impl Connector for FilteredConnectorWrapper {
    fn name(&self) -> &str {
        self.target.name()
    }

    fn kind(&self) -> &'static str {
        FILTERED_WRAPPER_KIND
    }

    fn get_string(&self, key: &str) -> Option<String> {
        if !self.filter.is_valid(key) {
            return None;
        }
        self.target.get_string(key)
    }

    fn get_content(&self, key: &str) -> Option<Vec<u8>> {
        if !self.filter.is_valid(key) {
            return None;
        }
        self.target.get_content(key)
    }

    fn get_object(&self, key: &str) -> Option<ObjectValue> {
        if !self.filter.is_valid(key) {
            return None;
        }
        self.target.get_object(key)
    }

    fn set_string(&self, key: &str, value: &str) -> Result<SetStatus> {
        if !self.filter.is_valid(key) {
            return Ok(SetStatus::NotPossible);
        }
        self.target.set_string(key, value)
    }

    fn set_content(&self, key: &str, value: &[u8]) -> Result<SetStatus> {
        if !self.filter.is_valid(key) {
            return Ok(SetStatus::NotPossible);
        }
        self.target.set_content(key, value)
    }

    fn set_object(&self, key: &str, value: ObjectValue) -> Result<SetStatus> {
        if !self.filter.is_valid(key) {
            return Ok(SetStatus::NotPossible);
        }
        self.target.set_object(key, value)
    }

    fn init(&self) {
        self.target.init();
    }

    fn add_connector(&self, connector: Arc<dyn Connector>) -> Result<()> {
        self.target.add_connector(connector)
    }

    fn clear_cached_value(&self, key: &str) {
        self.target.clear_cached_value(key);
    }
}

/// Notifies an object resolver whenever content is successfully written
/// through the wrapped connector, so that its cache entry for the key is
/// invalidated in the same step.
pub struct ContentChangeNotifierWrapper {
    target: Arc<dyn Connector>,
    object_resolver: Arc<dyn ObjectResolver>,
}

impl ContentChangeNotifierWrapper {
    /// Wraps the given connector, notifying the given resolver.
    pub fn new(target: Arc<dyn Connector>, object_resolver: Arc<dyn ObjectResolver>) -> Self {
        Self {
            target,
            object_resolver,
        }
    }
}

impl Connector for ContentChangeNotifierWrapper {
    fn name(&self) -> &str {
        self.target.name()
    }

    fn kind(&self) -> &'static str {
        NOTIFIER_WRAPPER_KIND
    }

    fn get_string(&self, key: &str) -> Option<String> {
        self.target.get_string(key)
    }

    fn get_content(&self, key: &str) -> Option<Vec<u8>> {
        self.target.get_content(key)
    }

    fn get_object(&self, key: &str) -> Option<ObjectValue> {
        self.target.get_object(key)
    }

    fn set_string(&self, key: &str, value: &str) -> Result<SetStatus> {
        self.target.set_string(key, value)
    }

    fn set_content(&self, key: &str, value: &[u8]) -> Result<SetStatus> {
        let status = self.target.set_content(key, value)?;
        if status == SetStatus::Success {
            self.object_resolver.notify_content_has_changed(key);
        }
        Ok(status)
    }

    fn set_object(&self, key: &str, value: ObjectValue) -> Result<SetStatus> {
        self.target.set_object(key, value)
    }

    fn init(&self) {
        self.target.init();
    }

    fn add_connector(&self, connector: Arc<dyn Connector>) -> Result<()> {
        self.target.add_connector(connector)
    }

    fn clear_cached_value(&self, key: &str) {
        self.target.clear_cached_value(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::object;
    use crate::ports::ContentResolver;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::RwLock;

    #[derive(Default)]
    struct RecordingConnector {
        values: RwLock<HashMap<String, String>>,
        get_calls: AtomicUsize,
        set_calls: AtomicUsize,
    }

    impl RecordingConnector {
        fn with_value(self, key: &str, value: &str) -> Self {
            if let Ok(mut values) = self.values.write() {
                values.insert(key.to_string(), value.to_string());
            }
            self
        }
    }

    impl Connector for RecordingConnector {
        fn name(&self) -> &str {
            "recording"
        }

        fn kind(&self) -> &'static str {
            "recording"
        }

        fn get_string(&self, key: &str) -> Option<String> {
            self.get_calls.fetch_add(1, Ordering::SeqCst);
            self.values.read().ok()?.get(key).cloned()
        }

        fn get_content(&self, key: &str) -> Option<Vec<u8>> {
            self.get_calls.fetch_add(1, Ordering::SeqCst);
            self.get_string(key).map(String::into_bytes)
        }

        fn get_object(&self, key: &str) -> Option<ObjectValue> {
            self.get_calls.fetch_add(1, Ordering::SeqCst);
            self.values.read().ok()?.get(key).map(|v| object(v.clone()))
        }

        fn set_string(&self, key: &str, value: &str) -> Result<SetStatus> {
            self.set_calls.fetch_add(1, Ordering::SeqCst);
            if let Ok(mut values) = self.values.write() {
                values.insert(key.to_string(), value.to_string());
            }
            Ok(SetStatus::Success)
        }

        fn set_content(&self, key: &str, value: &[u8]) -> Result<SetStatus> {
            self.set_calls.fetch_add(1, Ordering::SeqCst);
            self.set_string(key, &String::from_utf8_lossy(value))
        }

        fn set_object(&self, _key: &str, _value: ObjectValue) -> Result<SetStatus> {
            self.set_calls.fetch_add(1, Ordering::SeqCst);
            Ok(SetStatus::Success)
        }
    }

    #[test]
    fn test_cached_wrapper_hits_target_once() {
        let inner = Arc::new(RecordingConnector::default().with_value("k", "v"));
        let wrapper = CachedConnectorWrapper::new(inner.clone());

        assert_eq!(wrapper.get_string("k"), Some("v".to_string()));
        assert_eq!(wrapper.get_string("k"), Some("v".to_string()));
        assert_eq!(inner.get_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_cached_wrapper_does_not_cache_misses() {
        let inner = Arc::new(RecordingConnector::default());
        let wrapper = CachedConnectorWrapper::new(inner.clone());

        assert_eq!(wrapper.get_string("missing"), None);
        assert_eq!(wrapper.get_string("missing"), None);
        assert_eq!(inner.get_calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_cached_wrapper_clear_cached_value() {
        let inner = Arc::new(RecordingConnector::default().with_value("k", "v"));
        let wrapper = CachedConnectorWrapper::new(inner.clone());

        wrapper.get_string("k");
        wrapper.clear_cached_value("k");
        wrapper.get_string("k");
        assert_eq!(inner.get_calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_cached_wrapper_serves_stale_value_after_direct_write() {
        let inner = Arc::new(RecordingConnector::default().with_value("k", "old"));
        let wrapper = CachedConnectorWrapper::new(inner.clone());
        wrapper.get_string("k");

        // Write bypassing the wrapper: the cache keeps the old value.
        inner.set_string("k", "new").unwrap();
        assert_eq!(wrapper.get_string("k"), Some("old".to_string()));

        wrapper.clear_cached_value("k");
        assert_eq!(wrapper.get_string("k"), Some("new".to_string()));
    }

    #[test]
    fn test_read_only_wrapper_never_touches_delegate_setters() {
        let inner = Arc::new(RecordingConnector::default().with_value("k", "v"));
        let wrapper = ReadOnlyConnectorWrapper::new(inner.clone());

        assert_eq!(
            wrapper.set_string("k", "x").unwrap(),
            SetStatus::NotPossible
        );
        assert_eq!(
            wrapper.set_content("k", b"x").unwrap(),
            SetStatus::NotPossible
        );
        assert_eq!(
            wrapper.set_object("k", object(1u8)).unwrap(),
            SetStatus::NotPossible
        );
        assert_eq!(inner.set_calls.load(Ordering::SeqCst), 0);
        assert_eq!(wrapper.get_string("k"), Some("v".to_string()));
    }

    #[test]
    fn test_filtered_wrapper_gates_all_operations() {
        let inner = Arc::new(RecordingConnector::default().with_value("com/app/k", "v"));
        let filter = KeyFilter::new().include("com/app/.*").unwrap();
        let wrapper = FilteredConnectorWrapper::new(inner.clone(), filter);

        assert_eq!(wrapper.get_string("com/app/k"), Some("v".to_string()));
        assert_eq!(wrapper.get_string("org/k"), None);
        assert_eq!(
            wrapper.set_string("org/k", "x").unwrap(),
            SetStatus::NotPossible
        );
        assert_eq!(inner.set_calls.load(Ordering::SeqCst), 0);
    }

    struct CountingResolver {
        notifications: AtomicUsize,
    }

    impl crate::ports::ObjectResolver for CountingResolver {
        fn get_object(
            &self,
            _key: &str,
            _content_resolver: &dyn ContentResolver,
        ) -> Option<ObjectValue> {
            None
        }

        fn notify_content_has_changed(&self, _key: &str) {
            self.notifications.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_notifier_wrapper_notifies_on_successful_set_content() {
        let inner = Arc::new(RecordingConnector::default());
        let resolver = Arc::new(CountingResolver {
            notifications: AtomicUsize::new(0),
        });
        let wrapper = ContentChangeNotifierWrapper::new(inner, resolver.clone());

        wrapper.set_content("k", b"v").unwrap();
        assert_eq!(resolver.notifications.load(Ordering::SeqCst), 1);

        // A string write does not touch content, no notification.
        wrapper.set_string("k", "v").unwrap();
        assert_eq!(resolver.notifications.load(Ordering::SeqCst), 1);
    }
}
