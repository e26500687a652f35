// SPDX-License-Identifier: MIT OR Apache-2.0

//! Content resolver trait definition.
//!
//! A content resolver turns a hierarchical key into raw byte content. It is
//! both the backend abstraction for byte lookups and the unit that resolver
//! chains are built from.

use crate::domain::{Result, SetStatus};

/// A provider of raw byte content for hierarchical keys.
///
/// Implementations must be `Send + Sync`; lookups may be issued from
/// concurrent callers and every operation is a synchronous, potentially
/// blocking call executed on the caller's thread.
///
/// # Absence and faults
///
/// A miss is `None`, never an error. Backend read faults (I/O errors and the
/// like) are caught inside the implementation, logged, and converted to
/// `None` so that a chain can continue with its next member.
///
/// # Examples
///
/// ```rust
/// use cfgchain::ports::ContentResolver;
/// use cfgchain::domain::{Result, SetStatus};
///
/// struct StaticResolver;
///
/// impl ContentResolver for StaticResolver {
///     fn get_content(&self, key: &str) -> Option<Vec<u8>> {
///         (key == "greeting").then(|| b"hello".to_vec())
///     }
///
///     fn set_content(&self, _key: &str, _value: &[u8]) -> Result<SetStatus> {
///         Ok(SetStatus::NotPossible)
///     }
/// }
///
/// let resolver = StaticResolver;
/// assert_eq!(resolver.get_content("greeting"), Some(b"hello".to_vec()));
/// assert_eq!(resolver.get_content("other"), None);
/// ```
pub trait ContentResolver: Send + Sync {
    /// Returns the byte content stored under `key`, or `None` if this
    /// resolver holds nothing for it.
    fn get_content(&self, key: &str) -> Option<Vec<u8>>;

    /// Stores byte content under `key`.
    ///
    /// Returns `Ok(SetStatus::NotPossible)` if this resolver cannot accept
    /// the write (read-only backend, filtered-out key). Read-only resolvers
    /// can rely on the default implementation.
    fn set_content(&self, _key: &str, _value: &[u8]) -> Result<SetStatus> {
        Ok(SetStatus::NotPossible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ReadOnly;

    impl ContentResolver for ReadOnly {
        fn get_content(&self, _key: &str) -> Option<Vec<u8>> {
            None
        }
    }

    #[test]
    fn test_default_set_content_not_possible() {
        let resolver = ReadOnly;
        let status = resolver.set_content("key", b"value").unwrap();
        assert_eq!(status, SetStatus::NotPossible);
    }

    #[test]
    fn test_content_resolver_is_object_safe() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Box<dyn ContentResolver>>();
    }
}
