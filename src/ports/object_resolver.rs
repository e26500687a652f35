// SPDX-License-Identifier: MIT OR Apache-2.0

//! Object resolver trait definition.
//!
//! An object resolver converts raw byte content into a typed object and
//! back. Which resolver is responsible for a given key is declared by a
//! sidecar properties resource at `key + ".properties"`, read through the
//! same content resolver as the payload itself:
//!
//! 1. Read `key + ".properties"` through the given [`ContentResolver`].
//! 2. Read the `objectResolverKey` property; it names the resolver
//!    implementation that produced the content.
//! 3. Only the resolver whose own identity key matches converts the payload;
//!    everyone else reports absence. This prevents one resolver from
//!    misinterpreting content written by another.
//! 4. Additional properties (`cached`, `readonly`, resolver-specific
//!    extensions) tune the conversion.

use crate::domain::{ObjectValue, Result, SetStatus};
use crate::ports::ContentResolver;

/// A converter between raw byte content and typed objects.
///
/// # Caching
///
/// Implementations may cache resolved objects per key. A cache entry is
/// only ever removed by [`notify_content_has_changed`]; content changes that
/// bypass the resolver do not invalidate it. This staleness is deliberate —
/// re-validating on every call is exactly what the cache exists to avoid —
/// and callers that mutate content out of band are expected to notify.
///
/// [`notify_content_has_changed`]: ObjectResolver::notify_content_has_changed
pub trait ObjectResolver: Send + Sync {
    /// Resolves the content under `key` into an object, or `None` if the
    /// content is absent, not declared for this resolver, or fails to
    /// convert.
    fn get_object(&self, key: &str, content_resolver: &dyn ContentResolver)
        -> Option<ObjectValue>;

    /// Serializes `value` and writes it as the content under `key`.
    ///
    /// The sidecar properties are consulted first: a `readonly=true`
    /// declaration or a missing/mismatched `objectResolverKey` aborts with
    /// `Ok(SetStatus::NotPossible)`. Read-only resolvers can rely on the
    /// default implementation.
    fn set_object(
        &self,
        _key: &str,
        _content_resolver: &dyn ContentResolver,
        _value: ObjectValue,
    ) -> Result<SetStatus> {
        Ok(SetStatus::NotPossible)
    }

    /// Tells the resolver that the content under `key` has changed behind
    /// its back, dropping any cached object for the key.
    ///
    /// This is the only cache invalidation path. The default implementation
    /// does nothing, for resolvers that do not cache.
    fn notify_content_has_changed(&self, _key: &str) {}
}
