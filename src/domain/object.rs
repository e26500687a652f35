// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dynamically typed object values.
//!
//! Object resolvers produce values whose concrete type depends on the
//! resolver that built them (a JSON document, a named definition out of an
//! assembly, a store record). They are passed around as reference-counted
//! [`Any`] values; callers downcast to the type they expect.

use std::any::Any;
use std::sync::Arc;

/// A shared, dynamically typed object value.
///
/// Cloning is cheap (reference count). Cached objects are handed out as
/// clones of the same allocation, so cache identity is observable through
/// [`Arc::ptr_eq`].
pub type ObjectValue = Arc<dyn Any + Send + Sync>;

/// Wraps a concrete value as an [`ObjectValue`].
///
/// # Examples
///
/// ```rust
/// use cfgchain::domain::object;
///
/// let value = object(vec![1u32, 2, 3]);
/// assert_eq!(value.downcast_ref::<Vec<u32>>().unwrap().len(), 3);
/// ```
pub fn object<T: Any + Send + Sync>(value: T) -> ObjectValue {
    Arc::new(value)
}
