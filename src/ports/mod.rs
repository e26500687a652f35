// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! These traits define the interfaces between the resolution core and the
//! concrete backends in the adapters layer: [`Connector`] for top-level
//! lookups, [`ContentResolver`] for raw byte content, [`ObjectResolver`]
//! for typed objects.

pub mod connector;
pub mod content_resolver;
pub mod object_resolver;

pub use connector::Connector;
pub use content_resolver::ContentResolver;
pub use object_resolver::ObjectResolver;
