// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing concrete backend implementations.
//!
//! Each submodule implements one of the ports: connectors for top-level
//! lookups, content resolvers for raw bytes, object resolvers for typed
//! objects.

pub mod connector;
pub mod content_resolver;
pub mod object_resolver;
