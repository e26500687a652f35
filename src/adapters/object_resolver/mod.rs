// SPDX-License-Identifier: MIT OR Apache-2.0

//! Object resolver implementations.

pub mod core;
pub mod json;
pub mod union;
pub mod wrappers;
pub mod yaml_assembly;

pub use self::core::ResolverCore;
pub use json::{JsonObjectResolver, JSON_RESOLVER_KEY};
pub use union::UnionObjectResolver;
pub use wrappers::{FilteredObjectResolverWrapper, ReadOnlyObjectResolverWrapper};
pub use yaml_assembly::{YamlAssemblyObjectResolver, YAML_ASSEMBLY_RESOLVER_KEY};
