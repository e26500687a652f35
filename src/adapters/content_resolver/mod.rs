// SPDX-License-Identifier: MIT OR Apache-2.0

//! Content resolver implementations.

pub mod classpath;
pub mod fs;
pub mod union;
pub mod wrappers;

pub use classpath::{ClasspathContentResolver, CLASSPATH_URL_PREFIX};
pub use fs::{FsContentResolver, FILE_URL_PREFIX};
pub use union::UnionContentResolver;
pub use wrappers::{FilteredContentResolverWrapper, ReadOnlyContentResolverWrapper};
