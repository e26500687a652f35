// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core types and business rules.
//!
//! This module holds the types every other layer builds on: the error type,
//! the write status code, the key-admission filter, the sidecar properties
//! codec, and the dynamically typed object value.

pub mod errors;
pub mod filter;
pub mod object;
pub mod properties;
pub mod status;

pub use errors::{Result, SettingsError};
pub use filter::KeyFilter;
pub use object::{object, ObjectValue};
pub use status::SetStatus;
