// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the settings crate.
//!
//! Absence of a value is never an error in this crate: lookups return
//! [`Option`] and a miss simply lets the chain continue. The error type below
//! covers the remaining cases — invalid registration input, rejected
//! configuration, and backend write faults that must reach the caller.

use thiserror::Error;

/// The main error type for settings operations.
///
/// Marked `#[non_exhaustive]` to allow new variants without breaking
/// backwards compatibility.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SettingsError {
    /// A filter pattern failed to compile at registration time.
    ///
    /// Pattern compilation failure is reported, not treated as "no filter".
    #[error("cannot compile filter pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The pattern that failed to compile.
        pattern: String,
        /// The underlying regex error.
        #[source]
        source: regex::Error,
    },

    /// A connector with the same name is already registered.
    #[error("a connector with the name '{name}' already exists")]
    DuplicateConnector {
        /// The offending connector name.
        name: String,
    },

    /// A positional insertion request did not resolve to a definite index.
    ///
    /// Callers decide how to handle this, typically by falling back to a
    /// plain append.
    #[error("no valid position found to add the given connector")]
    NoValidPosition,

    /// The requested operation is not supported by this component.
    #[error("{component} does not support {operation}")]
    Unsupported {
        /// The component that rejected the call.
        component: &'static str,
        /// The rejected operation.
        operation: &'static str,
    },

    /// A sidecar properties resource or configuration document is malformed.
    #[error("failed to parse {what}: {message}")]
    Parse {
        /// What was being parsed.
        what: &'static str,
        /// The error message.
        message: String,
    },

    /// A backing store could not persist a value.
    ///
    /// Surfaced to the caller instead of being swallowed: silent data loss
    /// on write is unacceptable.
    #[error("store error for key '{key}': {message}")]
    Store {
        /// The key being written.
        key: String,
        /// The error message.
        message: String,
        /// The underlying error, if any.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;
