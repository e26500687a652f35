// SPDX-License-Identifier: MIT OR Apache-2.0

//! Include/exclude key-admission filter.
//!
//! A [`KeyFilter`] decides whether a key may be answered by a wrapped
//! connector or resolver at all. Queries outside the declared namespace are
//! rejected transparently (absent / not possible) without reaching the
//! wrapped target.

use crate::domain::errors::{Result, SettingsError};
use regex::Regex;

/// A predicate over key strings built from ordered include and exclude
/// pattern lists.
///
/// Patterns must match the *whole* key. The decision algorithm:
///
/// 1. If any exclude pattern matches, the key is rejected.
/// 2. Otherwise, if no include patterns are registered, the key is accepted.
/// 3. Otherwise the key is accepted iff any include pattern matches.
///
/// Exclude takes precedence over include when both match.
///
/// # Examples
///
/// ```rust
/// use cfgchain::domain::KeyFilter;
///
/// # fn main() -> cfgchain::domain::Result<()> {
/// let filter = KeyFilter::new().include("com/app/.*")?;
/// assert!(filter.is_valid("com/app/db/url"));
/// assert!(!filter.is_valid("org/other/key"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct KeyFilter {
    include_patterns: Vec<Regex>,
    exclude_patterns: Vec<Regex>,
}

impl KeyFilter {
    /// Creates an empty filter that accepts every key.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an include pattern, consuming and returning the filter.
    ///
    /// A pattern that fails to compile is reported as
    /// [`SettingsError::InvalidPattern`] rather than being silently ignored.
    pub fn include(mut self, pattern: &str) -> Result<Self> {
        self.add_include(pattern)?;
        Ok(self)
    }

    /// Appends an exclude pattern, consuming and returning the filter.
    pub fn exclude(mut self, pattern: &str) -> Result<Self> {
        self.add_exclude(pattern)?;
        Ok(self)
    }

    /// Appends an include pattern.
    pub fn add_include(&mut self, pattern: &str) -> Result<()> {
        self.include_patterns.push(compile(pattern)?);
        Ok(())
    }

    /// Appends an exclude pattern.
    pub fn add_exclude(&mut self, pattern: &str) -> Result<()> {
        self.exclude_patterns.push(compile(pattern)?);
        Ok(())
    }

    /// Returns `true` if the given key passes the filter.
    pub fn is_valid(&self, key: &str) -> bool {
        // An exclude match always wins.
        for pattern in &self.exclude_patterns {
            if pattern.is_match(key) {
                return false;
            }
        }
        if self.include_patterns.is_empty() {
            return true;
        }
        for pattern in &self.include_patterns {
            if pattern.is_match(key) {
                return true;
            }
        }
        false
    }
}

/// Compiles a pattern anchored to the full key.
fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(&format!("^(?:{pattern})$")).map_err(|source| SettingsError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}
