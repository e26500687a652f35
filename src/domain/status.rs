// SPDX-License-Identifier: MIT OR Apache-2.0

//! Status codes for write operations.

/// The outcome of a `set_*` operation on a connector or resolver.
///
/// There are exactly two values: a write either succeeded or was structurally
/// not possible (read-only backend, filtered-out key, no matching resolver).
/// "Not possible" is an expected status, not an error condition; genuine
/// backend faults are reported through
/// [`SettingsError`](crate::domain::SettingsError) instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetStatus {
    /// The value was written.
    Success,
    /// The component cannot accept this write.
    NotPossible,
}

impl SetStatus {
    /// Returns `true` for [`SetStatus::Success`].
    pub fn is_success(self) -> bool {
        matches!(self, SetStatus::Success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_success() {
        assert!(SetStatus::Success.is_success());
        assert!(!SetStatus::NotPossible.is_success());
    }
}
