// SPDX-License-Identifier: MIT OR Apache-2.0

//! Positional insertion strategies for connector lists.

use crate::ports::Connector;
use std::sync::Arc;

/// A symbolic position inside an ordered connector list.
///
/// A strategy resolves against the current list to a definite index, or to
/// `None` when it cannot be determined (for example, `After` a name that is
/// not present). The caller decides how to handle the unknown outcome,
/// typically by combining strategies with [`first_valid`] and ending in
/// [`AtLast`](ConnectorPosition::AtLast) as the catch-all.
///
/// [`first_valid`]: ConnectorPosition::first_valid
///
/// # Examples
///
/// ```rust
/// use cfgchain::service::ConnectorPosition;
///
/// let position = ConnectorPosition::first_valid([
///     ConnectorPosition::After("user-settings".to_string()),
///     ConnectorPosition::AtFirst,
/// ]);
/// // Resolves to the slot after "user-settings" when that connector
/// // exists, and to the front of the list otherwise.
/// # let _ = position;
/// ```
#[derive(Debug, Clone)]
pub enum ConnectorPosition {
    /// The front of the list.
    AtFirst,
    /// The end of the list.
    AtLast,
    /// Immediately before the connector with the given name.
    Before(String),
    /// Immediately after the connector with the given name.
    After(String),
    /// Immediately before the first connector of the given kind.
    BeforeFirst(String),
    /// Immediately before the last connector of the given kind.
    BeforeLast(String),
    /// Immediately after the first connector of the given kind.
    AfterFirst(String),
    /// Immediately after the last connector of the given kind.
    AfterLast(String),
    /// The first of the given strategies that resolves to a definite index,
    /// evaluated in the order given.
    FirstValid(Vec<ConnectorPosition>),
}

impl ConnectorPosition {
    /// Builds a [`ConnectorPosition::FirstValid`] from any iterator of
    /// strategies.
    pub fn first_valid(positions: impl IntoIterator<Item = ConnectorPosition>) -> Self {
        ConnectorPosition::FirstValid(positions.into_iter().collect())
    }

    /// Resolves this strategy against the given connector list.
    pub fn resolve(&self, connectors: &[Arc<dyn Connector>]) -> Option<usize> {
        match self {
            ConnectorPosition::AtFirst => Some(0),
            ConnectorPosition::AtLast => Some(connectors.len()),
            ConnectorPosition::Before(name) => {
                connectors.iter().position(|c| c.name() == name)
            }
            ConnectorPosition::After(name) => connectors
                .iter()
                .position(|c| c.name() == name)
                .map(|pos| pos + 1),
            ConnectorPosition::BeforeFirst(kind) => {
                connectors.iter().position(|c| c.kind() == kind)
            }
            ConnectorPosition::AfterFirst(kind) => connectors
                .iter()
                .position(|c| c.kind() == kind)
                .map(|pos| pos + 1),
            ConnectorPosition::BeforeLast(kind) => {
                connectors.iter().rposition(|c| c.kind() == kind)
            }
            ConnectorPosition::AfterLast(kind) => connectors
                .iter()
                .rposition(|c| c.kind() == kind)
                .map(|pos| pos + 1),
            ConnectorPosition::FirstValid(positions) => positions
                .iter()
                .find_map(|position| position.resolve(connectors)),
        }
    }
}
