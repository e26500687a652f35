// SPDX-License-Identifier: MIT OR Apache-2.0

//! A chained, multi-backend configuration resolution crate.
//!
//! Given a hierarchical, slash-delimited key (`"com/app/module/param"`),
//! this crate searches an ordered chain of heterogeneous backends
//! ("connectors") and returns the first non-absent value; raw byte content
//! can additionally be converted into typed objects through a second
//! resolver chain described by sidecar metadata.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: core types and rules (`SettingsError`, `SetStatus`,
//!   `KeyFilter`, the sidecar properties codec, `ObjectValue`)
//! - **Ports**: trait definitions that define interfaces (`Connector`,
//!   `ContentResolver`, `ObjectResolver`)
//! - **Adapters**: implementations for specific backends (environment,
//!   property tables, filesystem, resource path, preferences, naming
//!   context, key-value store) plus caching/read-only/filtering decorators
//! - **Service**: the settings instance tree, connector position
//!   strategies, the repository, and the declarative bootstrap configurator
//!
//! # Resolution model
//!
//! A lookup enters a [`Settings`](service::Settings) instance, scans its
//! connector list in insertion order, and — for hierarchical instances —
//! continues into the parent's list when the local list is exhausted. Each
//! connector either answers directly or delegates to its attached
//! content/object resolver chain, which again tries its members in
//! registration order. The first non-absent result anywhere wins.
//!
//! # Quick Start
//!
//! ```rust
//! use cfgchain::adapters::connector::PropertiesConnector;
//! use cfgchain::service::Settings;
//! use std::collections::HashMap;
//! use std::sync::Arc;
//!
//! # fn main() -> cfgchain::domain::Result<()> {
//! let mut table = HashMap::new();
//! table.insert("com/app/db/url".to_string(), "postgres://localhost".to_string());
//!
//! let settings = Settings::new("root");
//! settings.add_connector(Arc::new(
//!     PropertiesConnector::new("app-props").with_table(table),
//! ))?;
//!
//! assert_eq!(
//!     settings.get_string("com/app/db/url"),
//!     Some("postgres://localhost".to_string()),
//! );
//! assert_eq!(settings.get_string("com/app/missing"), None);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for
/// convenient access.
pub mod prelude {
    pub use crate::domain::{object, KeyFilter, ObjectValue, Result, SetStatus, SettingsError};
    pub use crate::ports::{Connector, ContentResolver, ObjectResolver};
    pub use crate::service::{
        Configurator, ConnectorPosition, Settings, SettingsHierarchy, SettingsRepository,
        YamlConfigurator,
    };

    pub use crate::adapters::connector::{
        CachedConnectorWrapper, ClasspathConnector, ContextConnector, EnvironmentConnector,
        FilteredConnectorWrapper, FsConnector, NamingContext, PreferencesConnector,
        PropertiesConnector, ReadOnlyConnectorWrapper, StoreConnector,
    };
    pub use crate::adapters::content_resolver::{
        ClasspathContentResolver, FsContentResolver, UnionContentResolver,
    };
    pub use crate::adapters::object_resolver::{
        JsonObjectResolver, UnionObjectResolver, YamlAssemblyObjectResolver,
    };
}
