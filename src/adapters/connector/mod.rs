// SPDX-License-Identifier: MIT OR Apache-2.0

//! Connector implementations.

pub mod base;
pub mod classpath;
pub mod context;
pub mod environment;
pub mod fs;
pub mod preferences;
pub mod properties;
pub mod store;
pub mod wrappers;

pub use base::ConnectorBase;
pub use classpath::{ClasspathConnector, CLASSPATH_CONNECTOR_KIND};
pub use context::{ContextConnector, ContextValue, NamingContext, CONTEXT_CONNECTOR_KIND};
pub use environment::{EnvironmentConnector, ENVIRONMENT_CONNECTOR_KIND};
pub use fs::{FsConnector, FS_CONNECTOR_KIND};
pub use preferences::{PreferencesConnector, PREFERENCES_CONNECTOR_KIND};
pub use properties::{PropertiesConnector, PROPERTIES_CONNECTOR_KIND};
pub use store::{
    InMemoryStore, SettingsRecord, SettingsStore, StoreConnector, STORE_CONNECTOR_KIND,
};
pub use wrappers::{
    CachedConnectorWrapper, ContentChangeNotifierWrapper, FilteredConnectorWrapper,
    ReadOnlyConnectorWrapper, CACHED_WRAPPER_KIND, FILTERED_WRAPPER_KIND, NOTIFIER_WRAPPER_KIND,
    READ_ONLY_WRAPPER_KIND,
};
