// SPDX-License-Identifier: MIT OR Apache-2.0

//! Declarative YAML bootstrap configuration.
//!
//! The conventional configuration resource describes the connector list of
//! the root settings instance:
//!
//! ```yaml
//! connectors:
//!   - kind: environment
//!     name: env
//!   - kind: properties
//!     name: app-props
//!     params:
//!       path: "classpath:app.properties"
//!     cached: true
//!     filter:
//!       include: ["com/app/.*"]
//!   - kind: fs
//!     name: local-fs
//!     params:
//!       root: "./config"
//!     content-resolver: shared-fs
//!     object-resolver: json
//! content-resolvers:
//!   shared-fs:
//!     kind: fs
//!     params:
//!       root: "/var/lib/app"
//! object-resolvers:
//!   json:
//!     kind: json
//!     cached: true
//! mapping:
//!   com/app/alias: com/app/real
//! ```
//!
//! A connector entry that cannot be built is reported and skipped; the
//! component degrades to contributing nothing rather than aborting the
//! whole configuration.

use crate::adapters::connector::{
    CachedConnectorWrapper, ClasspathConnector, EnvironmentConnector, FilteredConnectorWrapper,
    FsConnector, PreferencesConnector, PropertiesConnector, ReadOnlyConnectorWrapper,
};
use crate::adapters::content_resolver::{ClasspathContentResolver, FsContentResolver};
use crate::adapters::object_resolver::{JsonObjectResolver, YamlAssemblyObjectResolver};
use crate::domain::{KeyFilter, Result, SettingsError};
use crate::ports::{Connector, ContentResolver, ObjectResolver};
use crate::service::repository::{Configurator, SettingsRepository};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

/// The conventional primary configuration resource.
pub const DEFAULT_CONFIGURATION_RESOURCE: &str = "cfgchain.yaml";

/// The conventional fallback configuration resource.
pub const DEFAULT_FALLBACK_RESOURCE: &str = "cfgchain/default.yaml";

#[derive(Debug, Deserialize)]
struct ConfigDocument {
    #[serde(default)]
    connectors: Vec<ConnectorDecl>,
    #[serde(default)]
    mapping: HashMap<String, String>,
    #[serde(rename = "content-resolvers", default)]
    content_resolvers: HashMap<String, ResolverDecl>,
    #[serde(rename = "object-resolvers", default)]
    object_resolvers: HashMap<String, ResolverDecl>,
}

#[derive(Debug, Deserialize)]
struct ConnectorDecl {
    kind: String,
    name: String,
    #[serde(default)]
    params: HashMap<String, String>,
    #[serde(default)]
    readonly: bool,
    #[serde(default)]
    cached: bool,
    #[serde(default)]
    filter: Option<FilterDecl>,
    #[serde(rename = "content-resolver", default)]
    content_resolver: Option<String>,
    #[serde(rename = "object-resolver", default)]
    object_resolver: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FilterDecl {
    #[serde(default)]
    include: Vec<String>,
    #[serde(default)]
    exclude: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ResolverDecl {
    kind: String,
    #[serde(default)]
    params: HashMap<String, String>,
    #[serde(default)]
    cached: bool,
}

enum ConfigSource {
    Inline(String),
    Resource {
        resolver: Arc<dyn ContentResolver>,
        resource: String,
    },
}

/// A [`Configurator`] reading the declarative YAML format.
pub struct YamlConfigurator {
    source: ConfigSource,
}

impl YamlConfigurator {
    /// Creates a configurator over an inline YAML document.
    pub fn from_yaml(yaml: impl Into<String>) -> Self {
        Self {
            source: ConfigSource::Inline(yaml.into()),
        }
    }

    /// Creates a configurator reading the named resource through the given
    /// content resolver at configuration time.
    pub fn from_resource(resolver: Arc<dyn ContentResolver>, resource: impl Into<String>) -> Self {
        Self {
            source: ConfigSource::Resource {
                resolver,
                resource: resource.into(),
            },
        }
    }

    fn document(&self) -> Result<ConfigDocument> {
        let text = match &self.source {
            ConfigSource::Inline(yaml) => yaml.clone(),
            ConfigSource::Resource { resolver, resource } => {
                let bytes =
                    resolver
                        .get_content(resource)
                        .ok_or_else(|| SettingsError::Parse {
                            what: "configuration",
                            message: format!("configuration resource '{resource}' not found"),
                        })?;
                String::from_utf8(bytes).map_err(|e| SettingsError::Parse {
                    what: "configuration",
                    message: e.to_string(),
                })?
            }
        };
        serde_yaml::from_str(&text).map_err(|e| SettingsError::Parse {
            what: "configuration",
            message: e.to_string(),
        })
    }

    fn build_content_resolver(decl: &ResolverDecl) -> Option<Arc<dyn ContentResolver>> {
        match decl.kind.as_str() {
            "fs" => {
                let root = decl.params.get("root").map(String::as_str).unwrap_or(".");
                match FsContentResolver::new(root) {
                    Ok(resolver) => Some(Arc::new(resolver)),
                    Err(e) => {
                        warn!("cannot build fs content resolver for root '{}': {}", root, e);
                        None
                    }
                }
            }
            "classpath" => Some(Arc::new(match decl.params.get("roots") {
                Some(roots) => ClasspathContentResolver::with_roots(roots.split(',')),
                None => ClasspathContentResolver::new(),
            })),
            other => {
                warn!("unknown content resolver kind '{}'", other);
                None
            }
        }
    }

    fn build_object_resolver(decl: &ResolverDecl) -> Option<Arc<dyn ObjectResolver>> {
        match decl.kind.as_str() {
            "json" => Some(Arc::new(if decl.cached {
                JsonObjectResolver::cached()
            } else {
                JsonObjectResolver::new()
            })),
            "yaml-assembly" => Some(Arc::new(if decl.cached {
                YamlAssemblyObjectResolver::cached()
            } else {
                YamlAssemblyObjectResolver::new()
            })),
            other => {
                warn!("unknown object resolver kind '{}'", other);
                None
            }
        }
    }

    fn build_connector(
        decl: &ConnectorDecl,
        content_resolvers: &HashMap<String, Arc<dyn ContentResolver>>,
        object_resolvers: &HashMap<String, Arc<dyn ObjectResolver>>,
    ) -> Option<Arc<dyn Connector>> {
        let content_resolver = match &decl.content_resolver {
            Some(reference) => match content_resolvers.get(reference) {
                Some(resolver) => Some(resolver.clone()),
                None => {
                    warn!(
                        "connector '{}' references unknown content resolver '{}'",
                        decl.name, reference
                    );
                    return None;
                }
            },
            None => None,
        };
        let object_resolver = match &decl.object_resolver {
            Some(reference) => match object_resolvers.get(reference) {
                Some(resolver) => Some(resolver.clone()),
                None => {
                    warn!(
                        "connector '{}' references unknown object resolver '{}'",
                        decl.name, reference
                    );
                    return None;
                }
            },
            None => None,
        };

        let connector: Arc<dyn Connector> = match decl.kind.as_str() {
            "environment" => {
                let mut connector = EnvironmentConnector::new(&decl.name);
                if let Some(resolver) = content_resolver {
                    connector = connector.with_content_resolver(resolver);
                }
                if let Some(resolver) = object_resolver {
                    connector = connector.with_object_resolver(resolver);
                }
                Arc::new(connector)
            }
            "properties" => {
                let mut connector = PropertiesConnector::new(&decl.name)
                    .resolve_relative_paths(decl.params.contains_key("resolve-relative-paths"));
                if let Some(resolver) = content_resolver {
                    connector = connector.with_content_resolver(resolver);
                }
                if let Some(resolver) = object_resolver {
                    connector = connector.with_object_resolver(resolver);
                }
                if let Some(path) = decl.params.get("path") {
                    if let Err(e) = connector.load_from_path(path) {
                        warn!("cannot load properties for connector '{}': {}", decl.name, e);
                        return None;
                    }
                }
                Arc::new(connector)
            }
            "fs" => {
                let root = decl.params.get("root").map(String::as_str).unwrap_or(".");
                let mut connector = match FsConnector::new(&decl.name, root) {
                    Ok(connector) => connector,
                    Err(e) => {
                        warn!("cannot build fs connector '{}': {}", decl.name, e);
                        return None;
                    }
                };
                if let Some(resolver) = content_resolver {
                    connector = connector.with_content_resolver(resolver);
                }
                if let Some(resolver) = object_resolver {
                    connector = connector.with_object_resolver(resolver);
                }
                Arc::new(connector)
            }
            "classpath" => {
                let mut connector = match decl.params.get("roots") {
                    Some(roots) => ClasspathConnector::with_roots(&decl.name, roots.split(',')),
                    None => ClasspathConnector::new(&decl.name),
                };
                if let Some(resolver) = content_resolver {
                    connector = connector.with_content_resolver(resolver);
                }
                if let Some(resolver) = object_resolver {
                    connector = connector.with_object_resolver(resolver);
                }
                Arc::new(connector)
            }
            "preferences" => {
                let mut connector = PreferencesConnector::new(&decl.name);
                if let Some(resolver) = content_resolver {
                    connector = connector.with_content_resolver(resolver);
                }
                if let Some(resolver) = object_resolver {
                    connector = connector.with_object_resolver(resolver);
                }
                Arc::new(connector)
            }
            other => {
                warn!("unknown connector kind '{}' for '{}'", other, decl.name);
                return None;
            }
        };

        let connector = Self::wrap(connector, decl)?;
        connector.init();
        Some(connector)
    }

    fn wrap(mut connector: Arc<dyn Connector>, decl: &ConnectorDecl) -> Option<Arc<dyn Connector>> {
        if decl.readonly {
            connector = Arc::new(ReadOnlyConnectorWrapper::new(connector));
        }
        if decl.cached {
            connector = Arc::new(CachedConnectorWrapper::new(connector));
        }
        if let Some(filter_decl) = &decl.filter {
            let mut filter = KeyFilter::new();
            for pattern in &filter_decl.include {
                if let Err(e) = filter.add_include(pattern) {
                    warn!("invalid filter pattern on connector '{}': {}", decl.name, e);
                    return None;
                }
            }
            for pattern in &filter_decl.exclude {
                if let Err(e) = filter.add_exclude(pattern) {
                    warn!("invalid filter pattern on connector '{}': {}", decl.name, e);
                    return None;
                }
            }
            connector = Arc::new(FilteredConnectorWrapper::new(connector, filter));
        }
        Some(connector)
    }
}

impl Configurator for YamlConfigurator {
    fn configure(&self, repository: &SettingsRepository) -> Result<()> {
        let document = self.document()?;
        let root = repository.root();

        let content_resolvers: HashMap<String, Arc<dyn ContentResolver>> = document
            .content_resolvers
            .iter()
            .filter_map(|(name, decl)| {
                Self::build_content_resolver(decl).map(|resolver| (name.clone(), resolver))
            })
            .collect();
        let object_resolvers: HashMap<String, Arc<dyn ObjectResolver>> = document
            .object_resolvers
            .iter()
            .filter_map(|(name, decl)| {
                Self::build_object_resolver(decl).map(|resolver| (name.clone(), resolver))
            })
            .collect();

        for decl in &document.connectors {
            let Some(connector) =
                Self::build_connector(decl, &content_resolvers, &object_resolvers)
            else {
                continue;
            };
            if let Err(e) = root.add_connector(connector) {
                warn!("cannot register connector '{}': {}", decl.name, e);
            }
        }

        if !document.mapping.is_empty() {
            root.set_mapping(document.mapping);
        }
        Ok(())
    }
}

/// Builds the conventional repository: the primary configuration resource
/// on the resource path, with the fallback resource behind it.
pub fn default_repository() -> SettingsRepository {
    let resolver: Arc<dyn ContentResolver> = Arc::new(ClasspathContentResolver::new());
    let primary = YamlConfigurator::from_resource(resolver.clone(), DEFAULT_CONFIGURATION_RESOURCE);
    let fallback = YamlConfigurator::from_resource(resolver, DEFAULT_FALLBACK_RESOURCE);
    SettingsRepository::bootstrap(Some(&primary), Some(Arc::new(fallback)))
}
