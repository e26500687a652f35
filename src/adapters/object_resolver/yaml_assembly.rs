// SPDX-License-Identifier: MIT OR Apache-2.0

//! Declarative-assembly object resolver.

use crate::adapters::object_resolver::core::ResolverCore;
use crate::domain::properties::PROP_BEAN_REF;
use crate::domain::{object, ObjectValue};
use crate::ports::{ContentResolver, ObjectResolver};
use tracing::warn;

/// The identity key written into sidecars for content this resolver owns.
pub const YAML_ASSEMBLY_RESOLVER_KEY: &str = "YamlAssemblyObjectResolver";

/// An object resolver that assembles a value out of a declarative YAML
/// wiring description.
///
/// The content under a key is expected to be a YAML mapping of named
/// definitions. The definition to return is named by the sidecar's
/// `bean-ref` property; without one, the default target name is the lookup
/// key with path separators replaced by namespace separators
/// (`com/app/dataSource` → `com.app.dataSource`).
///
/// Assembly descriptions are external configuration, so this resolver is
/// read-only: `set_object` reports not-possible.
pub struct YamlAssemblyObjectResolver {
    core: ResolverCore,
}

impl YamlAssemblyObjectResolver {
    /// Creates a resolver with default caching off.
    pub fn new() -> Self {
        Self {
            core: ResolverCore::new(YAML_ASSEMBLY_RESOLVER_KEY),
        }
    }

    /// Creates a resolver with resolver-level default caching switched on.
    pub fn cached() -> Self {
        Self {
            core: ResolverCore::new(YAML_ASSEMBLY_RESOLVER_KEY).cached_by_default(true),
        }
    }
}

impl Default for YamlAssemblyObjectResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectResolver for YamlAssemblyObjectResolver {
    fn get_object(
        &self,
        key: &str,
        content_resolver: &dyn ContentResolver,
    ) -> Option<ObjectValue> {
        self.core.get_object(key, content_resolver, |props, content| {
            let target = match props.get(PROP_BEAN_REF) {
                Some(name) if !name.is_empty() => name.clone(),
                _ => key.replace('/', "."),
            };
            let document: serde_yaml::Value = match serde_yaml::from_slice(content) {
                Ok(value) => value,
                Err(e) => {
                    warn!("cannot parse assembly description for key '{}': {}", key, e);
                    return None;
                }
            };
            match document.get(&target) {
                Some(definition) => Some(object(definition.clone())),
                None => {
                    warn!(
                        "assembly description for key '{}' has no definition named '{}'",
                        key, target
                    );
                    None
                }
            }
        })
    }

    fn notify_content_has_changed(&self, key: &str) {
        self.core.notify_content_has_changed(key);
    }
}
