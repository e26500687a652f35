// SPDX-License-Identifier: MIT OR Apache-2.0

//! The settings repository: owner of the settings tree and of the fallback
//! configuration trigger.

use crate::domain::Result;
use crate::service::hierarchy::SettingsHierarchy;
use crate::service::settings::Settings;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

/// Populates a repository's settings tree from a configuration source.
///
/// This is the boundary to the bootstrap machinery: implementations parse a
/// declarative description of the connector list and register the described
/// connectors on the repository's root instance.
pub trait Configurator: Send + Sync {
    /// Configures the given repository.
    ///
    /// Implementations access the tree through
    /// [`SettingsRepository::root`], which never triggers fallback
    /// configuration.
    fn configure(&self, repository: &SettingsRepository) -> Result<()>;
}

/// The owner of one settings tree, constructed once by the host application
/// and passed to whatever needs lookups.
///
/// The repository never hands out a null-equivalent: when no configuration
/// source exists at all, the returned instance is simply a permanently
/// empty one whose reads are absent and whose writes are not possible.
///
/// # Fallback configuration
///
/// On every [`settings`](SettingsRepository::settings) access, a repository
/// whose root holds zero connectors triggers its fallback [`Configurator`]
/// — once per arming. [`reset_configuration`] clears the connectors and
/// re-arms the trigger.
///
/// [`reset_configuration`]: SettingsRepository::reset_configuration
pub struct SettingsRepository {
    hierarchy: SettingsHierarchy,
    fallback: Option<Arc<dyn Configurator>>,
    fallback_pending: AtomicBool,
}

impl SettingsRepository {
    /// Creates a repository with an empty tree and no fallback
    /// configurator.
    pub fn new() -> Self {
        Self {
            hierarchy: SettingsHierarchy::new(),
            fallback: None,
            fallback_pending: AtomicBool::new(false),
        }
    }

    /// Creates a repository whose tree is populated from the fallback
    /// configurator on first unconfigured access.
    pub fn with_fallback(fallback: Arc<dyn Configurator>) -> Self {
        Self {
            hierarchy: SettingsHierarchy::new(),
            fallback: Some(fallback),
            fallback_pending: AtomicBool::new(true),
        }
    }

    /// Creates the terminal no-op repository.
    ///
    /// Its root is the NOP settings instance, exempt from the fallback
    /// trigger.
    pub fn nop() -> Self {
        Self {
            hierarchy: SettingsHierarchy::with_root(Arc::new(Settings::nop())),
            fallback: None,
            fallback_pending: AtomicBool::new(false),
        }
    }

    /// Creates a repository from a primary configuration source with a
    /// fallback behind it.
    ///
    /// A failing primary source is reported and degrades to "contributes
    /// nothing": the repository starts empty and the fallback fires on
    /// first access.
    pub fn bootstrap(
        primary: Option<&dyn Configurator>,
        fallback: Option<Arc<dyn Configurator>>,
    ) -> Self {
        let repository = match fallback {
            Some(fallback) => Self::with_fallback(fallback),
            None => Self::new(),
        };
        if let Some(primary) = primary {
            if let Err(e) = primary.configure(&repository) {
                warn!("primary configuration failed: {}", e);
            }
        }
        repository
    }

    /// Returns the root settings instance, triggering fallback
    /// configuration first if the repository is unconfigured.
    pub fn settings(&self) -> Arc<Settings> {
        self.ensure_configured();
        self.hierarchy.root()
    }

    /// Returns the named settings instance out of the hierarchy, triggering
    /// fallback configuration first if the repository is unconfigured.
    pub fn settings_named(&self, name: &str) -> Arc<Settings> {
        self.ensure_configured();
        self.hierarchy.settings(name)
    }

    /// Returns the root settings instance without any fallback trigger.
    ///
    /// This is the access path for [`Configurator`] implementations and
    /// configuration-time wiring.
    pub fn root(&self) -> Arc<Settings> {
        self.hierarchy.root()
    }

    /// Returns the root's connector count.
    pub fn connector_count(&self) -> usize {
        self.hierarchy.root().connector_count()
    }

    /// Removes every connector from the root and re-arms the fallback
    /// trigger, forcing reconfiguration on the next access.
    pub fn reset_configuration(&self) {
        self.hierarchy.root().remove_all_connectors();
        if self.fallback.is_some() {
            self.fallback_pending.store(true, Ordering::SeqCst);
        }
    }

    fn ensure_configured(&self) {
        if self.hierarchy.root().is_nop() {
            return;
        }
        if self.connector_count() > 0 {
            return;
        }
        // Disarm before configuring so that a configurator reading the
        // repository does not re-enter the trigger.
        if !self.fallback_pending.swap(false, Ordering::SeqCst) {
            return;
        }
        let Some(fallback) = &self.fallback else {
            return;
        };
        info!("no connectors registered, applying the fallback configuration");
        if let Err(e) = fallback.configure(self) {
            warn!("fallback configuration failed: {}", e);
        }
        if self.connector_count() == 0 {
            warn!("the repository remains without connectors; lookups will find nothing");
        }
    }
}

impl Default for SettingsRepository {
    fn default() -> Self {
        Self::new()
    }
}
