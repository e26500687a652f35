// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer orchestrating the resolution core.
//!
//! This module holds the settings instance and its hierarchy, the
//! positional insertion strategies, the repository that owns the tree, and
//! the declarative bootstrap configurator.

pub mod config;
pub mod hierarchy;
pub mod position;
pub mod repository;
pub mod settings;

pub use config::{
    default_repository, YamlConfigurator, DEFAULT_CONFIGURATION_RESOURCE, DEFAULT_FALLBACK_RESOURCE,
};
pub use hierarchy::SettingsHierarchy;
pub use position::ConnectorPosition;
pub use repository::{Configurator, SettingsRepository};
pub use settings::Settings;
