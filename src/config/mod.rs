//! Configuration schema definitions and validation.
//!
//! Defines the complete configuration structure for the bridge. All
//! configurations are serializable to/from TOML format and every field has
//! a default, so an empty or missing file yields a working setup.

mod bus;
mod general;
mod loading;
mod paths;
mod persistence;
mod server;

#[cfg(test)]
mod tests;

pub use bus::{BusConfig, BusKind};
pub use general::{GeneralConfig, LogLevel};
pub use loading::ConfigSource;
pub use paths::ConfigPaths;
pub use persistence::PersistenceConfig;
pub use server::ServerConfig;

use serde::{Deserialize, Serialize};

/// Main configuration structure for the bridge.
///
/// Represents the complete configuration schema that can be loaded
/// from TOML files. All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// General application settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Player discovery and polling.
    #[serde(default)]
    pub bus: BusConfig,

    /// HTTP status endpoint.
    #[serde(default)]
    pub server: ServerConfig,

    /// State file written for external readers.
    #[serde(default)]
    pub persistence: PersistenceConfig,
}
