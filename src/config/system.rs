//! System configuration - root configuration structure.

use heapless::{FnvIndexMap, String};
use serde::Deserialize;

use super::gauge::GaugeConfig;
use super::profile::ProfileConfig;

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SystemConfig {
    /// Named gauge configurations.
    #[serde(default)]
    pub gauges: FnvIndexMap<String<32>, GaugeConfig, 8>,

    /// Named acceleration tables.
    #[serde(default)]
    pub profiles: FnvIndexMap<String<32>, ProfileConfig, 8>,
}

impl SystemConfig {
    /// Get a gauge configuration by name.
    pub fn gauge(&self, name: &str) -> Option<&GaugeConfig> {
        self.gauges
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// Get a profile configuration by name.
    pub fn profile(&self, name: &str) -> Option<&ProfileConfig> {
        self.profiles
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// List all gauge names.
    pub fn gauge_names(&self) -> impl Iterator<Item = &str> {
        self.gauges.keys().map(|s| s.as_str())
    }

    /// List all profile names.
    pub fn profile_names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(|s| s.as_str())
    }
}
