use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Which message bus the gateway connects to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BusKind {
    /// The system bus, where BlueZ lives.
    #[default]
    System,

    /// The per-user session bus. Handy for running against a mock service.
    Session,
}

/// Bus discovery and polling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BusConfig {
    /// Bus to connect to.
    pub kind: BusKind,

    /// Well-known name of the service owning the player objects.
    pub service: String,

    /// Object path the player search starts from.
    pub root: String,

    /// Interface carrying the player properties.
    pub interface: String,

    /// Regular expression matched against adapter node names under the root.
    pub adapter_pattern: String,

    /// Regular expression matched against device node names under an adapter.
    pub device_pattern: String,

    /// Regular expression matched against player node names under a device.
    pub player_pattern: String,

    /// Seconds to sleep between poll iterations.
    pub poll_interval_secs: u64,

    /// Upper bound for a single bus call in milliseconds. `0` waits forever.
    pub call_timeout_ms: u64,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            kind: BusKind::System,
            service: "org.bluez".to_string(),
            root: "/org/bluez".to_string(),
            interface: "org.bluez.MediaPlayer1".to_string(),
            adapter_pattern: "^hci".to_string(),
            device_pattern: "^dev_".to_string(),
            player_pattern: "^player".to_string(),
            poll_interval_secs: 2,
            call_timeout_ms: 5000,
        }
    }
}

impl BusConfig {
    /// Poll interval as a `Duration`.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Per-call timeout, or `None` when disabled.
    pub fn call_timeout(&self) -> Option<Duration> {
        (self.call_timeout_ms > 0).then(|| Duration::from_millis(self.call_timeout_ms))
    }
}
