use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// State file configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistenceConfig {
    /// Whether snapshots are written to the state file at all.
    pub enabled: bool,

    /// Location of the JSON state file read by external consumers.
    pub state_file: PathBuf,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            state_file: PathBuf::from("/tmp/btplayer_state.json"),
        }
    }
}
