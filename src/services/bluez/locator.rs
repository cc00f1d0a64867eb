use std::{fmt, sync::Arc};

use regex::Regex;
use tracing::{debug, instrument};

use super::BusGateway;
use crate::config::BusConfig;

/// Object path of the player currently being tracked.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerHandle(String);

impl PlayerHandle {
    /// Wraps an object path.
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// The object path on the bus.
    pub fn path(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Walks root → adapter → device → player looking for a media player.
pub struct PlayerLocator {
    gateway: Arc<dyn BusGateway>,
    root: String,
    adapter_pattern: Regex,
    device_pattern: Regex,
    player_pattern: Regex,
}

impl PlayerLocator {
    /// Builds a locator from the bus configuration.
    ///
    /// # Errors
    /// Returns error if one of the node name patterns is not a valid regex.
    pub fn new(gateway: Arc<dyn BusGateway>, config: &BusConfig) -> Result<Self, regex::Error> {
        Ok(Self {
            gateway,
            root: config.root.clone(),
            adapter_pattern: Regex::new(&config.adapter_pattern)?,
            device_pattern: Regex::new(&config.device_pattern)?,
            player_pattern: Regex::new(&config.player_pattern)?,
        })
    }

    /// Returns the first player found, in traversal order.
    ///
    /// A branch whose introspection fails is skipped; only when every
    /// branch is exhausted does the search come back empty.
    #[instrument(skip(self), fields(root = %self.root))]
    pub async fn find_player(&self) -> Option<PlayerHandle> {
        let adapters = self.matching_children(&self.root, &self.adapter_pattern).await?;

        for adapter in adapters {
            let adapter_path = child_path(&self.root, &adapter);
            let Some(devices) = self
                .matching_children(&adapter_path, &self.device_pattern)
                .await
            else {
                continue;
            };

            for device in devices {
                let device_path = child_path(&adapter_path, &device);
                let Some(players) = self
                    .matching_children(&device_path, &self.player_pattern)
                    .await
                else {
                    continue;
                };

                if let Some(player) = players.first() {
                    return Some(PlayerHandle::new(child_path(&device_path, player)));
                }
            }
        }

        None
    }

    /// `None` marks a failed branch.
    async fn matching_children(&self, path: &str, pattern: &Regex) -> Option<Vec<String>> {
        match self.gateway.list_children(path).await {
            Ok(children) => Some(
                children
                    .into_iter()
                    .filter(|name| pattern.is_match(name))
                    .collect(),
            ),
            Err(e) => {
                debug!(path, error = %e, "skipping branch");
                None
            }
        }
    }
}

fn child_path(parent: &str, name: &str) -> String {
    if parent.ends_with('/') {
        format!("{parent}{name}")
    } else {
        format!("{parent}/{name}")
    }
}
