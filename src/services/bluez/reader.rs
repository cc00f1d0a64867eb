use std::{collections::HashMap, sync::Arc};

use tracing::instrument;

use super::{BusGateway, PlayerHandle, PropertyValue, ReadError};
use crate::state::{Snapshot, Track};

const STATUS: &str = "Status";
const POSITION: &str = "Position";
const TRACK: &str = "Track";

/// Reads a player's transient properties into a [`Snapshot`].
pub struct StateReader {
    gateway: Arc<dyn BusGateway>,
    interface: String,
}

impl StateReader {
    /// Create a reader for players exposing `interface`.
    pub fn new(gateway: Arc<dyn BusGateway>, interface: impl Into<String>) -> Self {
        Self {
            gateway,
            interface: interface.into(),
        }
    }

    /// Reads status, position and track of the player.
    ///
    /// Never fails: a read that goes wrong yields an error snapshot whose
    /// message describes the failure. Deciding what to do about the handle
    /// is up to the caller.
    #[instrument(skip(self), fields(player = %handle))]
    pub async fn read(&self, handle: &PlayerHandle) -> Snapshot {
        match self.try_read(handle).await {
            Ok(snapshot) => snapshot,
            Err(e) => Snapshot::error(e.to_string()),
        }
    }

    async fn try_read(&self, handle: &PlayerHandle) -> Result<Snapshot, ReadError> {
        let status = self.fetch(handle, STATUS).await?;
        let position = self.fetch(handle, POSITION).await?;
        let track = self.fetch(handle, TRACK).await?;

        let status = status.as_str().ok_or(ReadError::Malformed {
            property: STATUS,
            expected: "a string",
        })?;
        let position_ms = position.as_u64().ok_or(ReadError::Malformed {
            property: POSITION,
            expected: "a number",
        })?;
        let track = track.as_dict().ok_or(ReadError::Malformed {
            property: TRACK,
            expected: "a dictionary",
        })?;

        Ok(Snapshot::playback(status, track_from(track), position_ms))
    }

    async fn fetch(
        &self,
        handle: &PlayerHandle,
        property: &'static str,
    ) -> Result<PropertyValue, ReadError> {
        self.gateway
            .get_property(handle.path(), &self.interface, property)
            .await
            .map_err(|source| ReadError::Property { property, source })
    }
}

fn track_from(fields: &HashMap<String, PropertyValue>) -> Track {
    let present = |key: &str| fields.get(key).filter(|value| !value.is_blank());
    let text = |key: &str| present(key).and_then(PropertyValue::as_str).map(str::to_string);

    let defaults = Track::default();
    Track {
        title: text("Title").unwrap_or(defaults.title),
        artist: text("Artist").unwrap_or(defaults.artist),
        album: text("Album").unwrap_or(defaults.album),
        duration_ms: present("Duration")
            .and_then(PropertyValue::as_u64)
            .unwrap_or(defaults.duration_ms),
    }
}
