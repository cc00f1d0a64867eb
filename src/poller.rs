use std::{sync::Arc, time::Duration};

use tracing::{debug, info, instrument, warn};

use crate::{
    services::{
        SnapshotSink,
        bluez::{PlayerHandle, PlayerLocator, StateReader},
    },
    state::{StateStore, TrackKey},
};

/// What a single poll iteration did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// No player on the bus; an idle snapshot was published.
    Idle,
    /// The tracked player could not be read and was dropped.
    ReadFailed,
    /// A fresh snapshot was published and persisted.
    Updated {
        /// Whether artist or title differ from the previous successful read.
        track_changed: bool,
    },
}

/// Drives discovery and reads, and publishes the results.
///
/// Without a player handle every iteration searches the bus. Once a player
/// is found it is read each iteration until a read fails, at which point
/// the handle is dropped and the search starts over.
pub struct PollLoop {
    locator: PlayerLocator,
    reader: StateReader,
    store: StateStore,
    sink: Arc<dyn SnapshotSink>,
    interval: Duration,
    player: Option<PlayerHandle>,
    previous_track: Option<TrackKey>,
}

impl PollLoop {
    /// Create a poll loop with no player tracked yet.
    pub fn new(
        locator: PlayerLocator,
        reader: StateReader,
        store: StateStore,
        sink: Arc<dyn SnapshotSink>,
        interval: Duration,
    ) -> Self {
        Self {
            locator,
            reader,
            store,
            sink,
            interval,
            player: None,
            previous_track: None,
        }
    }

    /// Player currently tracked, if any.
    pub fn player(&self) -> Option<&PlayerHandle> {
        self.player.as_ref()
    }

    /// Runs one iteration without sleeping.
    pub async fn poll_once(&mut self) -> PollOutcome {
        let player = match self.player.clone() {
            Some(player) => player,
            None => match self.locator.find_player().await {
                Some(found) => {
                    info!(player = %found, "Found media player");
                    self.player = Some(found.clone());
                    found
                }
                None => {
                    self.store.publish(self.store.current().to_idle());
                    return PollOutcome::Idle;
                }
            },
        };

        let snapshot = self.reader.read(&player).await;

        if snapshot.is_error() {
            warn!(
                player = %player,
                "Failed to read player: {}",
                snapshot.message.as_deref().unwrap_or_default()
            );
            self.store.publish(snapshot);
            self.player = None;
            return PollOutcome::ReadFailed;
        }

        let track = snapshot.track_key();
        let track_changed = track != self.previous_track;
        let artist = snapshot.artist.as_deref().unwrap_or_default();
        let title = snapshot.title.as_deref().unwrap_or_default();

        if track_changed {
            info!(status = %snapshot.status, "{artist} - {title}");
            self.previous_track = track;
        } else {
            let position_secs = snapshot.position_ms.unwrap_or_default() as f64 / 1000.0;
            debug!(
                status = %snapshot.status,
                "{artist} - {title} ({position_secs:.2}s)"
            );
        }

        self.store.publish(snapshot.clone());
        self.sink.persist(&snapshot).await;

        PollOutcome::Updated { track_changed }
    }

    /// Polls forever at the configured interval.
    #[instrument(skip(self), fields(interval = ?self.interval))]
    pub async fn run(mut self) {
        info!("Starting poll loop");

        loop {
            self.poll_once().await;
            tokio::time::sleep(self.interval).await;
        }
    }
}
