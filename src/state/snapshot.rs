use std::fmt;

use serde::{Deserialize, Serialize};

/// Format of the `updated` field, in local time.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const INIT_MESSAGE: &str = "Waiting for first update";
const IDLE_MESSAGE: &str = "No active Bluetooth player";
const UNKNOWN: &str = "Unknown";

/// Current local time rendered with [`TIMESTAMP_FORMAT`].
pub fn timestamp_now() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// What the published snapshot represents.
///
/// The first three are states of the bridge itself; anything else is the
/// playback status string reported by the player, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PlayerStatus {
    /// Nothing polled yet
    Init,
    /// No player on the bus
    Idle,
    /// Reading the player failed
    Error,
    /// Player-reported status such as "playing", "paused" or "stopped"
    Playback(String),
}

impl PlayerStatus {
    /// Wire representation.
    pub fn as_str(&self) -> &str {
        match self {
            PlayerStatus::Init => "init",
            PlayerStatus::Idle => "idle",
            PlayerStatus::Error => "error",
            PlayerStatus::Playback(status) => status,
        }
    }
}

impl From<String> for PlayerStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "init" => PlayerStatus::Init,
            "idle" => PlayerStatus::Idle,
            "error" => PlayerStatus::Error,
            _ => PlayerStatus::Playback(value),
        }
    }
}

impl From<PlayerStatus> for String {
    fn from(value: PlayerStatus) -> Self {
        match value {
            PlayerStatus::Playback(status) => status,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for PlayerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Track metadata as published
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    /// Track title
    pub title: String,

    /// Track artist
    pub artist: String,

    /// Album name
    pub album: String,

    /// Track length in milliseconds
    pub duration_ms: u64,
}

impl Default for Track {
    fn default() -> Self {
        Self {
            title: UNKNOWN.to_string(),
            artist: UNKNOWN.to_string(),
            album: UNKNOWN.to_string(),
            duration_ms: 0,
        }
    }
}

/// The published player state.
///
/// Always replaced as a whole. Fields that do not apply to the current
/// status are `None` and left out of the JSON document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Bridge or playback status
    pub status: PlayerStatus,

    /// Human-readable note for init, idle and error states
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Track title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Track artist
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,

    /// Album name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,

    /// Track length in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,

    /// Playback position in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_ms: Option<u64>,

    /// Creation time, see [`TIMESTAMP_FORMAT`]
    #[serde(default)]
    pub updated: String,
}

impl Snapshot {
    /// The snapshot seeded at startup.
    pub fn init() -> Self {
        Self::note(PlayerStatus::Init, INIT_MESSAGE)
    }

    /// A failed read, carrying the failure description.
    pub fn error(message: impl Into<String>) -> Self {
        Self::note(PlayerStatus::Error, message)
    }

    /// A successful read.
    pub fn playback(status: impl Into<String>, track: Track, position_ms: u64) -> Self {
        Self {
            status: PlayerStatus::from(status.into()),
            message: None,
            title: Some(track.title),
            artist: Some(track.artist),
            album: Some(track.album),
            duration_ms: Some(track.duration_ms),
            position_ms: Some(position_ms),
            updated: timestamp_now(),
        }
    }

    /// Copy of `self` marked idle, with a fresh timestamp.
    ///
    /// Track fields of the last known state are kept so consumers can keep
    /// showing what was playing.
    pub fn to_idle(&self) -> Self {
        Self {
            status: PlayerStatus::Idle,
            message: Some(IDLE_MESSAGE.to_string()),
            updated: timestamp_now(),
            ..self.clone()
        }
    }

    /// True when this snapshot reports a failed read.
    pub fn is_error(&self) -> bool {
        self.status == PlayerStatus::Error
    }

    /// Identity of the current track, if there is any artist or title.
    pub fn track_key(&self) -> Option<TrackKey> {
        TrackKey::new(
            self.artist.as_deref().unwrap_or_default(),
            self.title.as_deref().unwrap_or_default(),
        )
    }

    fn note(status: PlayerStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: Some(message.into()),
            title: None,
            artist: None,
            album: None,
            duration_ms: None,
            position_ms: None,
            updated: timestamp_now(),
        }
    }
}

/// Case and whitespace insensitive `(artist, title)` pair.
///
/// Only used to decide how loudly a poll gets logged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackKey(String);

impl TrackKey {
    /// Normalizes the pair; `None` when both parts are blank.
    pub fn new(artist: &str, title: &str) -> Option<Self> {
        let artist = artist.trim().to_lowercase();
        let title = title.trim().to_lowercase();

        if artist.is_empty() && title.is_empty() {
            return None;
        }

        Some(Self(format!("{artist}::{title}")))
    }
}
