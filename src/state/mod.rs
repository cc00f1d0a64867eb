//! Published player state and the store that holds it.

mod snapshot;
mod store;


pub use snapshot::{PlayerStatus, Snapshot, TIMESTAMP_FORMAT, Track, TrackKey, timestamp_now};
pub use store::StateStore;
