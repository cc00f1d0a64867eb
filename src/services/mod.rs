/// BlueZ player discovery and property reads
pub mod bluez;
/// State file output for external readers
pub mod persistence;

pub use persistence::{DisabledSink, FileSink, SnapshotSink};
