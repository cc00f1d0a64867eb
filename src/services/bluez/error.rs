use std::time::Duration;

/// Errors returned by a bus gateway call
#[derive(thiserror::Error, Debug)]
pub enum BusError {
    /// D-Bus communication error
    #[error("D-Bus operation failed: {0}")]
    DbusError(#[from] zbus::Error),

    /// Error reply from a standard D-Bus interface
    #[error("D-Bus call failed: {0}")]
    FdoError(#[from] zbus::fdo::Error),

    /// Introspection data could not be parsed
    #[error("invalid introspection data for {path}: {details}")]
    Introspection {
        /// Object path that was introspected
        path: String,
        /// Parser error details
        details: String,
    },

    /// The call did not complete in time
    #[error("{operation} on {path} timed out after {timeout:?}")]
    Timeout {
        /// Name of the bus operation
        operation: &'static str,
        /// Object path the call targeted
        path: String,
        /// Configured timeout
        timeout: Duration,
    },

    /// No object or property at the requested location
    #[error("{0} not found")]
    NotFound(String),
}

/// Reasons a player read can fail
///
/// These never leave the reader as errors; they are rendered into the
/// `message` of an error snapshot.
#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    /// Fetching a property failed
    #[error("failed to read {property}: {source}")]
    Property {
        /// Property name
        property: &'static str,
        /// Underlying bus error
        source: BusError,
    },

    /// A property had an unexpected shape
    #[error("malformed {property}: expected {expected}")]
    Malformed {
        /// Property name
        property: &'static str,
        /// Description of the expected type
        expected: &'static str,
    },
}
