use std::{io, path::Path, result};

use thiserror::Error;

use crate::services::bluez::BusError;

/// Error types for the bridge process.
///
/// Everything in here is a startup failure. Errors that happen while the
/// poll loop or a connection handler is running are contained where they
/// occur and only ever show up as a logged message and a state change.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// Configuration file could not be read or is invalid
    #[error("configuration error at '{location}': {details}")]
    Config {
        /// File path, or "defaults" when validating built-in values
        location: String,
        /// What went wrong
        details: String,
    },

    /// Connecting to the message bus failed
    #[error("bus unavailable: {0}")]
    Bus(#[from] BusError),

    /// The status server could not bind its listening socket
    #[error("failed to bind HTTP server on {addr}: {source}")]
    Bind {
        /// Requested listen address
        addr: String,
        /// Underlying socket error
        source: io::Error,
    },

    /// Standard I/O operation error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// A specialized `Result` type for bridge operations.
pub type Result<T> = result::Result<T, BridgeError>;

impl BridgeError {
    /// Creates a configuration error with optional file path context.
    pub fn config(error: impl std::fmt::Display, path: Option<&Path>) -> Self {
        let location = match path {
            Some(p) => {
                let clean_path = p.canonicalize().unwrap_or_else(|_| p.to_path_buf());
                clean_path.to_string_lossy().to_string()
            }
            None => "defaults".to_string(),
        };

        BridgeError::Config {
            location,
            details: error.to_string(),
        }
    }

    /// Creates a bind error for the given address.
    pub fn bind(addr: impl Into<String>, source: io::Error) -> Self {
        BridgeError::Bind {
            addr: addr.into(),
            source,
        }
    }
}
