//! btplayer-bridge - Bluetooth media player state over HTTP.
//!
//! Polls the BlueZ media player object on the system bus and publishes what
//! is playing as a JSON snapshot, both through a small HTTP endpoint and a
//! state file other local processes can read.
//!
//! - Player discovery that survives the player disappearing and reappearing
//! - One consistent snapshot shared between the poller and HTTP readers
//! - Best-effort state file output
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use btplayer_bridge::{app::{Bridge, shutdown_signal}, config::Config};
//!
//! # async fn run() -> btplayer_bridge::Result<()> {
//! let config = Config::load_default()?;
//! let bridge = Bridge::start(&config).await?;
//! bridge.run_until(shutdown_signal()).await;
//! # Ok(())
//! # }
//! ```

/// Process assembly and shutdown handling.
pub mod app;

/// Configuration schema definitions and validation.
pub mod config;

/// Core error types and result aliases.
pub mod core;

/// Discovery and polling state machine.
pub mod poller;

/// HTTP status endpoint.
pub mod server;

/// Bus access and snapshot persistence.
pub mod services;

/// Published player state.
pub mod state;

/// Logging setup.
pub mod tracing_config;

/// Re-exported core types for convenience.
pub use crate::core::{BridgeError, Result};
