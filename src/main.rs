//! btplayer-bridge - serves the active Bluetooth media player's state over HTTP.
//!
//! Startup failures (bad configuration, no bus, port in use) are logged and
//! end the process with a non-zero status. Everything after startup is
//! contained in the poll loop and connection handlers.

use std::{error::Error, path::PathBuf, process};

use btplayer_bridge::{
    app::{Bridge, shutdown_signal},
    config::{BusKind, Config, ConfigSource, LogLevel},
    tracing_config,
};
use clap::Parser;
use tracing::{error, info};

/// Command line overrides for the configuration file.
#[derive(Debug, Parser)]
#[command(name = "btplayer-bridge", version, about)]
struct Cli {
    /// Configuration file (defaults to $XDG_CONFIG_HOME/btplayer-bridge/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Seconds between polls
    #[arg(short, long)]
    interval: Option<u64>,

    /// Where to write the state file
    #[arg(long)]
    state_file: Option<PathBuf>,

    /// Do not write the state file
    #[arg(long)]
    no_persist: bool,

    /// Log verbosity
    #[arg(long, value_enum)]
    log_level: Option<LogLevel>,

    /// Use the session bus instead of the system bus
    #[arg(long)]
    session_bus: bool,
}

impl Cli {
    fn load_config(&self) -> btplayer_bridge::Result<(Config, ConfigSource)> {
        let (mut config, source) = Config::load(self.config.as_deref())?;

        if let Some(host) = &self.host {
            config.server.host.clone_from(host);
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(interval) = self.interval {
            config.bus.poll_interval_secs = interval;
        }
        if let Some(state_file) = &self.state_file {
            config.persistence.state_file.clone_from(state_file);
        }
        if self.no_persist {
            config.persistence.enabled = false;
        }
        if let Some(level) = self.log_level {
            config.general.log_level = level;
        }
        if self.session_bus {
            config.bus.kind = BusKind::Session;
        }

        config.validate()?;
        Ok((config, source))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let (config, source) = match cli.load_config() {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("btplayer-bridge: {e}");
            process::exit(1);
        }
    };

    tracing_config::init(config.general.log_level)?;
    info!("Configuration: {source}");

    let bridge = match Bridge::start(&config).await {
        Ok(bridge) => bridge,
        Err(e) => {
            error!("Startup failed: {e}");
            process::exit(1);
        }
    };

    info!("Poll interval: {}s", config.bus.poll_interval_secs);
    bridge.run_until(shutdown_signal()).await;

    Ok(())
}
