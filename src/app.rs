use std::{future::Future, io, net::SocketAddr, sync::Arc};

use tracing::{info, instrument, warn};

use crate::{
    BridgeError, Result,
    config::Config,
    poller::PollLoop,
    server::StatusServer,
    services::{
        DisabledSink, FileSink, SnapshotSink,
        bluez::{BusGateway, PlayerLocator, StateReader, ZbusGateway},
    },
    state::{Snapshot, StateStore},
};

/// The assembled process: poll loop and status server sharing one store.
pub struct Bridge {
    poll_loop: PollLoop,
    server: StatusServer,
    store: StateStore,
}

impl Bridge {
    /// Connects to the bus and wires everything up.
    ///
    /// # Errors
    /// Returns error if the bus connection fails or the server cannot bind.
    #[instrument(skip(config))]
    pub async fn start(config: &Config) -> Result<Self> {
        let gateway = ZbusGateway::connect(
            config.bus.kind,
            config.bus.service.as_str(),
            config.bus.call_timeout(),
        )
        .await?;
        info!(bus = ?config.bus.kind, service = %config.bus.service, "Connected to bus");

        Self::with_gateway(config, Arc::new(gateway)).await
    }

    /// Wires everything up around an existing gateway.
    ///
    /// Seeds the store with the init snapshot and persists it once so the
    /// state file is fresh before the first poll.
    ///
    /// # Errors
    /// Returns error if a node pattern is invalid or the server cannot bind.
    pub async fn with_gateway(config: &Config, gateway: Arc<dyn BusGateway>) -> Result<Self> {
        let sink: Arc<dyn SnapshotSink> = if config.persistence.enabled {
            Arc::new(FileSink::new(&config.persistence.state_file))
        } else {
            Arc::new(DisabledSink)
        };

        let store = StateStore::new(Snapshot::init());
        sink.persist(&store.current()).await;

        let locator = PlayerLocator::new(Arc::clone(&gateway), &config.bus)
            .map_err(|e| BridgeError::config(e, None))?;
        let reader = StateReader::new(gateway, config.bus.interface.as_str());

        let server = StatusServer::bind(
            &config.server.bind_addr(),
            store.clone(),
            config.server.request_timeout(),
        )
        .await?;

        let poll_loop = PollLoop::new(
            locator,
            reader,
            store.clone(),
            sink,
            config.bus.poll_interval(),
        );

        Ok(Self {
            poll_loop,
            server,
            store,
        })
    }

    /// Handle to the shared store.
    pub fn store(&self) -> StateStore {
        self.store.clone()
    }

    /// Address the status server is bound to.
    ///
    /// # Errors
    /// Returns error if the socket address cannot be queried.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.server.local_addr()
    }

    /// Runs both tasks until `shutdown` completes.
    pub async fn run_until<F>(self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            () = self.poll_loop.run() => {}
            () = self.server.serve() => {}
            () = shutdown => info!("Stopping monitoring"),
        }
    }
}

/// Completes on Ctrl-C or, on Unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
