//! Minimal HTTP endpoint exposing the current snapshot.
//!
//! One short-lived task per connection, one request per connection. The
//! only thing handlers share is the [`StateStore`], which they read.

mod http;
mod routes;

#[cfg(test)]
mod tests;

pub use http::{Head, MAX_HEAD_BYTES, RequestLine, Response, StatusCode, read_head};
pub use routes::{bad_request, route};

use std::{io, net::SocketAddr, time::Duration};

use tokio::{
    io::AsyncWriteExt,
    net::{TcpListener, TcpStream},
};
use tracing::{debug, info, instrument, warn};

use crate::{BridgeError, Result, state::StateStore};

const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// HTTP responder bound to a listening socket.
pub struct StatusServer {
    listener: TcpListener,
    store: StateStore,
    request_timeout: Duration,
}

impl StatusServer {
    /// Binds the listening socket.
    ///
    /// # Errors
    /// Returns `BridgeError::Bind` if the address cannot be bound.
    pub async fn bind(addr: &str, store: StateStore, request_timeout: Duration) -> Result<Self> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| BridgeError::bind(addr, e))?;

        Ok(Self {
            listener,
            store,
            request_timeout,
        })
    }

    /// Address actually bound, useful with port 0.
    ///
    /// # Errors
    /// Returns error if the socket address cannot be queried.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts connections forever, handling each on its own task.
    pub async fn serve(self) {
        if let Ok(addr) = self.local_addr() {
            info!("HTTP server listening on http://{addr}");
        }

        loop {
            match self.listener.accept().await {
                Ok((stream, peer)) => {
                    let store = self.store.clone();
                    let request_timeout = self.request_timeout;
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(stream, peer, store, request_timeout).await
                        {
                            debug!(%peer, "Connection error: {e}");
                        }
                    });
                }
                Err(e) => {
                    warn!("Failed to accept connection: {e}");
                    tokio::time::sleep(ACCEPT_BACKOFF).await;
                }
            }
        }
    }
}

#[instrument(skip(stream, store, request_timeout))]
async fn handle_connection(
    mut stream: TcpStream,
    peer: SocketAddr,
    store: StateStore,
    request_timeout: Duration,
) -> io::Result<()> {
    let head = match tokio::time::timeout(request_timeout, read_head(&mut stream)).await {
        Ok(head) => head?,
        Err(_) => {
            debug!("Request head not received in time, closing");
            return Ok(());
        }
    };

    let response = match head {
        Head::Incomplete => {
            debug!("Client closed before end of request head");
            return Ok(());
        }
        Head::TooLarge => bad_request(),
        Head::Complete(bytes) => match RequestLine::parse(&bytes) {
            Some(request) => {
                debug!(method = %request.method, target = %request.target, "Request");
                route(&request, &store)
            }
            None => bad_request(),
        },
    };

    stream.write_all(&response.to_bytes()).await?;
    stream.shutdown().await
}
