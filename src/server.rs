//! Connection listener
//!
//! Binds one TCP port and hands every accepted socket to its own tokio
//! task running [`handle_connection`]. A failing or panicking session
//! only ends its own task; the accept loop keeps going.

use crate::config::ServerConfig;
use crate::error::Result;
use crate::session::{SessionContext, handle_connection};
use crate::tls::TlsFactory;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, TcpSocket};
use tokio::task::JoinHandle;
use tracing::{Instrument, debug, info_span, warn};

/// Depth of the kernel accept queue.
const BACKLOG: u32 = 50;

/// Pause after a failed accept so a persistent error (e.g. out of file
/// descriptors) does not spin the loop.
const ACCEPT_RETRY_DELAY: Duration = Duration::from_millis(100);

/// A bound IMAP fixture server.
pub struct ImapServer {
    listener: TcpListener,
    context: SessionContext,
}

impl ImapServer {
    /// Bind `config.bind:config.port`. Port 0 lets the OS pick one;
    /// see [`ImapServer::local_addr`].
    ///
    /// # Errors
    ///
    /// Returns an error if the socket cannot be created, bound, or put
    /// into listening mode.
    pub async fn bind(config: &ServerConfig, factory: TlsFactory) -> Result<Self> {
        let addr = SocketAddr::new(config.bind, config.port);
        let socket = if addr.is_ipv4() {
            TcpSocket::new_v4()?
        } else {
            TcpSocket::new_v6()?
        };
        socket.set_reuseaddr(true)?;
        socket.bind(addr)?;
        let listener = socket.listen(BACKLOG)?;
        debug!("Listening on {}", listener.local_addr()?);

        Ok(Self {
            listener,
            context: SessionContext {
                mode: config.mode,
                factory,
                credential: Arc::new(config.credential.clone()),
            },
        })
    }

    /// The address actually bound.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS cannot report the socket address.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept connections forever.
    pub async fn run(self) {
        loop {
            let (stream, peer) = next_connection(|| self.listener.accept()).await;

            let context = self.context.clone();
            tokio::spawn(
                async move {
                    debug!("Connection accepted");
                    match handle_connection(stream, &context).await {
                        Ok(()) => debug!("Connection closed"),
                        Err(e) => warn!(error = %e, "Client error"),
                    }
                }
                .instrument(info_span!("session", %peer)),
            );
        }
    }

    /// Run the accept loop on a background task.
    ///
    /// The server keeps running until the task is aborted or the
    /// runtime shuts down.
    #[must_use]
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }
}

/// Call `accept` until it yields a connection, logging each failure and
/// pausing before the next attempt.
async fn next_connection<T, F, Fut>(mut accept: F) -> T
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::io::Result<T>>,
{
    loop {
        match accept().await {
            Ok(conn) => return conn,
            Err(e) => {
                warn!(error = %e, "Failed to accept connection");
                tokio::time::sleep(ACCEPT_RETRY_DELAY).await;
            }
        }
    }
}
