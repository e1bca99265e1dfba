//! In-process fixture server for integration tests.

use imap_tls_fixture::{Credential, ImapServer, ServerConfig, ServerMode, TlsFactory};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// A fixture server on `127.0.0.1` with an OS-assigned port.
///
/// The accept loop runs on a background task for the rest of the test.
pub struct TestServer {
    addr: SocketAddr,
    /// Handle to the background task so it lives as long as the server.
    _handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Start a server in `mode` accepting `user` / `password`.
    pub async fn start(mode: ServerMode) -> Self {
        Self::start_with(mode, Credential::default()).await
    }

    pub async fn start_with(mode: ServerMode, credential: Credential) -> Self {
        let config = ServerConfig {
            bind: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 0,
            mode,
            keystore: None,
            keystore_password: None,
            credential,
        };
        let factory = TlsFactory::self_signed().expect("generate self-signed cert");
        let server = ImapServer::bind(&config, factory)
            .await
            .expect("bind to ephemeral port");
        let addr = server.local_addr().expect("local address");

        Self {
            addr,
            _handle: server.spawn(),
        }
    }

    pub const fn addr(&self) -> SocketAddr {
        self.addr
    }
}
