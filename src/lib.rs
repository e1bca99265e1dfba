//! Disposable IMAP4 server for testing client TLS behavior
//!
//! Speaks just enough IMAP to drive a client through either
//! implicit TLS (the whole session inside TLS from the first byte) or
//! STARTTLS (plaintext greeting, then an in-place upgrade). One fixed
//! credential is accepted and the mailbox is always empty.
//!
//! ```no_run
//! use imap_tls_fixture::{ImapServer, ServerConfig, TlsFactory};
//!
//! # async fn run() -> imap_tls_fixture::Result<()> {
//! let config = ServerConfig::default();
//! let factory = TlsFactory::load(None, None)?;
//! ImapServer::bind(&config, factory).await?.run().await;
//! # Ok(())
//! # }
//! ```
//!
//! This is a test fixture. Its default certificate is self-signed and
//! its credential is public; do not expose it to real clients.

mod auth;
pub mod client;
mod command;
mod config;
mod error;
mod handlers;
mod response;
mod server;
mod session;
mod tls;
mod transport;

pub use command::Command;
pub use config::{Credential, DEFAULT_PORT, ServerConfig, ServerMode};
pub use error::{Error, Result};
pub use handlers::{Outcome, dispatch};
pub use response::{CAPABILITIES, GREETING, Response, Status};
pub use server::ImapServer;
pub use session::{Session, SessionContext, handle_connection};
pub use tls::{TlsFactory, install_crypto_provider};
pub use transport::{Stream, Transport, TransportMode};
