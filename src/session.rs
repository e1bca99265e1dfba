//! Per-connection session handling
//!
//! [`handle_connection`] drives one client from greeting to close:
//!
//! ```text
//!   (SSL mode) TLS handshake
//!       |
//!   greeting
//!       |
//!   read line -> parse -> dispatch -> write response   <--+
//!       |                                                |
//!       +-- STARTTLS: write OK, handshake, swap transport -+
//!       +-- AUTHENTICATE PLAIN: "+", read one more line --+
//!       +-- LOGOUT / end of stream / I/O error: close
//! ```
//!
//! Transport and authentication are independent one-way axes:
//! plaintext -> secure, and unauthenticated -> authenticated.

use crate::command::Command;
use crate::config::{Credential, ServerMode};
use crate::error::Result;
use crate::handlers::{Outcome, dispatch};
use crate::response::{CONTINUATION, GREETING};
use crate::tls::TlsFactory;
use crate::transport::{Stream, Transport, TransportMode};
use std::sync::Arc;
use tracing::{debug, info};

/// Per-connection protocol state seen by the command handlers.
#[derive(Debug)]
pub struct Session {
    transport: TransportMode,
    authenticated: bool,
    tag: String,
    credential: Arc<Credential>,
}

impl Session {
    #[must_use]
    pub fn new(transport: TransportMode, credential: Arc<Credential>) -> Self {
        Self {
            transport,
            authenticated: false,
            tag: String::new(),
            credential,
        }
    }

    #[must_use]
    pub const fn transport(&self) -> TransportMode {
        self.transport
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Tag of the command currently being handled.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[must_use]
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub(crate) fn set_tag(&mut self, tag: &str) {
        tag.clone_into(&mut self.tag);
    }

    pub(crate) const fn mark_authenticated(&mut self) {
        self.authenticated = true;
    }

    const fn mark_secure(&mut self) {
        self.transport = TransportMode::Secure;
    }
}

/// Read-only state shared by every connection of one server.
#[derive(Clone)]
pub struct SessionContext {
    pub mode: ServerMode,
    pub factory: TlsFactory,
    pub credential: Arc<Credential>,
}

/// Serve one client connection until LOGOUT, end of stream, or an
/// I/O or handshake error.
///
/// The socket is owned by the transport, so it is closed on every
/// return path, including `?` early returns.
///
/// # Errors
///
/// Returns an error if the TLS handshake fails or the stream breaks
/// mid-session. A client that simply disconnects is not an error.
pub async fn handle_connection<S: Stream + 'static>(
    stream: S,
    context: &SessionContext,
) -> Result<()> {
    let transport = match context.mode {
        ServerMode::StartTls => Transport::plaintext(stream),
        ServerMode::ImplicitTls => Transport::secure(stream, &context.factory).await?,
    };
    let mut session = Session::new(transport.mode(), Arc::clone(&context.credential));

    serve(transport, &mut session, &context.factory).await
}

async fn serve(
    mut transport: Transport,
    session: &mut Session,
    factory: &TlsFactory,
) -> Result<()> {
    transport.write(GREETING.as_bytes()).await?;

    while let Some(line) = transport.read_line().await? {
        let command = Command::parse(&line);
        if command.name == "LOGIN" {
            debug!(tag = %command.tag, "Client: LOGIN <redacted>");
        } else {
            debug!("Client: {line}");
        }

        match dispatch(session, &command) {
            Outcome::Reply(response) => {
                transport.write(&response.to_bytes()).await?;
            }
            Outcome::StartTls(response) => {
                transport.write(&response.to_bytes()).await?;
                transport = transport.upgrade(factory).await?;
                session.mark_secure();
                info!("Connection upgraded to TLS");
            }
            Outcome::Challenge(complete) => {
                transport.write(CONTINUATION.as_bytes()).await?;
                let Some(reply) = transport.read_line().await? else {
                    debug!("Client disconnected during authentication");
                    break;
                };
                let response = complete(session, &reply);
                transport.write(&response.to_bytes()).await?;
            }
            Outcome::Logout(response) => {
                transport.write(&response.to_bytes()).await?;
                debug!("Client logged out");
                break;
            }
        }
    }

    transport.shutdown().await;
    Ok(())
}
