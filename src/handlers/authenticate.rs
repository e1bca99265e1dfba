//! AUTHENTICATE command handler.
//!
//! Only the SASL PLAIN mechanism (RFC 4616) is offered, without an
//! initial response:
//!
//! ```text
//!   Client:  a1 AUTHENTICATE PLAIN
//!   Server:  +
//!   Client:  AHVzZXIAcGFzc3dvcmQ=
//!   Server:  a1 OK AUTHENTICATE completed
//! ```

use super::Outcome;
use crate::auth::{decode_sasl_plain, verify};
use crate::response::Response;
use crate::session::Session;
use tracing::debug;

/// Handle the AUTHENTICATE command.
#[must_use]
pub fn handle_authenticate(session: &mut Session, args: Option<&str>) -> Outcome {
    let Some(mechanism) = args else {
        return Outcome::Reply(Response::bad(
            session.tag(),
            "AUTHENTICATE requires mechanism",
        ));
    };

    if mechanism.eq_ignore_ascii_case("PLAIN") {
        Outcome::Challenge(complete_plain)
    } else {
        Outcome::Reply(Response::no(
            session.tag(),
            "AUTHENTICATE mechanism not supported",
        ))
    }
}

/// Check the base64 SASL PLAIN response sent after the continuation.
#[must_use]
pub fn complete_plain(session: &mut Session, payload: &str) -> Response {
    match decode_sasl_plain(payload) {
        Ok((username, password)) => {
            if verify(session, &username, &password) {
                Response::ok(session.tag(), "AUTHENTICATE completed")
            } else {
                Response::no(session.tag(), "AUTHENTICATE failed")
            }
        }
        Err(e) => {
            debug!(error = %e, "Undecodable SASL PLAIN response");
            Response::bad(session.tag(), "Invalid credentials format")
        }
    }
}
