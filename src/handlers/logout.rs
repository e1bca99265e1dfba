//! LOGOUT command handler.
//!
//! The server sends a BYE untagged response (indicating the connection
//! is ending) followed by the tagged OK, then closes the connection.

use super::Outcome;
use crate::response::Response;
use crate::session::Session;

/// Handle the LOGOUT command. Sends BYE + tagged OK.
#[must_use]
pub fn handle_logout(session: &mut Session, _args: Option<&str>) -> Outcome {
    let response = Response::ok(session.tag(), "LOGOUT completed");
    Outcome::Logout(response.with_data("BYE Server logging out"))
}
