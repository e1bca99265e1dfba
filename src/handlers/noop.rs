//! NOOP command handler.
//!
//! RFC 3501 Section 6.1.2 requires this command. Clients use it for
//! keepalive and polling. No authentication needed.

use super::Outcome;
use crate::response::Response;
use crate::session::Session;

/// Handle the NOOP command.
#[must_use]
pub fn handle_noop(session: &mut Session, _args: Option<&str>) -> Outcome {
    Outcome::Reply(Response::ok(session.tag(), "NOOP completed"))
}
