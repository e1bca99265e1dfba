//! CLOSE command handler.

use super::Outcome;
use crate::response::Response;
use crate::session::Session;

/// Handle the CLOSE command.
#[must_use]
pub fn handle_close(session: &mut Session, _args: Option<&str>) -> Outcome {
    Outcome::Reply(Response::ok(session.tag(), "CLOSE completed"))
}
