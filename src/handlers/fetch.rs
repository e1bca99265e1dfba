//! FETCH command handler. There are no messages to return.

use super::Outcome;
use crate::response::Response;
use crate::session::Session;

/// Handle the FETCH command.
#[must_use]
pub fn handle_fetch(session: &mut Session, _args: Option<&str>) -> Outcome {
    Outcome::Reply(Response::ok(session.tag(), "FETCH completed"))
}
