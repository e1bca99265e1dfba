//! LSUB command handler. Nothing is ever subscribed.

use super::Outcome;
use crate::response::Response;
use crate::session::Session;

/// Handle the LSUB command.
#[must_use]
pub fn handle_lsub(session: &mut Session, _args: Option<&str>) -> Outcome {
    Outcome::Reply(Response::ok(session.tag(), "LSUB completed"))
}
