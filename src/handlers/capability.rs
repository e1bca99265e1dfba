//! CAPABILITY command handler.
//!
//! RFC 3501 Section 6.1.1. The list never changes with session state:
//! STARTTLS and AUTH=PLAIN are advertised even after an upgrade or a
//! login, since this server exists to exercise clients.

use super::Outcome;
use crate::response::{CAPABILITIES, Response};
use crate::session::Session;

/// Handle the CAPABILITY command.
#[must_use]
pub fn handle_capability(session: &mut Session, _args: Option<&str>) -> Outcome {
    Outcome::Reply(
        Response::ok(session.tag(), "CAPABILITY completed")
            .with_data(format!("CAPABILITY {CAPABILITIES}")),
    )
}
