//! SEARCH command handler.
//!
//! The mailbox is always empty, so every search yields the bare
//! `* SEARCH` line (RFC 3501 Section 7.2.5).

use super::Outcome;
use crate::response::Response;
use crate::session::Session;

/// Untagged result of any search over an empty mailbox.
pub(super) const EMPTY_SEARCH: &str = "SEARCH";

/// Handle the SEARCH command.
#[must_use]
pub fn handle_search(session: &mut Session, _args: Option<&str>) -> Outcome {
    let response = Response::ok(session.tag(), "SEARCH completed");
    Outcome::Reply(response.with_data(EMPTY_SEARCH))
}
