//! UID command handler.
//!
//! Supports `UID SEARCH` (always empty) and `UID FETCH` (never any
//! data). Other UID subcommands are rejected.

use super::Outcome;
use super::search::EMPTY_SEARCH;
use crate::response::Response;
use crate::session::Session;

/// Handle the UID command.
#[must_use]
pub fn handle_uid(session: &mut Session, args: Option<&str>) -> Outcome {
    let Some(subcommand) = args.and_then(|a| a.split_whitespace().next()) else {
        return Outcome::Reply(Response::bad(session.tag(), "UID requires subcommand"));
    };

    let response = match subcommand.to_ascii_uppercase().as_str() {
        "SEARCH" => {
            Response::ok(session.tag(), "UID SEARCH completed").with_data(EMPTY_SEARCH)
        }
        "FETCH" => Response::ok(session.tag(), "UID FETCH completed"),
        _ => Response::bad(session.tag(), "UID subcommand not recognized"),
    };
    Outcome::Reply(response)
}
