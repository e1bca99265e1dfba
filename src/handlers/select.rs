//! SELECT and EXAMINE command handlers.
//!
//! Both report the same fixed, empty mailbox (RFC 3501 Section 6.3.1)
//! and neither changes the session; there is no selected state.
//!
//! ```text
//! * 0 EXISTS
//! * 0 RECENT
//! * FLAGS (\Answered \Flagged \Deleted \Seen \Draft)
//! * OK [PERMANENTFLAGS (\Answered \Flagged \Deleted \Seen \Draft \*)]
//! * OK [UIDVALIDITY 1]
//! * OK [UIDNEXT 1]
//! A0003 OK [READ-WRITE] SELECT completed
//! ```

use super::Outcome;
use crate::response::Response;
use crate::session::Session;

const MAILBOX_STATUS: [&str; 6] = [
    "0 EXISTS",
    "0 RECENT",
    "FLAGS (\\Answered \\Flagged \\Deleted \\Seen \\Draft)",
    "OK [PERMANENTFLAGS (\\Answered \\Flagged \\Deleted \\Seen \\Draft \\*)]",
    "OK [UIDVALIDITY 1]",
    "OK [UIDNEXT 1]",
];

/// Handle the SELECT command.
#[must_use]
pub fn handle_select(session: &mut Session, _args: Option<&str>) -> Outcome {
    Outcome::Reply(mailbox_status(session.tag(), "SELECT"))
}

/// Handle the EXAMINE command.
#[must_use]
pub fn handle_examine(session: &mut Session, _args: Option<&str>) -> Outcome {
    Outcome::Reply(mailbox_status(session.tag(), "EXAMINE"))
}

fn mailbox_status(tag: &str, command: &str) -> Response {
    MAILBOX_STATUS.iter().fold(
        Response::ok(tag, format!("[READ-WRITE] {command} completed")),
        |resp, line| resp.with_data(*line),
    )
}
