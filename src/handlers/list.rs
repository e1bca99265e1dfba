//! LIST command handler.
//!
//! The only mailbox that exists is INBOX. It is listed when the pattern
//! could match it, following RFC 3501 Section 7.2.2:
//!
//! ```text
//! * LIST (\HasNoChildren) "." "INBOX"
//! A0002 OK LIST completed
//! ```

use super::Outcome;
use crate::response::Response;
use crate::session::Session;

const INBOX_LINE: &str = "LIST (\\HasNoChildren) \".\" \"INBOX\"";

/// Handle the LIST command. Emits the INBOX line when the pattern
/// matches it.
#[must_use]
pub fn handle_list(session: &mut Session, args: Option<&str>) -> Outcome {
    let Some(args) = args else {
        return Outcome::Reply(Response::bad(
            session.tag(),
            "LIST requires reference and mailbox",
        ));
    };

    let mut response = Response::ok(session.tag(), "LIST completed");
    if matches_inbox(&mailbox_pattern(args)) {
        response = response.with_data(INBOX_LINE);
    }
    Outcome::Reply(response)
}

/// The mailbox pattern is the last argument; the reference name is
/// ignored.
fn mailbox_pattern(args: &str) -> String {
    args.split_whitespace()
        .next_back()
        .unwrap_or_default()
        .replace('"', "")
}

fn matches_inbox(pattern: &str) -> bool {
    pattern.is_empty()
        || pattern == "*"
        || pattern == "%"
        || pattern.eq_ignore_ascii_case("INBOX")
}
