//! EXPUNGE command handler.
//!
//! Nothing is ever marked `\Deleted`, so there are no `* n EXPUNGE`
//! lines to send.

use super::Outcome;
use crate::response::Response;
use crate::session::Session;

/// Handle the EXPUNGE command.
#[must_use]
pub fn handle_expunge(session: &mut Session, _args: Option<&str>) -> Outcome {
    Outcome::Reply(Response::ok(session.tag(), "EXPUNGE completed"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testing::{reply, session};

    #[test]
    fn returns_only_ok() {
        let resp = reply(handle_expunge(&mut session("E1", true), None));
        assert!(resp.untagged.is_empty());
        assert_eq!(resp.to_string(), "E1 OK EXPUNGE completed\r\n");
    }
}
