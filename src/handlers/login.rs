//! LOGIN command handler.
//!
//! RFC 3501 Section 6.2.3. Accepted over plaintext as well as TLS; the
//! fixture does not advertise LOGINDISABLED.

use super::Outcome;
use crate::auth::{parse_login, verify};
use crate::response::Response;
use crate::session::Session;

/// Handle the LOGIN command.
#[must_use]
pub fn handle_login(session: &mut Session, args: Option<&str>) -> Outcome {
    let Some(args) = args else {
        return Outcome::Reply(Response::bad(
            session.tag(),
            "LOGIN requires username and password",
        ));
    };

    let (username, password) = parse_login(args);
    let response = if verify(session, &username, &password) {
        Response::ok(session.tag(), "LOGIN completed")
    } else {
        Response::no(session.tag(), "LOGIN failed")
    };
    Outcome::Reply(response)
}
