//! STARTTLS command handler.
//!
//! RFC 3501 Section 6.2.1. The handler only decides; the session loop
//! writes the OK over plaintext and then performs the handshake.

use super::Outcome;
use crate::response::Response;
use crate::session::Session;

/// Handle the STARTTLS command.
///
/// Refused whenever the connection is already secure, whether it
/// started in TLS or was upgraded earlier in this session.
#[must_use]
pub fn handle_starttls(session: &mut Session, _args: Option<&str>) -> Outcome {
    if session.transport().is_secure() {
        return Outcome::Reply(Response::bad(session.tag(), "Already using SSL"));
    }
    Outcome::StartTls(Response::ok(session.tag(), "Begin TLS negotiation now"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Credential;
    use crate::handlers::testing::{reply, session};
    use crate::transport::TransportMode;
    use std::sync::Arc;

    #[test]
    fn plaintext_session_may_upgrade() {
        let outcome = handle_starttls(&mut session("a1", false), None);
        match outcome {
            Outcome::StartTls(resp) => {
                assert_eq!(resp.to_string(), "a1 OK Begin TLS negotiation now\r\n");
            }
            other => panic!("expected StartTls, got {other:?}"),
        }
    }

    #[test]
    fn secure_session_is_refused() {
        let mut s = Session::new(TransportMode::Secure, Arc::new(Credential::default()));
        s.set_tag("a2");
        let resp = reply(handle_starttls(&mut s, None));
        assert_eq!(resp.to_string(), "a2 BAD Already using SSL\r\n");
    }
}
