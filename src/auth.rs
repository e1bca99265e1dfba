//! Credential validation
//!
//! LOGIN and `AUTHENTICATE PLAIN` extract a username/password pair in
//! different ways and then both go through [`verify`].

use crate::session::Session;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use thiserror::Error;
use tracing::{info, warn};

/// Why a SASL PLAIN payload could not be turned into credentials.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SaslError {
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("payload is not UTF-8")]
    Utf8,

    #[error("expected authzid NUL authcid NUL password")]
    Fields,
}

/// Compare the pair against the session's credential. A match moves
/// the session to the authenticated state; a mismatch leaves it as is.
pub fn verify(session: &mut Session, username: &str, password: &str) -> bool {
    if session.credential().matches(username, password) {
        session.mark_authenticated();
        info!(username, "Authentication successful");
        true
    } else {
        warn!(username, "Authentication failed");
        false
    }
}

/// Decode a base64 SASL PLAIN response (RFC 4616) into
/// `(authcid, password)`.
///
/// The authorization identity is ignored, as is anything after a NUL
/// following the password.
///
/// # Errors
///
/// Returns an error if the payload is not base64, does not decode to
/// UTF-8, or has fewer than three NUL-separated fields.
pub fn decode_sasl_plain(payload: &str) -> Result<(String, String), SaslError> {
    let decoded = BASE64.decode(payload.trim())?;
    let text = String::from_utf8(decoded).map_err(|_| SaslError::Utf8)?;

    let mut fields = text.split('\0');
    match (fields.nth(1), fields.next()) {
        (Some(authcid), Some(password)) => Ok((authcid.to_string(), password.to_string())),
        _ => Err(SaslError::Fields),
    }
}

/// Split LOGIN arguments into `(username, password)`.
///
/// The password is everything after the first run of whitespace.
/// Surrounding double quotes are stripped from both.
#[must_use]
pub fn parse_login(remainder: &str) -> (String, String) {
    let remainder = remainder.trim();
    let (username, password) = remainder
        .split_once(char::is_whitespace)
        .unwrap_or((remainder, ""));

    (unquote(username), unquote(password.trim_start()))
}

fn unquote(s: &str) -> String {
    s.trim_matches('"').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Credential;
    use crate::transport::TransportMode;
    use std::sync::Arc;

    fn encode(raw: &str) -> String {
        BASE64.encode(raw)
    }

    #[test]
    fn decodes_plain_blob() {
        let blob = encode("\0user\0password");
        assert_eq!(
            decode_sasl_plain(&blob).unwrap(),
            ("user".to_string(), "password".to_string())
        );
    }

    #[test]
    fn authzid_is_ignored() {
        let blob = encode("admin\0user\0password");
        let (username, _) = decode_sasl_plain(&blob).unwrap();
        assert_eq!(username, "user");
    }

    #[test]
    fn rejects_non_base64() {
        assert!(matches!(
            decode_sasl_plain("not base64!"),
            Err(SaslError::Base64(_))
        ));
    }

    #[test]
    fn rejects_missing_fields() {
        assert_eq!(decode_sasl_plain(&encode("user")), Err(SaslError::Fields));
        assert_eq!(decode_sasl_plain(&encode("\0user")), Err(SaslError::Fields));
    }

    #[test]
    fn fields_after_password_are_ignored() {
        let expected = ("user".to_string(), "password".to_string());
        assert_eq!(
            decode_sasl_plain(&encode("\0user\0password\0")).unwrap(),
            expected
        );
        assert_eq!(
            decode_sasl_plain(&encode("\0user\0password\0extra")).unwrap(),
            expected
        );
    }

    #[test]
    fn rejects_non_utf8() {
        let blob = BASE64.encode([0u8, 0xff, 0, 0xfe]);
        assert_eq!(decode_sasl_plain(&blob), Err(SaslError::Utf8));
    }

    #[test]
    fn login_strips_quotes() {
        assert_eq!(
            parse_login("\"user\" \"password\""),
            ("user".to_string(), "password".to_string())
        );
        assert_eq!(
            parse_login("user password"),
            ("user".to_string(), "password".to_string())
        );
    }

    #[test]
    fn login_without_password() {
        assert_eq!(parse_login("user"), ("user".to_string(), String::new()));
    }

    #[test]
    fn verify_sets_authenticated_only_on_match() {
        let mut session = Session::new(TransportMode::Plaintext, Arc::new(Credential::default()));

        assert!(!verify(&mut session, "user", "nope"));
        assert!(!session.is_authenticated());

        assert!(verify(&mut session, "user", "password"));
        assert!(session.is_authenticated());
    }
}
