//! Server configuration
//!
//! Everything here is decided once at process start and shared
//! read-only with every connection afterwards.

use crate::error::{Error, Result};
use std::env;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use std::str::FromStr;

/// Default IMAP port, used by both server modes.
pub const DEFAULT_PORT: u16 = 143;

/// How TLS enters a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerMode {
    /// Sessions start in plaintext and may upgrade with STARTTLS
    /// (launcher selector `TLS`).
    StartTls,
    /// Sessions are wrapped in TLS from the first byte (launcher
    /// selector `SSL`).
    ImplicitTls,
}

impl ServerMode {
    /// Parse a launcher selector (`TLS` or `SSL`, any case).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for any other selector.
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TLS" => Ok(Self::StartTls),
            "SSL" => Ok(Self::ImplicitTls),
            other => Err(Error::Config(format!(
                "Invalid server type '{other}'. Use 'TLS' or 'SSL'"
            ))),
        }
    }

    /// Human-readable protocol name for the startup banner.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::StartTls => "IMAP with STARTTLS",
            Self::ImplicitTls => "IMAPS (SSL)",
        }
    }
}

impl FromStr for ServerMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// The single identity the server accepts.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub username: String,
    pub password: String,
}

impl Credential {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Whether the supplied pair is exactly this credential.
    #[must_use]
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

impl Default for Credential {
    fn default() -> Self {
        Self::new("user", "password")
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Startup configuration for the fixture server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: IpAddr,
    pub port: u16,
    pub mode: ServerMode,
    /// PEM bundle with certificate chain and private key. `None`
    /// means a self-signed certificate is generated at startup.
    pub keystore: Option<PathBuf>,
    pub keystore_password: Option<String>,
    pub credential: Credential,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            mode: ServerMode::StartTls,
            keystore: None,
            keystore_password: None,
            credential: Credential::default(),
        }
    }
}

impl ServerConfig {
    /// Load server configuration from environment variables
    ///
    /// Reads from `.env` file if present. Every variable is optional:
    /// - `IMAP_MODE` (default: `TLS`)
    /// - `IMAP_BIND` (default: `0.0.0.0`)
    /// - `IMAP_PORT` (default: `143`)
    /// - `IMAP_USERNAME` / `IMAP_PASSWORD` (default: `user` / `password`)
    /// - `IMAP_KEYSTORE` / `IMAP_KEYSTORE_PASSWORD` (default: generated
    ///   self-signed certificate)
    ///
    /// # Errors
    ///
    /// Returns an error if `IMAP_BIND`, `IMAP_PORT` or `IMAP_MODE` is set
    /// to an unparsable value.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        Ok(Self {
            bind: non_blank_var("IMAP_BIND")
                .map(|v| {
                    v.parse::<IpAddr>()
                        .map_err(|e| Error::Config(format!("Invalid IMAP_BIND: {e}")))
                })
                .transpose()?
                .unwrap_or(defaults.bind),
            port: non_blank_var("IMAP_PORT")
                .map(|v| {
                    v.parse::<u16>()
                        .map_err(|e| Error::Config(format!("Invalid IMAP_PORT: {e}")))
                })
                .transpose()?
                .unwrap_or(defaults.port),
            mode: non_blank_var("IMAP_MODE")
                .map(|v| ServerMode::parse(&v))
                .transpose()?
                .unwrap_or(defaults.mode),
            keystore: non_blank_var("IMAP_KEYSTORE").map(PathBuf::from),
            keystore_password: non_blank_var("IMAP_KEYSTORE_PASSWORD"),
            credential: Credential::new(
                non_blank_var("IMAP_USERNAME").unwrap_or(defaults.credential.username),
                non_blank_var("IMAP_PASSWORD").unwrap_or(defaults.credential.password),
            ),
        })
    }
}

fn non_blank_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mode_selectors_case_insensitively() {
        assert_eq!(ServerMode::parse("TLS").unwrap(), ServerMode::StartTls);
        assert_eq!(ServerMode::parse("tls").unwrap(), ServerMode::StartTls);
        assert_eq!(ServerMode::parse("Ssl").unwrap(), ServerMode::ImplicitTls);
    }

    #[test]
    fn rejects_unknown_mode() {
        let err = ServerMode::parse("STARTTLS").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn credential_requires_both_fields() {
        let cred = Credential::default();
        assert!(cred.matches("user", "password"));
        assert!(!cred.matches("user", "wrong"));
        assert!(!cred.matches("USER", "password"));
        assert!(!cred.matches("", ""));
    }

    #[test]
    fn debug_hides_password() {
        let cred = Credential::new("alice", "s3cret");
        let shown = format!("{cred:?}");
        assert!(shown.contains("alice"));
        assert!(!shown.contains("s3cret"));
    }

    #[test]
    fn defaults_match_launcher() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 143);
        assert_eq!(config.mode, ServerMode::StartTls);
        assert!(config.bind.is_unspecified());
        assert!(config.keystore.is_none());
    }
}
