//! Server responses and their wire format
//!
//! A [`Response`] is zero or more untagged `*` lines followed by exactly
//! one tagged completion line (RFC 3501 Section 7). The greeting and the
//! continuation request are the only lines sent outside that shape.

use std::fmt;

/// Capabilities advertised in the greeting and by CAPABILITY.
pub const CAPABILITIES: &str = "IMAP4rev1 STARTTLS AUTH=PLAIN";

/// First line of every session, sent after any implicit TLS handshake.
pub const GREETING: &str = "* OK [CAPABILITY IMAP4rev1 STARTTLS AUTH=PLAIN] Server Ready\r\n";

/// Bare continuation request used by `AUTHENTICATE PLAIN`.
pub const CONTINUATION: &str = "+\r\n";

/// Completion status of a tagged response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    No,
    Bad,
}

impl Status {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::No => "NO",
            Self::Bad => "BAD",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Untagged lines, without the leading `* `.
    pub untagged: Vec<String>,
    pub tag: String,
    pub status: Status,
    pub text: String,
}

impl Response {
    #[must_use]
    pub fn new(tag: impl Into<String>, status: Status, text: impl Into<String>) -> Self {
        Self {
            untagged: Vec::new(),
            tag: tag.into(),
            status,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn ok(tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(tag, Status::Ok, text)
    }

    #[must_use]
    pub fn no(tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(tag, Status::No, text)
    }

    #[must_use]
    pub fn bad(tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(tag, Status::Bad, text)
    }

    /// Append an untagged line, emitted before the completion.
    #[must_use]
    pub fn with_data(mut self, line: impl Into<String>) -> Self {
        self.untagged.push(line.into());
        self
    }

    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.untagged {
            write!(f, "* {line}\r\n")?;
        }
        write!(f, "{} {} {}\r\n", self.tag, self.status, self.text)
    }
}
