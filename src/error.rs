//! Error types for imap-tls-fixture
//!
//! Only failures that end a connection or abort startup are modelled
//! here. Problems with a single command are answered on the wire with a
//! tagged `BAD` or `NO` and never become an [`Error`].

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TLS error: {0}")]
    Tls(String),

    #[error("Keystore error: {0}")]
    Keystore(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
