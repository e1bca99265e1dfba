//! Test harness for driving the fixture over real sockets
//!
//! ## Module layout
//!
//! - `server` -- starts an `ImapServer` on an ephemeral loopback port
//! - `client` -- a line-oriented IMAP client that can switch to TLS

#![allow(dead_code)]

mod client;
mod server;

pub use client::LineClient;
pub use server::TestServer;
