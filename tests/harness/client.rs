//! Line-oriented IMAP client for integration tests.
//!
//! Sends raw command lines and reads raw response lines, so tests can
//! assert on the exact bytes the server puts on the wire.

use imap_tls_fixture::Stream;
use imap_tls_fixture::client::insecure_connector;
use rustls::pki_types::ServerName;
use std::net::SocketAddr;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

pub struct LineClient {
    stream: BufReader<Box<dyn Stream>>,
}

impl LineClient {
    /// Connect without TLS (STARTTLS mode).
    pub async fn connect(addr: SocketAddr) -> Self {
        let tcp: Box<dyn Stream> = Box::new(TcpStream::connect(addr).await.expect("connect"));
        Self {
            stream: BufReader::new(tcp),
        }
    }

    /// Connect and perform the TLS handshake right away (SSL mode).
    pub async fn connect_tls(addr: SocketAddr) -> Self {
        let tcp = TcpStream::connect(addr).await.expect("connect");
        Self {
            stream: BufReader::new(handshake(Box::new(tcp)).await),
        }
    }

    /// Perform the client side of the handshake on this connection,
    /// after the server has answered STARTTLS.
    pub async fn start_tls(self) -> Self {
        let raw = self.stream.into_inner();
        Self {
            stream: BufReader::new(handshake(raw).await),
        }
    }

    pub async fn send(&mut self, line: &str) {
        let stream = self.stream.get_mut();
        stream
            .write_all(format!("{line}\r\n").as_bytes())
            .await
            .expect("write");
        stream.flush().await.expect("flush");
    }

    /// Read one line without CRLF. Returns `None` at end of stream.
    pub async fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.stream.read_line(&mut line).await {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }

    /// Read one line and panic if the connection is closed.
    pub async fn line(&mut self) -> String {
        self.read_line().await.expect("connection closed")
    }

    /// Send `command` and collect lines up to and including the one
    /// tagged `tag`.
    pub async fn exchange(&mut self, tag: &str, command: &str) -> Vec<String> {
        self.send(&format!("{tag} {command}")).await;
        let mut lines = Vec::new();
        loop {
            let line = self.line().await;
            let done = line.starts_with(&format!("{tag} "));
            lines.push(line);
            if done {
                return lines;
            }
        }
    }

    /// Everything the server sends until it closes the connection,
    /// lossily decoded.
    pub async fn drain(mut self) -> String {
        let mut buf = Vec::new();
        let _ = self.stream.read_to_end(&mut buf).await;
        String::from_utf8_lossy(&buf).into_owned()
    }
}

async fn handshake(raw: Box<dyn Stream>) -> Box<dyn Stream> {
    let tls = insecure_connector()
        .connect(ServerName::try_from("localhost").expect("server name"), raw)
        .await
        .expect("TLS handshake");
    Box::new(tls)
}
