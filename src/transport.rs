//! Line transport for one connection
//!
//! A [`Transport`] is either plaintext or TLS-wrapped; both expose the
//! same read-line/write operations so the session loop never cares
//! which one it holds. STARTTLS swaps one for the other via
//! [`Transport::upgrade`].

use crate::error::{Error, Result};
use crate::tls::TlsFactory;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};

/// Any bidirectional byte stream a session can run over.
pub trait Stream: AsyncRead + AsyncWrite + Unpin + Send {}

impl<T> Stream for T where T: AsyncRead + AsyncWrite + Unpin + Send {}

/// Whether the bytes on the wire are currently TLS-protected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportMode {
    Plaintext,
    Secure,
}

impl TransportMode {
    #[must_use]
    pub const fn is_secure(self) -> bool {
        matches!(self, Self::Secure)
    }
}

/// The connection's current byte stream plus its mode.
///
/// Dropping a transport closes the underlying socket.
pub struct Transport {
    stream: BufReader<Box<dyn Stream>>,
    mode: TransportMode,
}

impl Transport {
    #[must_use]
    pub fn plaintext<S: Stream + 'static>(stream: S) -> Self {
        let stream: Box<dyn Stream> = Box::new(stream);
        Self {
            stream: BufReader::new(stream),
            mode: TransportMode::Plaintext,
        }
    }

    /// Perform the server handshake over `stream` before anything else
    /// is sent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Tls`] if the handshake fails.
    pub async fn secure<S: Stream + 'static>(stream: S, factory: &TlsFactory) -> Result<Self> {
        let tls_stream: Box<dyn Stream> = Box::new(factory.accept(stream).await?);
        Ok(Self {
            stream: BufReader::new(tls_stream),
            mode: TransportMode::Secure,
        })
    }

    #[must_use]
    pub const fn mode(&self) -> TransportMode {
        self.mode
    }

    /// Read one line without its CR/LF terminator.
    ///
    /// Returns `None` once the peer has closed the stream. Bytes that
    /// are not valid UTF-8 are replaced rather than treated as an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if reading from the stream fails.
    pub async fn read_line(&mut self) -> Result<Option<String>> {
        let mut buf = Vec::new();
        if self.stream.read_until(b'\n', &mut buf).await? == 0 {
            return Ok(None);
        }
        while matches!(buf.last(), Some(b'\n' | b'\r')) {
            buf.pop();
        }
        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }

    /// Write `bytes` and flush them to the peer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if writing or flushing fails.
    pub async fn write(&mut self, bytes: &[u8]) -> Result<()> {
        let stream = self.stream.get_mut();
        stream.write_all(bytes).await?;
        stream.flush().await?;
        Ok(())
    }

    /// Replace this plaintext transport with a TLS one over the same
    /// socket.
    ///
    /// Anything the client pipelined after STARTTLS is still sitting in
    /// the read buffer and is discarded here, so it can never be run as
    /// a command.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Tls`] if the transport is already secure or the
    /// handshake fails.
    pub async fn upgrade(self, factory: &TlsFactory) -> Result<Self> {
        if self.mode.is_secure() {
            return Err(Error::Tls("Transport is already secure".into()));
        }
        Self::secure(self.stream.into_inner(), factory).await
    }

    /// Close the stream, sending a TLS close_notify when secure.
    pub async fn shutdown(&mut self) {
        let _ = self.stream.get_mut().shutdown().await;
    }
}
