//! Secure-transport factory
//!
//! Wraps a `tokio-rustls` acceptor built either from a PEM keystore on
//! disk or from a certificate generated at startup. The fixture is
//! deliberately insecure; never point production clients at it.

use crate::error::{Error, Result};
use rcgen::generate_simple_self_signed;
use rustls::pki_types::{CertificateDer, PrivateKeyDer, PrivatePkcs8KeyDer};
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_rustls::TlsAcceptor;
use tokio_rustls::server::TlsStream;
use tracing::{debug, info};

/// Names the generated default certificate is valid for.
const SELF_SIGNED_NAMES: [&str; 2] = ["localhost", "127.0.0.1"];

/// Install the `ring` crypto provider process-wide.
///
/// Several callers (the binary, tests, the client helper) may race to
/// install it, so an already-installed provider is not an error.
pub fn install_crypto_provider() {
    let _ = rustls::crypto::ring::default_provider().install_default();
}

/// Capability to turn a raw byte stream into a server-side TLS stream.
#[derive(Clone)]
pub struct TlsFactory {
    acceptor: TlsAcceptor,
}

impl TlsFactory {
    /// Pick the keystore on disk when one is given, otherwise fall back
    /// to a freshly generated self-signed certificate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Keystore`] if the certificate cannot be loaded
    /// or generated.
    pub fn load(keystore: Option<&Path>, passphrase: Option<&str>) -> Result<Self> {
        match keystore {
            Some(path) => {
                info!("Loading keystore from: {}", path.display());
                Self::from_keystore(path, passphrase)
            }
            None => {
                info!("Loading default keystore (generated self-signed certificate)");
                Self::self_signed()
            }
        }
    }

    /// Build from a PEM bundle holding the certificate chain followed by
    /// (or preceded by) one unencrypted private key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Keystore`] if the passphrase is empty, the file
    /// cannot be read, or it lacks a usable certificate and key.
    pub fn from_keystore(path: &Path, passphrase: Option<&str>) -> Result<Self> {
        if passphrase.is_some_and(str::is_empty) {
            return Err(Error::Keystore("Keystore passphrase is empty".into()));
        }

        let pem = std::fs::read(path)
            .map_err(|e| Error::Keystore(format!("Cannot read {}: {e}", path.display())))?;

        let mut reader = pem.as_slice();
        let certs = rustls_pemfile::certs(&mut reader)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::Keystore(format!("Invalid certificate PEM: {e}")))?;
        if certs.is_empty() {
            return Err(Error::Keystore(format!(
                "No certificate found in {}",
                path.display()
            )));
        }

        let mut reader = pem.as_slice();
        let key = rustls_pemfile::private_key(&mut reader)
            .map_err(|e| Error::Keystore(format!("Invalid private key PEM: {e}")))?
            .ok_or_else(|| {
                Error::Keystore(format!("No private key found in {}", path.display()))
            })?;

        Self::from_parts(certs, key)
    }

    /// Generate a self-signed certificate for `localhost` and
    /// `127.0.0.1`. This stands in for a bundled keystore.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Keystore`] if certificate generation fails.
    pub fn self_signed() -> Result<Self> {
        let names = SELF_SIGNED_NAMES.iter().map(ToString::to_string).collect::<Vec<_>>();
        let cert = generate_simple_self_signed(names)
            .map_err(|e| Error::Keystore(format!("Failed to generate certificate: {e}")))?;

        let cert_der = cert.cert.der().clone();
        let key_der = PrivatePkcs8KeyDer::from(cert.key_pair.serialize_der());

        Self::from_parts(vec![cert_der], key_der.into())
    }

    fn from_parts(
        certs: Vec<CertificateDer<'static>>,
        key: PrivateKeyDer<'static>,
    ) -> Result<Self> {
        install_crypto_provider();

        let tls_config = rustls::ServerConfig::builder()
            .with_no_client_auth()
            .with_single_cert(certs, key)
            .map_err(|e| Error::Keystore(format!("Unusable certificate or key: {e}")))?;

        Ok(Self {
            acceptor: TlsAcceptor::from(Arc::new(tls_config)),
        })
    }

    /// Run the server side of the TLS handshake over `stream`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Tls`] if the handshake fails.
    pub async fn accept<S>(&self, stream: S) -> Result<TlsStream<S>>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let tls_stream = self
            .acceptor
            .accept(stream)
            .await
            .map_err(|e| Error::Tls(format!("Handshake failed: {e}")))?;
        debug!("TLS handshake completed");
        Ok(tls_stream)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("imap-tls-fixture-{}-{name}", std::process::id()))
    }

    #[test]
    fn self_signed_builds() {
        assert!(TlsFactory::self_signed().is_ok());
    }

    #[test]
    fn loads_pem_bundle() {
        let cert = generate_simple_self_signed(vec!["localhost".to_string()]).unwrap();
        let bundle = format!("{}{}", cert.cert.pem(), cert.key_pair.serialize_pem());
        let path = temp_path("bundle.pem");
        std::fs::write(&path, bundle).unwrap();

        let result = TlsFactory::load(Some(&path), Some("qwe"));
        std::fs::remove_file(&path).ok();

        assert!(result.is_ok());
    }

    #[test]
    fn bundle_without_key_is_rejected() {
        let cert = generate_simple_self_signed(vec!["localhost".to_string()]).unwrap();
        let path = temp_path("cert-only.pem");
        std::fs::write(&path, cert.cert.pem()).unwrap();

        let result = TlsFactory::from_keystore(&path, None);
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(Error::Keystore(msg)) if msg.contains("No private key")));
    }

    #[test]
    fn missing_keystore_is_rejected() {
        let result = TlsFactory::from_keystore(&temp_path("does-not-exist.pem"), None);
        assert!(matches!(result, Err(Error::Keystore(_))));
    }

    #[test]
    fn empty_passphrase_is_rejected() {
        let result = TlsFactory::from_keystore(&temp_path("unused.pem"), Some(""));
        assert!(matches!(result, Err(Error::Keystore(msg)) if msg.contains("passphrase")));
    }
}
