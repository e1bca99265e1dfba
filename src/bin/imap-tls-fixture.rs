#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Launcher for the IMAP TLS fixture server

use clap::Parser;
use imap_tls_fixture::{ImapServer, ServerConfig, ServerMode, TlsFactory};
use std::net::IpAddr;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "imap-tls-fixture")]
#[command(
    about = "Disposable IMAP server for testing client TLS (STARTTLS or implicit TLS)"
)]
struct Args {
    /// Server type: TLS (STARTTLS upgrade) or SSL (TLS from the first byte)
    mode: Option<String>,

    /// PEM file with certificate chain and private key
    /// (default: generated self-signed certificate)
    keystore: Option<PathBuf>,

    /// Keystore passphrase
    keystore_password: Option<String>,

    /// Port to listen on
    #[arg(long)]
    port: Option<u16>,

    /// Address to bind
    #[arg(long)]
    bind: Option<IpAddr>,

    /// Accepted username
    #[arg(long)]
    username: Option<String>,

    /// Accepted password
    #[arg(long)]
    password: Option<String>,
}

impl Args {
    /// Layer command-line values over the environment configuration.
    /// Blank positional values count as absent.
    fn apply(self, mut config: ServerConfig) -> anyhow::Result<ServerConfig> {
        if let Some(mode) = non_blank(self.mode) {
            config.mode = ServerMode::parse(&mode)?;
        }
        if let Some(keystore) = self.keystore.filter(|p| !p.as_os_str().is_empty()) {
            config.keystore = Some(keystore);
        }
        if let Some(password) = non_blank(self.keystore_password) {
            config.keystore_password = Some(password);
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(bind) = self.bind {
            config.bind = bind;
        }
        if let Some(username) = non_blank(self.username) {
            config.credential.username = username;
        }
        if let Some(password) = non_blank(self.password) {
            config.credential.password = password;
        }
        Ok(config)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = args.apply(ServerConfig::from_env()?)?;

    let factory = TlsFactory::load(
        config.keystore.as_deref(),
        config.keystore_password.as_deref(),
    )?;
    let server = ImapServer::bind(&config, factory).await?;
    let addr = server.local_addr()?;

    info!("{} server started on port {}", config.mode.description(), addr.port());
    info!("Accepting user: {}", config.credential.username);
    info!("Press Ctrl+C to stop");

    tokio::select! {
        () = server.run() => {}
        result = tokio::signal::ctrl_c() => {
            result?;
            info!("Shutting down");
        }
    }

    Ok(())
}
