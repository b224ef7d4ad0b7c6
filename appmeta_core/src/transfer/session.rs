use anyhow::{Context, Result, anyhow};
use std::io::Read;
use std::net::{SocketAddr, ToSocketAddrs};
use std::time::Duration;
use suppaftp::FtpStream;
use suppaftp::types::FileType;

use super::constants::{ANONYMOUS_PASSWORD, ANONYMOUS_USER};

/// One open control connection to the console
pub trait RemoteSession {
    fn login_anonymous(&mut self) -> Result<()>;

    fn change_dir(&mut self, path: &str) -> Result<()>;

    /// Store everything `reader` yields as `file_name` in the current directory.
    /// Returns the number of bytes written.
    fn store(&mut self, file_name: &str, reader: &mut dyn Read) -> Result<u64>;

    fn close(&mut self) -> Result<()>;
}

/// Opens [`RemoteSession`]s. Split out so the pipeline can run against a fake server.
pub trait Connector {
    type Session: RemoteSession;

    fn connect(&self, host: &str, port: u16, timeout: Duration) -> Result<Self::Session>;
}

/// Plain (unencrypted) FTP over `suppaftp`
#[derive(Debug, Clone, Copy, Default)]
pub struct FtpConnector;

pub struct FtpSession {
    stream: FtpStream,
    peer: SocketAddr,
}

fn resolve(host: &str, port: u16) -> Result<SocketAddr> {
    (host, port)
        .to_socket_addrs()
        .with_context(|| format!("cannot resolve {}:{}", host, port))?
        .next()
        .ok_or_else(|| anyhow!("{}:{} resolved to no address", host, port))
}

impl Connector for FtpConnector {
    type Session = FtpSession;

    fn connect(&self, host: &str, port: u16, timeout: Duration) -> Result<FtpSession> {
        let peer = resolve(host, port)?;
        tracing::debug!("Connecting to {} (timeout {:?})", peer, timeout);

        let stream = FtpStream::connect_timeout(peer, timeout)
            .with_context(|| format!("FTP connect to {} failed", peer))?;
        if let Some(welcome) = stream.get_welcome_msg() {
            tracing::debug!("Server greeting: {}", welcome.trim());
        }

        Ok(FtpSession { stream, peer })
    }
}

impl RemoteSession for FtpSession {
    fn login_anonymous(&mut self) -> Result<()> {
        self.stream
            .login(ANONYMOUS_USER, ANONYMOUS_PASSWORD)
            .context("anonymous login failed")?;
        self.stream
            .transfer_type(FileType::Binary)
            .context("cannot switch to binary mode")?;
        tracing::info!("Logged in to {} as {}", self.peer, ANONYMOUS_USER);
        Ok(())
    }

    fn change_dir(&mut self, path: &str) -> Result<()> {
        self.stream
            .cwd(path)
            .with_context(|| format!("CWD {} failed", path))
    }

    fn store(&mut self, file_name: &str, mut reader: &mut dyn Read) -> Result<u64> {
        self.stream
            .put_file(file_name, &mut reader)
            .with_context(|| format!("STOR {} failed", file_name))
    }

    fn close(&mut self) -> Result<()> {
        self.stream.quit().context("QUIT failed")
    }
}
