//! FTP password authentication over the control channel.
//!
//! Speaks just enough of the protocol to log in: read the greeting, send
//! USER, send PASS, check the reply code. 230 means logged in, 331 means
//! the server wants a password.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use anyhow::{Context, bail};
use sprayr_common::model::credential::Credential;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::trace;

/// One FTP connect + USER/PASS try against `host:port`.
pub async fn try_login(
    host: IpAddr,
    port: u16,
    credential: &Credential,
    io_timeout: Duration,
) -> anyhow::Result<bool> {
    let addr = SocketAddr::new(host, port);
    let Credential { username, password } = credential;

    let mut stream = timeout(io_timeout, TcpStream::connect(addr))
        .await
        .with_context(|| format!("tcp connect to {addr} timed out"))?
        .with_context(|| format!("tcp connect to {addr} failed"))?;

    let greeting = read_reply(&mut stream, io_timeout).await?;
    if !greeting.starts_with("220") {
        bail!("unexpected ftp greeting from {addr}: '{}'", greeting.trim());
    }

    send(&mut stream, &format!("USER {username}"), io_timeout).await?;
    let reply = read_reply(&mut stream, io_timeout).await?;
    if reply.starts_with("230") {
        // Passwordless account, the server let us straight in.
        let _ = send(&mut stream, "QUIT", io_timeout).await;
        return Ok(true);
    }
    if !reply.starts_with("331") {
        trace!("ftp user '{username}' rejected by {addr}: '{}'", reply.trim());
        return Ok(false);
    }

    send(&mut stream, &format!("PASS {password}"), io_timeout).await?;
    let reply = read_reply(&mut stream, io_timeout).await?;
    let accepted = reply.starts_with("230");
    let _ = send(&mut stream, "QUIT", io_timeout).await;

    if accepted {
        trace!("ftp login accepted on {addr} for user '{username}'");
    }
    Ok(accepted)
}

async fn send(stream: &mut TcpStream, command: &str, io_timeout: Duration) -> anyhow::Result<()> {
    let line = format!("{command}\r\n");
    timeout(io_timeout, stream.write_all(line.as_bytes()))
        .await
        .context("ftp write timed out")?
        .context("ftp write failed")?;
    Ok(())
}

async fn read_reply(stream: &mut TcpStream, io_timeout: Duration) -> anyhow::Result<String> {
    let mut buffer = vec![0u8; 1024];
    let read = timeout(io_timeout, stream.read(&mut buffer))
        .await
        .context("ftp read timed out")?
        .context("ftp read failed")?;
    if read == 0 {
        bail!("ftp server closed the connection");
    }
    Ok(String::from_utf8_lossy(&buffer[..read]).into_owned())
}
