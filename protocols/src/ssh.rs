//! SSH password authentication via libssh2.
//!
//! The handshake is blocking, so every attempt runs on the blocking pool.
//! No host-key verification is performed; unknown hosts are accepted.

use std::net::{IpAddr, SocketAddr, TcpStream};
use std::time::Duration;

use anyhow::Context;
use ssh2::Session;
use sprayr_common::model::credential::Credential;
use tracing::trace;

/// One SSH connect + password try against `host:port`.
pub async fn try_login(
    host: IpAddr,
    port: u16,
    credential: &Credential,
    timeout: Duration,
) -> anyhow::Result<bool> {
    let addr = SocketAddr::new(host, port);
    let username = credential.username.clone();
    let password = credential.password.clone();

    tokio::task::spawn_blocking(move || authenticate(addr, &username, &password, timeout))
        .await
        .context("ssh probe task aborted")?
}

fn authenticate(
    addr: SocketAddr,
    username: &str,
    password: &str,
    timeout: Duration,
) -> anyhow::Result<bool> {
    let tcp = TcpStream::connect_timeout(&addr, timeout)
        .with_context(|| format!("tcp connect to {addr} failed"))?;
    tcp.set_read_timeout(Some(timeout))?;
    tcp.set_write_timeout(Some(timeout))?;

    let mut session = Session::new().context("failed to create ssh session")?;
    session.set_tcp_stream(tcp);
    session.set_timeout(timeout.as_millis() as u32);
    session
        .handshake()
        .with_context(|| format!("ssh handshake with {addr} failed"))?;

    // Auth errors count as a rejection; only transport-level failures
    // above bubble up as probe errors.
    match session.userauth_password(username, password) {
        Ok(()) if session.authenticated() => {
            trace!("ssh login accepted on {addr} for user '{username}'");
            let _ = session.disconnect(None, "done", None);
            Ok(true)
        }
        Ok(()) => Ok(false),
        Err(err) => {
            trace!("ssh login rejected on {addr} for user '{username}': {err}");
            Ok(false)
        }
    }
}
