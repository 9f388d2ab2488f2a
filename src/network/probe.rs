//! TCP connect probing

use super::ProbeOutcome;
use async_trait::async_trait;
use std::io;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tokio::net::TcpStream;

/// A single-attempt port probe. Implementations must not retry.
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, addr: SocketAddr, timeout: Duration) -> ProbeOutcome;
}

/// Full three-way-handshake probe using the OS connect call
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpConnectProber;

impl TcpConnectProber {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Prober for TcpConnectProber {
    async fn probe(&self, addr: SocketAddr, timeout: Duration) -> ProbeOutcome {
        match tokio::time::timeout(timeout, TcpStream::connect(addr)).await {
            Ok(Ok(stream)) => {
                // Connection successful - close immediately
                drop(stream);
                ProbeOutcome::Open
            }
            Ok(Err(e)) => classify_connect_error(&e),
            Err(_) => ProbeOutcome::Closed,
        }
    }
}

/// Probe `host:port` once with a plain TCP connect
pub async fn probe(host: IpAddr, port: u16, timeout: Duration) -> ProbeOutcome {
    TcpConnectProber.probe(SocketAddr::new(host, port), timeout).await
}

fn classify_connect_error(err: &io::Error) -> ProbeOutcome {
    if is_local_exhaustion(err) {
        return ProbeOutcome::Exhausted(err.to_string());
    }
    match err.kind() {
        io::ErrorKind::ConnectionRefused
        | io::ErrorKind::ConnectionReset
        | io::ErrorKind::TimedOut => ProbeOutcome::Closed,
        _ => ProbeOutcome::Error(err.to_string()),
    }
}

/// Out of descriptors, ephemeral ports or buffer space on this host
fn is_local_exhaustion(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::AddrNotAvailable
        || err.raw_os_error().map_or(false, is_exhaustion_code)
}

#[cfg(unix)]
fn is_exhaustion_code(code: i32) -> bool {
    matches!(
        code,
        libc::EMFILE | libc::ENFILE | libc::EADDRNOTAVAIL | libc::ENOBUFS
    )
}

#[cfg(not(unix))]
fn is_exhaustion_code(_code: i32) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, TcpListener};

    const LOCALHOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

    #[tokio::test]
    async fn test_probe_open_listener() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        let outcome = probe(LOCALHOST, port, Duration::from_millis(500)).await;
        assert_eq!(outcome, ProbeOutcome::Open);
    }

    #[tokio::test]
    async fn test_probe_closed_port() {
        // Bind then release to get a port nothing listens on
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let outcome = probe(LOCALHOST, port, Duration::from_millis(500)).await;
        assert!(!outcome.is_open());
    }

    #[test]
    fn test_classify_connect_error() {
        let refused = io::Error::new(io::ErrorKind::ConnectionRefused, "refused");
        assert_eq!(classify_connect_error(&refused), ProbeOutcome::Closed);

        let timed_out = io::Error::new(io::ErrorKind::TimedOut, "timed out");
        assert_eq!(classify_connect_error(&timed_out), ProbeOutcome::Closed);

        let unreachable = io::Error::new(io::ErrorKind::Other, "network unreachable");
        assert!(matches!(classify_connect_error(&unreachable), ProbeOutcome::Error(_)));

        let no_local_port = io::Error::new(io::ErrorKind::AddrNotAvailable, "no ports left");
        assert!(matches!(classify_connect_error(&no_local_port), ProbeOutcome::Exhausted(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_descriptor_exhaustion_is_not_a_closed_port() {
        for code in [libc::EMFILE, libc::ENFILE, libc::EADDRNOTAVAIL] {
            let err = io::Error::from_raw_os_error(code);
            assert!(
                matches!(classify_connect_error(&err), ProbeOutcome::Exhausted(_)),
                "errno {} not treated as exhaustion",
                code
            );
        }
        let unreachable = io::Error::from_raw_os_error(libc::EHOSTUNREACH);
        assert!(matches!(classify_connect_error(&unreachable), ProbeOutcome::Error(_)));
    }
}
