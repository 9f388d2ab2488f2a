//! Scanner module containing the scan target model and the scanning engine

pub mod engine;

use crate::ScanError;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::ops::RangeInclusive;
use std::time::Duration;

pub use engine::{scan, ScanEngine};

/// Lowest scannable TCP port
pub const MIN_PORT: u16 = 1;

/// Highest scannable TCP port
pub const MAX_PORT: u16 = 65535;

/// Host plus inclusive port range. Construction enforces
/// `1 <= start_port <= end_port <= 65535`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScanTarget {
    host: IpAddr,
    start_port: u16,
    end_port: u16,
}

impl ScanTarget {
    pub fn new(host: IpAddr, start_port: u16, end_port: u16) -> crate::Result<Self> {
        if start_port < MIN_PORT {
            return Err(ScanError::PortRangeError(format!(
                "start_port must be >= {}",
                MIN_PORT
            )));
        }
        if start_port > end_port {
            return Err(ScanError::PortRangeError(format!(
                "start_port ({}) must not exceed end_port ({})",
                start_port, end_port
            )));
        }

        Ok(Self {
            host,
            start_port,
            end_port,
        })
    }

    /// Parse a textual IP address and build a target
    pub fn parse(host: &str, start_port: u16, end_port: u16) -> crate::Result<Self> {
        let host = host.trim();
        if host.is_empty() {
            return Err(ScanError::InvalidTarget("IP address is required".to_string()));
        }
        let ip: IpAddr = host
            .parse()
            .map_err(|_| ScanError::InvalidTarget(format!("Invalid IP address format: {}", host)))?;
        Self::new(ip, start_port, end_port)
    }

    pub fn host(&self) -> IpAddr {
        self.host
    }

    pub fn start_port(&self) -> u16 {
        self.start_port
    }

    pub fn end_port(&self) -> u16 {
        self.end_port
    }

    pub fn ports(&self) -> RangeInclusive<u16> {
        self.start_port..=self.end_port
    }

    /// Number of ports in the range (always >= 1)
    pub fn port_count(&self) -> usize {
        (self.end_port - self.start_port) as usize + 1
    }
}

impl std::fmt::Display for ScanTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}-{}]", self.host, self.start_port, self.end_port)
    }
}

/// An open port and the service label mapped to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenPortFinding {
    pub port: u16,
    pub service: String,
}

impl OpenPortFinding {
    pub fn new(port: u16, service: impl Into<String>) -> Self {
        Self {
            port,
            service: service.into(),
        }
    }
}

/// Outcome of a full range sweep
#[derive(Debug, Clone, Serialize)]
pub struct PortScanResult {
    pub target: ScanTarget,

    /// Open ports, ascending by port number
    pub open_ports: Vec<OpenPortFinding>,

    /// Number of ports probed
    pub ports_scanned: usize,

    /// Probes that failed with a transport error (counted as closed)
    pub probe_errors: usize,

    /// Wall-clock duration of the sweep
    pub duration: Duration,
}

impl PortScanResult {
    /// Get scan rate in ports per second
    pub fn scan_rate(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.ports_scanned as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }

    pub fn open_count(&self) -> usize {
        self.open_ports.len()
    }
}

/// Thread-safe open-port collector shared by scan workers
pub type ResultCollector = std::sync::Arc<tokio::sync::Mutex<Vec<OpenPortFinding>>>;
