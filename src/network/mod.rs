//! Network module: single-port TCP probing

pub mod limits;
pub mod probe;

use serde::{Deserialize, Serialize};

pub use probe::{probe, Prober, TcpConnectProber};

/// Classification of a single connect attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The handshake completed within the timeout
    Open,
    /// Explicit refusal, or no answer before the timeout
    Closed,
    /// Any other transport-level failure (unreachable network, no route, ...)
    Error(String),
    /// The local host ran out of sockets or file descriptors. The probe
    /// says nothing about the target and the scan cannot be trusted.
    Exhausted(String),
}

impl ProbeOutcome {
    pub fn is_open(&self) -> bool {
        matches!(self, ProbeOutcome::Open)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeOutcome::Open => "open",
            ProbeOutcome::Closed => "closed",
            ProbeOutcome::Error(_) => "error",
            ProbeOutcome::Exhausted(_) => "exhausted",
        }
    }
}

impl std::fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProbeOutcome::Error(reason) => write!(f, "error ({})", reason),
            ProbeOutcome::Exhausted(reason) => write!(f, "exhausted ({})", reason),
            other => write!(f, "{}", other.as_str()),
        }
    }
}

/// Result of probing one port; errors collapse to `open == false`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortProbeResult {
    pub port: u16,
    pub open: bool,
}

impl PortProbeResult {
    pub fn new(port: u16, outcome: &ProbeOutcome) -> Self {
        Self {
            port,
            open: outcome.is_open(),
        }
    }
}
