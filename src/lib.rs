//! surfacemap - attack surface mapper
//!
//! Concurrent TCP connect scanning of a single host, followed by a static
//! risk assessment of every open service: per-port findings, a 0-100
//! security score, an executive rating and narrative attack scenarios.

pub mod config;
pub mod error;
pub mod network;
pub mod output;
pub mod report;
pub mod risk;
pub mod scanner;
pub mod services;

// Re-export commonly used types
pub use config::ScanConfig;
pub use error::ScanError;
pub use network::{ProbeOutcome, Prober, TcpConnectProber};
pub use report::{assess_target, ScanReport};
pub use risk::{RatingTier, RiskCatalog, RiskFinding, RiskTier};
pub use scanner::{OpenPortFinding, PortScanResult, ScanEngine, ScanTarget};

pub type Result<T> = std::result::Result<T, ScanError>;
