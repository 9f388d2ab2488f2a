//! Risk assessment: service risk profiles, per-port findings, the composite
//! security score and narrative attack scenarios

pub mod assessor;
pub mod catalog;
pub mod scenarios;
pub mod scoring;

use serde::{Deserialize, Serialize};

pub use assessor::RiskAssessor;
pub use catalog::{RiskCatalog, RiskProfile};
pub use scenarios::{synthesize, ServiceCategory};
pub use scoring::{rate, score, ExecutiveSummary, RatingTier, RiskCounts};

/// Qualitative severity of an exposed service
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    /// Points subtracted from the security score per finding at this tier
    pub fn penalty(&self) -> u32 {
        match self {
            RiskTier::High => 20,
            RiskTier::Medium => 10,
            RiskTier::Low => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::High => "HIGH",
            RiskTier::Medium => "MEDIUM",
            RiskTier::Low => "LOW",
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One open port joined with its risk profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFinding {
    pub port: u16,
    pub service: String,
    #[serde(rename = "risk_level")]
    pub tier: RiskTier,
    #[serde(rename = "reason")]
    pub rationale: String,
    pub mitigation: String,
}
