//! Open port → risk finding join

use super::{RiskCatalog, RiskFinding};
use crate::scanner::OpenPortFinding;

/// Joins open-port findings with catalog profiles, preserving input order
#[derive(Debug, Clone, Copy)]
pub struct RiskAssessor<'a> {
    catalog: &'a RiskCatalog,
}

impl<'a> RiskAssessor<'a> {
    pub fn new(catalog: &'a RiskCatalog) -> Self {
        Self { catalog }
    }

    pub fn assess(&self, open_ports: &[OpenPortFinding]) -> Vec<RiskFinding> {
        open_ports
            .iter()
            .map(|finding| {
                let profile = self.catalog.lookup(&finding.service);
                log::debug!("Port {} ({}): {} risk", finding.port, finding.service, profile.tier);
                RiskFinding {
                    port: finding.port,
                    service: finding.service.clone(),
                    tier: profile.tier,
                    rationale: profile.rationale.to_string(),
                    mitigation: profile.mitigation.to_string(),
                }
            })
            .collect()
    }
}
