//! Composite scan report: scan → assess → score → rate → synthesize

use crate::config::ScanConfig;
use crate::risk::{self, ExecutiveSummary, RatingTier, RiskAssessor, RiskCatalog, RiskFinding};
use crate::scanner::{PortScanResult, ScanEngine, ScanTarget};
use serde::Serialize;
use std::time::Duration;

/// Terminal artifact of one scan. Never mutated after assembly.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub target: ScanTarget,
    /// Risk findings, ascending by port
    pub findings: Vec<RiskFinding>,
    pub ports_scanned: usize,
    pub open_ports_count: usize,
    pub security_score: u8,
    pub summary: ExecutiveSummary,
    pub attack_scenarios: Vec<String>,
    pub duration: Duration,
    /// Ports per second
    pub throughput: f64,
}

impl ScanReport {
    /// Run the risk stages over a finished port scan
    pub fn build(scan: PortScanResult, catalog: &RiskCatalog) -> Self {
        let findings = RiskAssessor::new(catalog).assess(&scan.open_ports);
        let security_score = risk::score(&findings);
        let summary = risk::rate(security_score, &findings);
        let attack_scenarios = risk::synthesize(&findings, catalog);

        log::info!(
            "Risk assessment for {}: {} findings, score {}/100, rating {}",
            scan.target.host(),
            findings.len(),
            security_score,
            summary.rating
        );

        Self {
            target: scan.target,
            open_ports_count: scan.open_ports.len(),
            ports_scanned: scan.ports_scanned,
            throughput: scan.scan_rate(),
            duration: scan.duration,
            findings,
            security_score,
            summary,
            attack_scenarios,
        }
    }

    pub fn rating(&self) -> RatingTier {
        self.summary.rating
    }
}

/// Scan `target` with the worker/timeout settings of `config` and assess it
pub async fn assess_target(
    target: &ScanTarget,
    config: &ScanConfig,
    catalog: &RiskCatalog,
) -> crate::Result<ScanReport> {
    let engine = ScanEngine::from_config(config)?;
    let scan = engine.scan(target).await?;
    Ok(ScanReport::build(scan, catalog))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::RiskTier;
    use crate::scanner::OpenPortFinding;
    use std::net::{IpAddr, Ipv4Addr};

    fn scan_result(open: Vec<OpenPortFinding>) -> PortScanResult {
        PortScanResult {
            target: ScanTarget::new(IpAddr::V4(Ipv4Addr::new(192, 0, 2, 7)), 1, 1024).unwrap(),
            open_ports: open,
            ports_scanned: 1024,
            probe_errors: 0,
            duration: Duration::from_millis(2048),
        }
    }

    #[test]
    fn test_empty_scan_report() {
        let report = ScanReport::build(scan_result(Vec::new()), RiskCatalog::builtin());
        assert!(report.findings.is_empty());
        assert_eq!(report.security_score, 100);
        assert_eq!(report.rating(), RatingTier::Excellent);
        assert_eq!(report.attack_scenarios.len(), 1);
        assert!((report.throughput - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_report_joins_findings() {
        let open = vec![
            OpenPortFinding::new(21, "FTP"),
            OpenPortFinding::new(22, "SSH"),
            OpenPortFinding::new(80, "HTTP"),
        ];
        let report = ScanReport::build(scan_result(open), RiskCatalog::builtin());

        assert_eq!(report.open_ports_count, 3);
        assert_eq!(report.findings[0].tier, RiskTier::High);
        assert_eq!(report.security_score, 100 - 20 - 5 - 10);
        assert_eq!(report.rating(), RatingTier::Good);
        assert_eq!(report.summary.priority_actions.len(), 3);
    }

    #[test]
    fn test_assess_target_on_closed_port() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let target = ScanTarget::new(IpAddr::V4(Ipv4Addr::LOCALHOST), port, port).unwrap();
        let config = ScanConfig::new().with_threads(4).with_timeout(200);
        let report =
            tokio_test::block_on(assess_target(&target, &config, RiskCatalog::builtin())).unwrap();

        assert_eq!(report.ports_scanned, 1);
        assert_eq!(report.open_ports_count, 0);
        assert_eq!(report.security_score, 100);
    }

    #[test]
    fn test_scenarios_do_not_change_score() {
        let open = vec![OpenPortFinding::new(3306, "MySQL")];
        let report = ScanReport::build(scan_result(open), RiskCatalog::builtin());
        assert_eq!(report.security_score, risk::score(&report.findings));
    }
}
