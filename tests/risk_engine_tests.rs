//! Risk pipeline over synthetic scan results

use proptest::prelude::*;
use std::time::Duration;
use surfacemap::risk::{self, RiskAssessor};
use surfacemap::services::{self, WELL_KNOWN_SERVICES};
use surfacemap::{
    OpenPortFinding, PortScanResult, RatingTier, RiskCatalog, RiskTier, ScanReport, ScanTarget,
};

fn scan_of(ports: &[u16]) -> PortScanResult {
    let mut open: Vec<OpenPortFinding> = ports
        .iter()
        .map(|&p| OpenPortFinding::new(p, services::identify(p)))
        .collect();
    open.sort_by_key(|f| f.port);
    PortScanResult {
        target: ScanTarget::parse("203.0.113.9", 1, 65535).unwrap(),
        open_ports: open,
        ports_scanned: 65535,
        probe_errors: 0,
        duration: Duration::from_secs(30),
    }
}

#[test]
fn test_exposed_legacy_host() {
    let report = ScanReport::build(scan_of(&[21, 23, 139, 445, 3389]), RiskCatalog::builtin());

    assert!(report.findings.iter().all(|f| f.tier == RiskTier::High));
    assert_eq!(report.security_score, 0);
    assert_eq!(report.rating(), RatingTier::Critical);
    assert_eq!(report.summary.high_risk_count, 5);
    assert_eq!(
        report.summary.priority_actions,
        vec!["Address 5 HIGH risk service(s) immediately".to_string()]
    );

    assert!(report.attack_scenarios[0].starts_with("CRITICAL:"));
    assert!(report.attack_scenarios.iter().any(|s| s.contains("Telnet(23)")));
    assert!(report
        .attack_scenarios
        .last()
        .unwrap()
        .starts_with("ATTACK SURFACE SUMMARY: 5 HIGH"));
}

#[test]
fn test_hardened_web_host() {
    let report = ScanReport::build(scan_of(&[22, 443]), RiskCatalog::builtin());
    assert_eq!(report.security_score, 90);
    assert_eq!(report.rating(), RatingTier::Excellent);
    assert_eq!(report.summary.low_risk_count, 2);
}

#[test]
fn test_custom_port_uses_fallback() {
    let report = ScanReport::build(scan_of(&[31337]), RiskCatalog::builtin());
    let finding = &report.findings[0];
    assert_eq!(finding.service, services::UNKNOWN_SERVICE);
    assert_eq!(finding.tier, RiskTier::Medium);
    assert_eq!(finding.rationale, "Non-standard or unidentified service");
    assert_eq!(report.security_score, 90);
}

#[test]
fn test_every_well_known_port_round_trips_through_catalog() {
    let catalog = RiskCatalog::new();
    let ports: Vec<u16> = WELL_KNOWN_SERVICES.iter().map(|(p, _)| *p).collect();
    let findings = RiskAssessor::new(&catalog).assess(&scan_of(&ports).open_ports);

    assert_eq!(findings.len(), ports.len());
    for finding in &findings {
        assert!(catalog.contains(&finding.service));
        assert!(!finding.mitigation.is_empty());
    }
    assert_eq!(risk::score(&findings), 0);
}

fn well_known_port() -> impl Strategy<Value = u16> {
    prop::sample::select(WELL_KNOWN_SERVICES.iter().map(|(p, _)| *p).collect::<Vec<_>>())
}

proptest! {
    #[test]
    fn prop_superset_never_scores_higher(
        base in prop::collection::btree_set(well_known_port(), 0..10),
        extra in prop::collection::btree_set(1u16..=u16::MAX, 0..10),
    ) {
        let subset: Vec<u16> = base.iter().copied().collect();
        let superset: Vec<u16> = base.union(&extra).copied().collect();

        let small = ScanReport::build(scan_of(&subset), RiskCatalog::builtin());
        let large = ScanReport::build(scan_of(&superset), RiskCatalog::builtin());
        prop_assert!(large.security_score <= small.security_score);
    }

    #[test]
    fn prop_findings_follow_port_order(ports in prop::collection::btree_set(1u16..=u16::MAX, 0..40)) {
        let ports: Vec<u16> = ports.into_iter().collect();
        let report = ScanReport::build(scan_of(&ports), RiskCatalog::builtin());
        let reported: Vec<u16> = report.findings.iter().map(|f| f.port).collect();
        prop_assert_eq!(reported, ports);
        prop_assert!(report.security_score <= 100);
    }
}
