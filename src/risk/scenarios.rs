//! Attack scenario narratives
//!
//! Findings are grouped by the service category recorded in the risk
//! catalog. One line is produced per
//! category present, ordered by the worst tier inside the category and then
//! by where the category first appears in the findings. A closing summary
//! line describes the overall exposure. The text is advisory only and has
//! no influence on the score.

use super::{RiskCatalog, RiskCounts, RiskFinding, RiskTier};
use serde::Serialize;

/// Service families that share an exploitation path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategory {
    RemoteAccess,
    FileSharing,
    Database,
    Web,
    Mail,
    Infrastructure,
}

impl ServiceCategory {
    pub fn title(&self) -> &'static str {
        match self {
            ServiceCategory::RemoteAccess => "Remote Access Exploitation",
            ServiceCategory::FileSharing => "Lateral Movement Vector",
            ServiceCategory::Database => "Database Compromise",
            ServiceCategory::Web => "Web Service Exploitation",
            ServiceCategory::Mail => "Email Service Abuse",
            ServiceCategory::Infrastructure => "Directory & Infrastructure Abuse",
        }
    }

    fn noun(&self) -> &'static str {
        match self {
            ServiceCategory::RemoteAccess => "remote access services",
            ServiceCategory::FileSharing => "file sharing/transfer services",
            ServiceCategory::Database => "database services",
            ServiceCategory::Web => "web services",
            ServiceCategory::Mail => "email services",
            ServiceCategory::Infrastructure => "directory and infrastructure services",
        }
    }

    fn narrative(&self) -> &'static str {
        match self {
            ServiceCategory::RemoteAccess => {
                "Attackers can run credential-stuffing or brute-force campaigns against these \
                 logins to gain shell or desktop access. Implement MFA, use a VPN, and enforce \
                 strong password policies."
            }
            ServiceCategory::FileSharing => {
                "A compromised host can use these services to move laterally across the network \
                 and exfiltrate or encrypt sensitive data. Restrict shares and require \
                 authenticated, encrypted transfer."
            }
            ServiceCategory::Database => {
                "Direct database access bypasses application security controls and can lead to a \
                 complete data breach. Implement network segmentation immediately."
            }
            ServiceCategory::Web => {
                "These are common vectors for credential harvesting, session hijacking, and \
                 application exploits. Serve everything over HTTPS, patch frameworks, and place a \
                 Web Application Firewall in front."
            }
            ServiceCategory::Mail => {
                "Misconfigured mail servers can be abused as open relays for spam and phishing or \
                 targeted with password spraying. Enforce authentication and disable legacy \
                 protocols."
            }
            ServiceCategory::Infrastructure => {
                "Exposed directory and infrastructure services enable account enumeration, cache \
                 poisoning, amplification attacks, and control-plane takeover. Restrict them to \
                 internal management networks."
            }
        }
    }
}

fn severity_marker(tier: RiskTier) -> &'static str {
    match tier {
        RiskTier::High => "CRITICAL",
        RiskTier::Medium => "HIGH",
        RiskTier::Low => "ADVISORY",
    }
}

struct CategoryGroup<'a> {
    category: ServiceCategory,
    worst: RiskTier,
    members: Vec<&'a RiskFinding>,
}

/// Derive narrative attack scenarios from ordered risk findings
pub fn synthesize(findings: &[RiskFinding], catalog: &RiskCatalog) -> Vec<String> {
    if findings.is_empty() {
        return vec!["No open ports detected. Current attack surface is minimal.".to_string()];
    }

    // Groups are created in first-appearance order
    let mut groups: Vec<CategoryGroup> = Vec::new();
    for finding in findings {
        let Some(category) = catalog.lookup(&finding.service).category else {
            continue;
        };
        match groups.iter_mut().find(|g| g.category == category) {
            Some(group) => {
                group.worst = group.worst.max(finding.tier);
                group.members.push(finding);
            }
            None => groups.push(CategoryGroup {
                category,
                worst: finding.tier,
                members: vec![finding],
            }),
        }
    }

    // Stable sort keeps first-appearance order among equal severities
    groups.sort_by(|a, b| b.worst.cmp(&a.worst));

    let mut scenarios: Vec<String> = groups.iter().map(describe_group).collect();
    scenarios.push(summary_line(findings));

    log::info!("Generated {} attack scenarios", scenarios.len());
    scenarios
}

fn describe_group(group: &CategoryGroup) -> String {
    let services = group
        .members
        .iter()
        .map(|f| format!("{}({})", f.service, f.port))
        .collect::<Vec<_>>()
        .join(", ");

    let mut line = format!(
        "{}: {} - Detected {} ({}). {}",
        severity_marker(group.worst),
        group.category.title(),
        group.category.noun(),
        services,
        group.category.narrative()
    );

    if group.members.iter().any(|f| f.service == "Telnet") {
        line.push_str(
            " Telnet transmits every keystroke, credentials included, in plaintext; anyone on \
             the network path can capture logins without special tools.",
        );
    }

    line
}

fn summary_line(findings: &[RiskFinding]) -> String {
    let counts = RiskCounts::tally(findings);
    let total = counts.total();

    match counts.worst() {
        Some(RiskTier::High) => format!(
            "ATTACK SURFACE SUMMARY: {} HIGH risk service(s) among {} open port(s). This \
             represents a high risk of compromise; remediate every HIGH risk service before \
             anything else.",
            counts.high, total
        ),
        Some(RiskTier::Medium) => format!(
            "ATTACK SURFACE SUMMARY: {} MEDIUM risk service(s) among {} open port(s). Address \
             them within the regular patch and hardening cycle and layer defenses around them.",
            counts.medium, total
        ),
        _ => format!(
            "ATTACK SURFACE SUMMARY: {} open port(s), all LOW risk. The attack surface is \
             minimal; maintain it through regular monitoring and updates.",
            total
        ),
    }
}
