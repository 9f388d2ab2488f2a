//! Report export file
//!
//! The export wraps the wire report as-is. Nothing is recomputed here, and a
//! report saved earlier with `--output json` exports the same way as a fresh
//! one.

use super::WireReport;
use crate::report::ScanReport;
use crate::ScanError;
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const TOOL_NAME: &str = "surfacemap";
const REPORT_TYPE: &str = "Security Assessment Report";

/// Keys a saved report must carry to be exportable
const REQUIRED_FIELDS: &[&str] = &["ip", "security_score", "executive_summary", "scan_results"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportMetadata {
    pub report_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub tool_name: String,
    pub tool_version: String,
    pub report_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecommendationsSummary {
    pub immediate_actions: Vec<String>,
    pub medium_term_actions: Vec<String>,
    pub long_term_strategy: Vec<String>,
}

impl Default for RecommendationsSummary {
    fn default() -> Self {
        let owned = |items: &[&str]| -> Vec<String> { items.iter().map(|s| s.to_string()).collect() };
        Self {
            immediate_actions: owned(&[
                "Review all HIGH risk services immediately",
                "Implement network segmentation to isolate vulnerable services",
                "Enable multi-factor authentication (MFA) on all remote access",
                "Keep all systems and services patched and updated",
            ]),
            medium_term_actions: owned(&[
                "Conduct a full security audit",
                "Implement a Web Application Firewall (WAF)",
                "Deploy intrusion detection/prevention systems (IDS/IPS)",
                "Establish regular vulnerability scanning schedule",
            ]),
            long_term_strategy: owned(&[
                "Develop comprehensive security hardening standards",
                "Implement zero-trust network architecture",
                "Establish security awareness training program",
                "Create incident response and disaster recovery plans",
            ]),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportFooter {
    pub disclaimer: String,
    pub confidentiality: String,
    pub validity: String,
}

impl Default for ReportFooter {
    fn default() -> Self {
        Self {
            disclaimer: "This report is for authorized security testing only. \
                         Unauthorized network scanning is illegal."
                .to_string(),
            confidentiality: "CONFIDENTIAL - Handle according to your organization's data policies"
                .to_string(),
            validity: "This report reflects system state at time of scan. \
                       Changes to systems may affect validity of findings."
                .to_string(),
        }
    }
}

/// Downloadable assessment document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportReport {
    pub report_metadata: ReportMetadata,
    pub report: WireReport,
    pub recommendations_summary: RecommendationsSummary,
    pub report_footer: ReportFooter,
}

impl ExportReport {
    pub fn new(report: WireReport, generated_at: DateTime<Utc>) -> Self {
        Self {
            report_metadata: ReportMetadata {
                report_id: Uuid::new_v4(),
                generated_at,
                tool_name: TOOL_NAME.to_string(),
                tool_version: env!("CARGO_PKG_VERSION").to_string(),
                report_type: REPORT_TYPE.to_string(),
            },
            report,
            recommendations_summary: RecommendationsSummary::default(),
            report_footer: ReportFooter::default(),
        }
    }
}

impl From<&ScanReport> for ExportReport {
    fn from(report: &ScanReport) -> Self {
        Self::new(WireReport::from(report), Utc::now())
    }
}

impl From<WireReport> for ExportReport {
    fn from(report: WireReport) -> Self {
        Self::new(report, Utc::now())
    }
}

/// Parse a previously rendered JSON report
pub fn parse_wire_report(json: &str) -> crate::Result<WireReport> {
    let value: serde_json::Value = serde_json::from_str(json)?;

    if value.get("success").and_then(serde_json::Value::as_bool) == Some(false) {
        let reason = value
            .get("error")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("unknown error");
        return Err(ScanError::OutputError(format!(
            "Cannot export a failed scan: {}",
            reason
        )));
    }

    let missing: Vec<&str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| value.get(*field).is_none())
        .collect();
    if !missing.is_empty() {
        return Err(ScanError::OutputError(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    Ok(serde_json::from_value(value)?)
}

/// Read a report saved with `--output json`
pub fn read_wire_report(path: &Path) -> crate::Result<WireReport> {
    let json = std::fs::read_to_string(path)?;
    parse_wire_report(&json)
}

/// `security_report_<ip>_<YYYYmmdd_HHMMSS>.json`
pub fn export_filename(ip: IpAddr, timestamp: DateTime<Local>) -> String {
    let ip = ip.to_string().replace(':', "-");
    format!("security_report_{}_{}.json", ip, timestamp.format("%Y%m%d_%H%M%S"))
}

/// Write `report` as pretty-printed JSON into `dir`, returning the file path
pub fn write_export(report: &ExportReport, dir: &Path) -> crate::Result<PathBuf> {
    let ip: IpAddr = report
        .report
        .ip
        .parse()
        .map_err(|_| ScanError::OutputError(format!("report carries an invalid ip: {}", report.report.ip)))?;

    let generated_at = report.report_metadata.generated_at.with_timezone(&Local);
    let path = dir.join(export_filename(ip, generated_at));

    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(&path, json)?;

    log::info!("Report exported successfully: {}", path.display());
    Ok(path)
}
