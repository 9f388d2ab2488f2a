//! Output formatting and management

pub mod export;

use crate::report::ScanReport;
use crate::risk::{RatingTier, RiskFinding, RiskTier};
use colored::{ColoredString, Colorize};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

pub use export::{export_filename, parse_wire_report, read_wire_report, write_export, ExportReport};

/// Output format options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub colored: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            colored: true,
        }
    }
}

/// Main output manager
pub struct OutputManager {
    config: OutputConfig,
}

impl OutputManager {
    pub fn new(config: OutputConfig) -> Self {
        if !config.colored {
            colored::control::set_override(false);
        }
        Self { config }
    }

    /// Render a report in the configured format
    pub fn render(&self, report: &ScanReport) -> crate::Result<String> {
        match self.config.format {
            OutputFormat::Text => Ok(format_text(report)),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&WireReport::from(report))?),
        }
    }

    /// Render a failure in the configured format
    pub fn render_error(&self, message: &str) -> String {
        match self.config.format {
            OutputFormat::Text => format!("{} {}", "error:".red().bold(), message),
            // WireError has no non-string keys, serialization cannot fail
            OutputFormat::Json => serde_json::to_string_pretty(&WireError::new(message))
                .unwrap_or_else(|_| format!("{{\"success\":false,\"error\":{:?}}}", message)),
        }
    }

    /// Write a report to stdout
    pub fn write_report(&self, report: &ScanReport) -> crate::Result<()> {
        let output = self.render(report)?;
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", output)?;
        stdout.flush()?;
        Ok(())
    }
}

fn tier_label(tier: RiskTier) -> ColoredString {
    match tier {
        RiskTier::High => tier.as_str().red().bold(),
        RiskTier::Medium => tier.as_str().yellow().bold(),
        RiskTier::Low => tier.as_str().green(),
    }
}

fn rating_label(rating: RatingTier) -> ColoredString {
    match rating {
        RatingTier::Excellent | RatingTier::Good => rating.as_str().green().bold(),
        RatingTier::Fair => rating.as_str().yellow().bold(),
        RatingTier::Poor | RatingTier::Critical => rating.as_str().red().bold(),
    }
}

fn format_finding(finding: &RiskFinding) -> String {
    format!(
        "  {:<7} {:<18} {}\n          {} {}\n          {} {}\n",
        finding.port,
        finding.service,
        tier_label(finding.tier),
        "reason:".dimmed(),
        finding.rationale,
        "mitigation:".dimmed(),
        finding.mitigation
    )
}

/// Human-readable report
pub fn format_text(report: &ScanReport) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "\n{} {}\n",
        "Attack surface report for".bold(),
        report.target.to_string().cyan().bold()
    ));
    output.push_str(&format!(
        "Scanned {} ports in {:.2}s ({:.0} ports/sec), {} open\n\n",
        report.ports_scanned,
        report.duration.as_secs_f64(),
        report.throughput,
        report.open_ports_count
    ));

    output.push_str(&format!(
        "{} {}/100  {}  {}\n",
        "Security score:".bold(),
        report.security_score,
        rating_label(report.summary.rating),
        report.summary.rating_description
    ));
    output.push_str(&format!(
        "Risk breakdown: {} high, {} medium, {} low\n\n",
        report.summary.high_risk_count,
        report.summary.medium_risk_count,
        report.summary.low_risk_count
    ));

    if !report.findings.is_empty() {
        output.push_str(&format!("{}\n", "OPEN PORTS:".bold()));
        for finding in &report.findings {
            output.push_str(&format_finding(finding));
        }
        output.push('\n');
    }

    output.push_str(&format!("{}\n", "PRIORITY ACTIONS:".bold()));
    for (i, action) in report.summary.priority_actions.iter().enumerate() {
        output.push_str(&format!("  {}. {}\n", i + 1, action));
    }
    output.push('\n');

    output.push_str(&format!("{}\n", "ATTACK SCENARIOS:".bold()));
    for scenario in &report.attack_scenarios {
        output.push_str(&format!("  - {}\n", scenario));
    }

    output
}

/// JSON wire shape of a successful scan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WireReport {
    pub success: bool,
    pub ip: String,
    pub scan_metadata: WireScanMetadata,
    pub security_score: u8,
    pub executive_summary: crate::risk::ExecutiveSummary,
    pub attack_simulation: Vec<String>,
    pub scan_results: Vec<RiskFinding>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WireScanMetadata {
    pub start_port: u16,
    pub end_port: u16,
    pub total_ports_scanned: usize,
    pub open_ports_count: usize,
    pub duration_seconds: f64,
    pub ports_per_second: f64,
}

/// JSON wire shape of a rejected or failed scan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WireError {
    pub success: bool,
    pub error: String,
}

impl WireError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: message.into(),
        }
    }
}

impl From<&crate::ScanError> for WireError {
    fn from(err: &crate::ScanError) -> Self {
        Self::new(err.to_string())
    }
}

impl From<&ScanReport> for WireReport {
    fn from(report: &ScanReport) -> Self {
        Self {
            success: true,
            ip: report.target.host().to_string(),
            scan_metadata: WireScanMetadata {
                start_port: report.target.start_port(),
                end_port: report.target.end_port(),
                total_ports_scanned: report.ports_scanned,
                open_ports_count: report.open_ports_count,
                duration_seconds: report.duration.as_secs_f64(),
                ports_per_second: report.throughput,
            },
            security_score: report.security_score,
            executive_summary: report.summary.clone(),
            attack_simulation: report.attack_scenarios.clone(),
            scan_results: report.findings.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::RiskCatalog;
    use crate::scanner::{OpenPortFinding, PortScanResult, ScanTarget};
    use std::time::Duration;

    pub(crate) fn sample_report() -> ScanReport {
        let scan = PortScanResult {
            target: ScanTarget::parse("192.168.1.20", 1, 1024).unwrap(),
            open_ports: vec![
                OpenPortFinding::new(22, "SSH"),
                OpenPortFinding::new(23, "Telnet"),
                OpenPortFinding::new(80, "HTTP"),
            ],
            ports_scanned: 1024,
            probe_errors: 0,
            duration: Duration::from_secs(4),
        };
        ScanReport::build(scan, RiskCatalog::builtin())
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("TXT".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_wire_shape() {
        let report = sample_report();
        let json = serde_json::to_value(WireReport::from(&report)).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["ip"], "192.168.1.20");
        assert_eq!(json["scan_metadata"]["start_port"], 1);
        assert_eq!(json["scan_metadata"]["end_port"], 1024);
        assert_eq!(json["scan_metadata"]["total_ports_scanned"], 1024);
        assert_eq!(json["scan_metadata"]["open_ports_count"], 3);
        assert_eq!(json["scan_metadata"]["ports_per_second"], 256.0);
        assert_eq!(json["security_score"], 65);
        assert_eq!(json["executive_summary"]["rating"], "FAIR");
        assert_eq!(json["executive_summary"]["high_risk_count"], 1);
        assert_eq!(json["scan_results"][1]["service"], "Telnet");
        assert_eq!(json["scan_results"][1]["risk_level"], "HIGH");
        assert!(json["scan_results"][1]["reason"].is_string());
        assert!(json["attack_simulation"].as_array().unwrap().len() >= 2);
    }

    #[test]
    fn test_wire_error() {
        let err = crate::ScanError::PortRangeError("start_port (90) must not exceed end_port (80)".into());
        let json = serde_json::to_value(WireError::from(&err)).unwrap();
        assert_eq!(json["success"], false);
        assert!(json["error"].as_str().unwrap().contains("must not exceed"));
    }

    #[test]
    fn test_text_output_lists_findings() {
        colored::control::set_override(false);
        let text = format_text(&sample_report());
        assert!(text.contains("192.168.1.20 [1-1024]"));
        assert!(text.contains("65/100"));
        assert!(text.contains("Telnet"));
        assert!(text.contains("Address 1 HIGH risk service(s) immediately"));
        assert!(text.contains("ATTACK SURFACE SUMMARY"));
    }

    #[test]
    fn test_json_render_round_trips() {
        let manager = OutputManager::new(OutputConfig {
            format: OutputFormat::Json,
            colored: false,
        });
        let report = sample_report();
        let rendered = manager.render(&report).unwrap();
        let parsed: WireReport = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed, WireReport::from(&report));

        let error: WireError = serde_json::from_str(&manager.render_error("Invalid IP address format: x")).unwrap();
        assert!(!error.success);
    }
}
