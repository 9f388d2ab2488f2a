//! Security score and rating
//!
//! The score starts at 100 and loses a fixed penalty per finding
//! (HIGH 20, MEDIUM 10, LOW 5). Penalties add up without any diminishing
//! factor and the result is clamped to 0..=100.
//!
//! Rating bands, inclusive and contiguous:
//!
//! | score  | rating    |
//! |--------|-----------|
//! | 90-100 | EXCELLENT |
//! | 70-89  | GOOD      |
//! | 50-69  | FAIR      |
//! | 30-49  | POOR      |
//! | 0-29   | CRITICAL  |

use super::{RiskFinding, RiskTier};
use serde::{Deserialize, Serialize};

/// Score of a host with nothing exposed
pub const MAX_SCORE: u8 = 100;

/// Reduce findings to a score in `0..=100`
pub fn score(findings: &[RiskFinding]) -> u8 {
    let total_penalty = findings
        .iter()
        .fold(0u64, |acc, finding| acc.saturating_add(finding.tier.penalty() as u64));

    let score = (MAX_SCORE as u64).saturating_sub(total_penalty) as u8;
    log::debug!(
        "Security score: {} findings, {} penalty points = {}/100",
        findings.len(),
        total_penalty,
        score
    );
    score
}

/// Discrete bucket for executive presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RatingTier {
    Critical,
    Poor,
    Fair,
    Good,
    Excellent,
}

impl RatingTier {
    pub fn from_score(score: u8) -> Self {
        match score {
            90..=u8::MAX => RatingTier::Excellent,
            70..=89 => RatingTier::Good,
            50..=69 => RatingTier::Fair,
            30..=49 => RatingTier::Poor,
            0..=29 => RatingTier::Critical,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RatingTier::Excellent => "EXCELLENT",
            RatingTier::Good => "GOOD",
            RatingTier::Fair => "FAIR",
            RatingTier::Poor => "POOR",
            RatingTier::Critical => "CRITICAL",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RatingTier::Excellent => "Very secure configuration with minimal attack surface",
            RatingTier::Good => "Secure with minor improvements needed",
            RatingTier::Fair => "Moderate security concerns require attention",
            RatingTier::Poor => "Significant security vulnerabilities present",
            RatingTier::Critical => "Severe security issues requiring immediate action",
        }
    }

    /// Hex colour for dashboards
    pub fn color(&self) -> &'static str {
        match self {
            RatingTier::Excellent => "#28a745",
            RatingTier::Good => "#20c997",
            RatingTier::Fair => "#ffc107",
            RatingTier::Poor => "#fd7e14",
            RatingTier::Critical => "#dc3545",
        }
    }
}

impl std::fmt::Display for RatingTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Number of findings per risk tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl RiskCounts {
    pub fn tally(findings: &[RiskFinding]) -> Self {
        findings.iter().fold(Self::default(), |mut counts, finding| {
            match finding.tier {
                RiskTier::High => counts.high += 1,
                RiskTier::Medium => counts.medium += 1,
                RiskTier::Low => counts.low += 1,
            }
            counts
        })
    }

    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }

    pub fn count(&self, tier: RiskTier) -> usize {
        match tier {
            RiskTier::High => self.high,
            RiskTier::Medium => self.medium,
            RiskTier::Low => self.low,
        }
    }

    /// Most severe tier with at least one finding
    pub fn worst(&self) -> Option<RiskTier> {
        [RiskTier::High, RiskTier::Medium, RiskTier::Low]
            .into_iter()
            .find(|tier| self.count(*tier) > 0)
    }
}

/// Rating tier plus remediation directives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutiveSummary {
    pub rating: RatingTier,
    pub rating_description: String,
    pub high_risk_count: usize,
    pub medium_risk_count: usize,
    pub low_risk_count: usize,
    pub priority_actions: Vec<String>,
}

impl ExecutiveSummary {
    pub fn counts(&self) -> RiskCounts {
        RiskCounts {
            high: self.high_risk_count,
            medium: self.medium_risk_count,
            low: self.low_risk_count,
        }
    }
}

/// Ordered remediation directives, most urgent first
pub fn priority_actions(counts: &RiskCounts) -> Vec<String> {
    let mut actions = Vec::new();
    if counts.high > 0 {
        actions.push(format!("Address {} HIGH risk service(s) immediately", counts.high));
    }
    if counts.medium > 0 {
        actions.push(format!("Review {} MEDIUM risk service(s)", counts.medium));
    }
    if counts.low > 0 {
        actions.push(format!(
            "Monitor {} LOW risk service(s) and keep them patched",
            counts.low
        ));
    }
    if actions.is_empty() {
        actions.push("Continue monitoring and maintain security posture".to_string());
    }
    actions
}

/// Rate a score and derive priority actions from the findings behind it
pub fn rate(score: u8, findings: &[RiskFinding]) -> ExecutiveSummary {
    let rating = RatingTier::from_score(score);
    let counts = RiskCounts::tally(findings);

    ExecutiveSummary {
        rating,
        rating_description: rating.description().to_string(),
        high_risk_count: counts.high,
        medium_risk_count: counts.medium,
        low_risk_count: counts.low,
        priority_actions: priority_actions(&counts),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn finding(port: u16, tier: RiskTier) -> RiskFinding {
        RiskFinding {
            port,
            service: "test".into(),
            tier,
            rationale: String::new(),
            mitigation: String::new(),
        }
    }

    fn tier_strategy() -> impl Strategy<Value = RiskTier> {
        prop_oneof![Just(RiskTier::Low), Just(RiskTier::Medium), Just(RiskTier::High)]
    }

    #[test]
    fn test_empty_scores_perfect() {
        assert_eq!(score(&[]), 100);
        assert_eq!(RatingTier::from_score(100), RatingTier::Excellent);
        let summary = rate(100, &[]);
        assert_eq!(summary.rating, RatingTier::Excellent);
        assert_eq!(
            summary.priority_actions,
            vec!["Continue monitoring and maintain security posture".to_string()]
        );
    }

    #[test]
    fn test_additive_penalties() {
        let findings = vec![
            finding(22, RiskTier::Low),
            finding(80, RiskTier::Medium),
            finding(3389, RiskTier::High),
        ];
        assert_eq!(score(&findings), 100 - 5 - 10 - 20);
    }

    #[test]
    fn test_full_range_of_high_findings_clamps_to_zero() {
        let findings: Vec<RiskFinding> = (1..=u16::MAX).map(|p| finding(p, RiskTier::High)).collect();
        assert_eq!(score(&findings), 0);
        assert_eq!(RatingTier::from_score(0), RatingTier::Critical);
    }

    #[test]
    fn test_band_edges() {
        let expected = [
            (100, RatingTier::Excellent),
            (90, RatingTier::Excellent),
            (89, RatingTier::Good),
            (70, RatingTier::Good),
            (69, RatingTier::Fair),
            (50, RatingTier::Fair),
            (49, RatingTier::Poor),
            (30, RatingTier::Poor),
            (29, RatingTier::Critical),
            (0, RatingTier::Critical),
        ];
        for (score, tier) in expected {
            assert_eq!(RatingTier::from_score(score), tier, "score {}", score);
        }
    }

    #[test]
    fn test_priority_actions_follow_counts() {
        let findings = vec![
            finding(21, RiskTier::High),
            finding(23, RiskTier::High),
            finding(80, RiskTier::Medium),
            finding(443, RiskTier::Low),
        ];
        let summary = rate(score(&findings), &findings);
        assert_eq!(summary.high_risk_count, 2);
        assert_eq!(summary.medium_risk_count, 1);
        assert_eq!(summary.low_risk_count, 1);
        assert_eq!(
            summary.priority_actions,
            vec![
                "Address 2 HIGH risk service(s) immediately".to_string(),
                "Review 1 MEDIUM risk service(s)".to_string(),
                "Monitor 1 LOW risk service(s) and keep them patched".to_string(),
            ]
        );
        assert_eq!(summary.counts().worst(), Some(RiskTier::High));
    }

    proptest! {
        #[test]
        fn prop_score_in_range(tiers in prop::collection::vec(tier_strategy(), 0..200)) {
            let findings: Vec<RiskFinding> = tiers.iter().enumerate()
                .map(|(i, t)| finding(i as u16 + 1, *t))
                .collect();
            let s = score(&findings);
            prop_assert!(s <= 100);
            prop_assert_eq!(RatingTier::from_score(s).description().is_empty(), false);
        }

        #[test]
        fn prop_adding_findings_never_raises_score(
            base in prop::collection::vec(tier_strategy(), 0..30),
            extra in prop::collection::vec(tier_strategy(), 0..30),
        ) {
            let subset: Vec<RiskFinding> = base.iter().map(|t| finding(1, *t)).collect();
            let mut superset = subset.clone();
            superset.extend(extra.iter().map(|t| finding(2, *t)));
            prop_assert!(score(&superset) <= score(&subset));
        }

        #[test]
        fn prop_worsening_a_tier_never_raises_score(tiers in prop::collection::vec(tier_strategy(), 1..30)) {
            let original: Vec<RiskFinding> = tiers.iter().map(|t| finding(1, *t)).collect();
            let mut worse = original.clone();
            worse[0].tier = RiskTier::High;
            prop_assert!(score(&worse) <= score(&original));
        }
    }
}
