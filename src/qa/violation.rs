/*!
 * QA violations and the aggregate report.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// Violation severity, most severe first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Changes legal scope; always fails QA
    Critical,
    /// Fails QA
    Major,
    /// Improvement recommended
    Minor,
    /// Informational
    Neutral,
}

impl Severity {
    /// All severities, most severe first
    pub const ALL: [Severity; 4] = [
        Severity::Critical,
        Severity::Major,
        Severity::Minor,
        Severity::Neutral,
    ];

    /// Returns true if a violation of this severity fails QA
    pub fn is_blocking(&self) -> bool {
        matches!(self, Severity::Critical | Severity::Major)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Critical => write!(f, "critical"),
            Severity::Major => write!(f, "major"),
            Severity::Minor => write!(f, "minor"),
            Severity::Neutral => write!(f, "neutral"),
        }
    }
}

/// One rule violation found in a translation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Stable rule identifier
    pub rule_id: String,
    pub severity: Severity,
    pub description: String,
    /// Human-readable pointer into the checked text
    pub location: String,
    /// Offending text
    pub found: String,
    /// Suggested fix, empty when there is none
    pub correct: String,
}

impl Violation {
    /// Create a violation without a suggested fix
    pub fn new(
        rule_id: impl Into<String>,
        severity: Severity,
        description: impl Into<String>,
        location: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            severity,
            description: description.into(),
            location: location.into(),
            found: found.into(),
            correct: String::new(),
        }
    }

    /// Attach a suggested fix
    pub fn with_correct(mut self, correct: impl Into<String>) -> Self {
        self.correct = correct.into();
        self
    }
}

/// Number of violations per severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub critical: usize,
    pub major: usize,
    pub minor: usize,
    pub neutral: usize,
}

impl SeverityCounts {
    /// Count for one severity
    pub fn get(&self, severity: Severity) -> usize {
        match severity {
            Severity::Critical => self.critical,
            Severity::Major => self.major,
            Severity::Minor => self.minor,
            Severity::Neutral => self.neutral,
        }
    }

    fn increment(&mut self, severity: Severity) {
        match severity {
            Severity::Critical => self.critical += 1,
            Severity::Major => self.major += 1,
            Severity::Minor => self.minor += 1,
            Severity::Neutral => self.neutral += 1,
        }
    }
}

/// Result of one QA run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaReport {
    pub total_violations: usize,
    pub severity_counts: SeverityCounts,
    /// Violations in check order
    pub violations: Vec<Violation>,
    /// True iff there are no critical and no major violations
    pub passed: bool,
}

impl QaReport {
    /// Aggregate a list of violations
    pub fn from_violations(violations: Vec<Violation>) -> Self {
        let mut severity_counts = SeverityCounts::default();
        for violation in &violations {
            severity_counts.increment(violation.severity);
        }

        Self {
            total_violations: violations.len(),
            passed: severity_counts.critical == 0 && severity_counts.major == 0,
            severity_counts,
            violations,
        }
    }

    /// Violations reported by one rule
    pub fn by_rule<'a>(&'a self, rule_id: &'a str) -> impl Iterator<Item = &'a Violation> + 'a {
        self.violations.iter().filter(move |v| v.rule_id == rule_id)
    }

    /// Returns true if any violation carries `rule_id`
    pub fn has_rule(&self, rule_id: &str) -> bool {
        self.violations.iter().any(|v| v.rule_id == rule_id)
    }

    /// One-line summary
    pub fn summary(&self) -> String {
        format!(
            "{} ({} violations: {} critical, {} major, {} minor, {} neutral)",
            if self.passed { "PASS" } else { "FAIL" },
            self.total_violations,
            self.severity_counts.critical,
            self.severity_counts.major,
            self.severity_counts.minor,
            self.severity_counts.neutral
        )
    }
}

/// Location string for a byte offset, reported as a character position
pub(crate) fn position_of(text: &str, byte_offset: usize) -> String {
    let chars = text
        .get(..byte_offset)
        .map(|prefix| prefix.chars().count())
        .unwrap_or(byte_offset);
    format!("position {}", chars)
}

/// Last `n` characters of the trimmed text
pub(crate) fn tail_chars(text: &str, n: usize) -> String {
    let trimmed = text.trim();
    let count = trimmed.chars().count();
    trimmed.chars().skip(count.saturating_sub(n)).collect()
}

/// First `n` characters of the trimmed text
pub(crate) fn head_chars(text: &str, n: usize) -> String {
    text.trim().chars().take(n).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fromViolations_withOnlyMinor_shouldPass() {
        let report = QaReport::from_violations(vec![
            Violation::new("a", Severity::Minor, "", "", ""),
            Violation::new("b", Severity::Neutral, "", "", ""),
        ]);

        assert!(report.passed);
        assert_eq!(report.total_violations, 2);
        assert_eq!(report.severity_counts.minor, 1);
        assert_eq!(report.severity_counts.neutral, 1);
    }

    #[test]
    fn test_fromViolations_withMajor_shouldFail() {
        let report = QaReport::from_violations(vec![Violation::new(
            "claim_ending",
            Severity::Major,
            "",
            "",
            "",
        )]);

        assert!(!report.passed);
        assert!(report.has_rule("claim_ending"));
        assert_eq!(report.by_rule("claim_ending").count(), 1);
        assert!(report.summary().starts_with("FAIL"));
    }

    #[test]
    fn test_fromViolations_withNothing_shouldPass() {
        let report = QaReport::from_violations(Vec::new());
        assert!(report.passed);
        assert_eq!(report.summary(), "PASS (0 violations: 0 critical, 0 major, 0 minor, 0 neutral)");
    }

    #[test]
    fn test_severity_isBlocking() {
        assert!(Severity::Critical.is_blocking());
        assert!(Severity::Major.is_blocking());
        assert!(!Severity::Minor.is_blocking());
        assert!(!Severity::Neutral.is_blocking());
    }

    #[test]
    fn test_textHelpers_shouldCountCharacters() {
        assert_eq!(position_of("상기 25℃", 7), "position 3");
        assert_eq!(tail_chars("  화합물.  ", 2), "물.");
        assert_eq!(head_chars("방법으로서, 단계", 3), "방법으");
    }
}
