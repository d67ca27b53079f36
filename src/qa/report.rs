/*!
 * Plain-text rendering of a QA report.
 */

use super::engine::CHECK_NAMES;
use super::violation::{QaReport, Severity};

const RULE: &str = "============================================================";

fn severity_legend(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "automatic failure",
        Severity::Major => "fails QA",
        Severity::Minor => "improvement recommended",
        Severity::Neutral => "for reference",
    }
}

/// Render a report as deterministic plain text
pub fn render_report(report: &QaReport) -> String {
    let mut lines: Vec<String> = vec![
        RULE.to_string(),
        "Patent Translation QA Report".to_string(),
        RULE.to_string(),
        String::new(),
        "## Summary".to_string(),
        format!("Total violations: {}", report.total_violations),
        format!("Result: {}", if report.passed { "PASS" } else { "FAIL" }),
        String::new(),
        "## Severity counts".to_string(),
    ];

    for severity in Severity::ALL {
        lines.push(format!(
            "  {}: {} - {}",
            severity.to_string().to_uppercase(),
            report.severity_counts.get(severity),
            severity_legend(severity)
        ));
    }
    lines.push(String::new());

    lines.push(format!("## Checks run ({})", CHECK_NAMES.len()));
    for (i, name) in CHECK_NAMES.iter().enumerate() {
        lines.push(format!("{:>3}. {}", i + 1, name));
    }
    lines.push(String::new());

    if !report.violations.is_empty() {
        lines.push("## Violations".to_string());
        lines.push(String::new());

        for (i, v) in report.violations.iter().enumerate() {
            lines.push(format!(
                "### [{}] {} ({})",
                i + 1,
                v.rule_id,
                v.severity.to_string().to_uppercase()
            ));
            lines.push(format!("Description: {}", v.description));
            lines.push(format!("Location: {}", v.location));
            lines.push(format!("Found: {}", v.found));
            if !v.correct.is_empty() {
                lines.push(format!("Suggestion: {}", v.correct));
            }
            lines.push(String::new());
        }
    }

    lines.push(RULE.to_string());
    lines.join("\n")
}
