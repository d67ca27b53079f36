/*!
 * QA scenarios run against the shipped configuration
 */

use patentko::qa::{QaEngine, Severity, render_report};
use patentko::sections::DocumentType;
use patentko::terminology::TermMapping;

use crate::common;

fn engine() -> QaEngine {
    QaEngine::from_files(
        common::shipped_config_path("terminology.json"),
        common::shipped_config_path("style_guide.json"),
    )
    .expect("shipped configuration should load")
}

fn claim_mapping() -> TermMapping {
    let mut mapping = TermMapping::new();
    mapping.insert("compound".to_string(), "화합물".to_string());
    mapping.insert("method".to_string(), "방법".to_string());
    mapping
}

#[test]
fn test_checkAll_withMissingAntecedentMarker_shouldFail() {
    let report = engine().check_all(
        "A method comprising the compound",
        "화합물을 포함하는 방법",
        &claim_mapping(),
        DocumentType::Claim,
    );

    assert!(!report.passed);
    assert!(report
        .by_rule("antecedent_basis")
        .any(|v| v.severity == Severity::Major));
}

#[test]
fn test_checkAll_withAdaptedToMistranslation_shouldFailCritical() {
    let report = engine().check_all(
        "An antenna adapted to receive signals.",
        "신호를 수신하도록 적합화된 안테나.",
        &TermMapping::new(),
        DocumentType::Claim,
    );

    assert!(!report.passed);
    assert!(report.severity_counts.critical >= 1);
    assert!(report.has_rule("adapted_to_mistranslation"));
}

#[test]
fn test_checkAll_withCleanClaim_shouldPass() {
    let report = engine().check_all(
        "A method comprising the compound",
        "상기 화합물을 포함하는 방법.",
        &claim_mapping(),
        DocumentType::Claim,
    );

    assert_eq!(report.severity_counts.critical, 0);
    assert_eq!(report.severity_counts.major, 0);
    assert!(report.passed);
}

#[test]
fn test_renderReport_forFailingClaim_shouldListEveryViolation() {
    let report = engine().check_all(
        "the device adapted to heat more than one substrate",
        "하나 이상의 기판을 가열하도록 적응된 장치",
        &TermMapping::new(),
        DocumentType::Claim,
    );
    let text = render_report(&report);

    assert!(text.contains("Result: FAIL"));
    assert_eq!(text.matches("### [").count(), report.total_violations);
    for violation in &report.violations {
        assert!(text.contains(&violation.rule_id));
    }
}
