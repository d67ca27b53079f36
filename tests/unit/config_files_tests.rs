/*!
 * Tests for the configuration files shipped in `config/`
 */

use patentko::errors::ConfigError;
use patentko::qa::QaEngine;
use patentko::terminology::{StyleGuide, TerminologyConfig};

use crate::common;

/// The shipped terminology file mirrors the built-in defaults
#[test]
fn test_shippedTerminology_shouldMatchDefaults() {
    let loaded = TerminologyConfig::from_file(common::shipped_config_path("terminology.json"))
        .expect("shipped terminology should load");

    assert_eq!(loaded, TerminologyConfig::default());
}

/// The shipped style guide mirrors the built-in defaults
#[test]
fn test_shippedStyleGuide_shouldMatchDefaults() {
    let loaded = StyleGuide::from_file(common::shipped_config_path("style_guide.json"))
        .expect("shipped style guide should load");

    assert_eq!(loaded, StyleGuide::default());
}

/// The QA engine refuses to start without its configuration
#[test]
fn test_qaEngine_fromFiles_withMissingTerminology_shouldFail() {
    let result = QaEngine::from_files(
        "/nonexistent/terminology.json",
        common::shipped_config_path("style_guide.json"),
    );

    assert!(matches!(result, Err(ConfigError::NotFound(_))));
}

/// A structurally wrong file is rejected at load time
#[test]
fn test_qaEngine_fromFiles_withMalformedStyleGuide_shouldFail() {
    let dir = common::create_temp_dir().unwrap();
    let style = common::create_test_file(
        dir.path(),
        "style.json",
        r#"{"formatting_rules": {"temperature_spacing": "yes"}}"#,
    )
    .unwrap();

    let result = QaEngine::from_files(common::shipped_config_path("terminology.json"), style);

    assert!(matches!(result, Err(ConfigError::Malformed { .. })));
}

/// Disabled formatting rules are honoured by the engine
#[test]
fn test_qaEngine_withDisabledTemperatureRule_shouldSkipIt() {
    let dir = common::create_temp_dir().unwrap();
    let style = common::create_test_file(
        dir.path(),
        "style.json",
        r#"{"formatting_rules": {"temperature_spacing": false}}"#,
    )
    .unwrap();
    let engine =
        QaEngine::from_files(common::shipped_config_path("terminology.json"), style).unwrap();

    let report = engine.check_all(
        "heated to 25 C",
        "25℃로 가열된다.",
        &Default::default(),
        patentko::DocumentType::Specification,
    );

    assert!(!report.has_rule("format_temperature"));
}
