/*!
 * QA rule engine.
 *
 * Runs the fixed battery of checks in a stable order and aggregates the
 * violations into a `QaReport`.
 */

use log::debug;

use super::violation::{QaReport, Violation};
use super::{claims, formatting, lexicon, punctuation, terminology};
use crate::errors::ConfigError;
use crate::sections::DocumentType;
use crate::terminology::{StyleGuide, TermMapping, TerminologyConfig};
use std::path::Path;

/// Names of the checks in execution order
pub const CHECK_NAMES: [&str; 10] = [
    "Formatting (temperature, percentage, sequence number, claim period)",
    "Terminology (forbidden renderings)",
    "Antecedent marker '상기'",
    "Claim structure (noun-phrase ending)",
    "Punctuation (colon after particle, trailing semicolon)",
    "Domain mistranslations (substrate, detach, distal/proximal end, ...)",
    "Standard terminology (embodiment, subject matter)",
    "Numerical expressions (more than one, less than two)",
    "Transitional phrases (adapted to)",
    "Method claim structure (preamble and ending)",
];

/// Rule engine holding the validated terminology and style configuration
#[derive(Debug, Clone, Default)]
pub struct QaEngine {
    terminology: TerminologyConfig,
    style: StyleGuide,
}

impl QaEngine {
    /// Create an engine from already validated configuration
    pub fn new(terminology: TerminologyConfig, style: StyleGuide) -> Self {
        Self { terminology, style }
    }

    /// Load both configuration files; fails if either is missing or invalid
    pub fn from_files<P: AsRef<Path>, Q: AsRef<Path>>(
        terminology_path: P,
        style_path: Q,
    ) -> Result<Self, ConfigError> {
        let terminology = TerminologyConfig::from_file(terminology_path)?;
        let style = StyleGuide::from_file(style_path)?;
        Ok(Self::new(terminology, style))
    }

    /// Terminology tables in use
    pub fn terminology(&self) -> &TerminologyConfig {
        &self.terminology
    }

    /// Style guide in use
    pub fn style(&self) -> &StyleGuide {
        &self.style
    }

    /// Run every check against a (source, translation) pair.
    ///
    /// Claim-only checks are skipped for other document types. Violations keep
    /// check order, so identical inputs always yield identical reports.
    pub fn check_all(
        &self,
        source: &str,
        translation: &str,
        term_mapping: &TermMapping,
        document_type: DocumentType,
    ) -> QaReport {
        let mut violations: Vec<Violation> = Vec::new();

        violations.extend(formatting::check_formatting(
            translation,
            document_type,
            &self.style.formatting_rules,
        ));
        violations.extend(terminology::check_forbidden_terms(
            translation,
            term_mapping,
            &self.terminology.forbidden_translations,
        ));
        violations.extend(claims::check_antecedent_basis(source, translation));
        if document_type.is_claim() {
            violations.extend(claims::check_claim_structure(translation));
        }
        violations.extend(punctuation::check_punctuation(translation, document_type));
        violations.extend(lexicon::check_domain_terms(source, translation));
        violations.extend(lexicon::check_standard_terminology(translation));
        violations.extend(lexicon::check_numerical_expressions(source, translation));
        violations.extend(lexicon::check_transitional_phrases(source, translation));
        if document_type.is_claim() {
            violations.extend(claims::check_method_claim(translation));
        }

        let report = QaReport::from_violations(violations);
        debug!("QA for {}: {}", document_type, report.summary());
        report
    }
}
