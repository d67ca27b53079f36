/*!
 * Results produced by the pipeline.
 */

use std::time::Duration;

use crate::analysis::DocumentAnalysis;
use crate::database::TmMatch;
use crate::qa::QaReport;
use crate::sections::{DocumentType, SectionType};

/// Where a translation came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationOrigin {
    /// Exact translation memory hit; no oracle call was made
    TranslationMemory,
    /// Produced by the oracle
    Oracle,
}

impl std::fmt::Display for TranslationOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranslationOrigin::TranslationMemory => write!(f, "translation memory"),
            TranslationOrigin::Oracle => write!(f, "oracle"),
        }
    }
}

/// Outcome of the self-review pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewStatus {
    /// Review disabled, or the text came from the translation memory
    NotRequested,
    /// The reviewer returned the first translation unchanged
    Approved,
    /// The reviewer changed the first translation
    Revised { first_translation: String },
    /// The review call failed; the first translation is kept
    ReviewFailed { error: String },
}

impl std::fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReviewStatus::NotRequested => write!(f, "not requested"),
            ReviewStatus::Approved => write!(f, "approved"),
            ReviewStatus::Revised { .. } => write!(f, "revised"),
            ReviewStatus::ReviewFailed { .. } => write!(f, "review failed"),
        }
    }
}

/// Result of translating one piece of text
#[derive(Debug, Clone)]
pub struct TranslationOutcome {
    pub source: String,
    pub translation: String,
    pub document_type: DocumentType,
    pub origin: TranslationOrigin,
    pub analysis: DocumentAnalysis,
    /// TM matches found during lookup, best first
    pub tm_matches: Vec<TmMatch>,
    /// QA report; `None` for translation memory hits
    pub qa_report: Option<QaReport>,
    pub review_status: ReviewStatus,
    /// Whether the translation was written (or staged) for the memory
    pub saved_to_tm: bool,
}

impl TranslationOutcome {
    /// True when the text came from the memory or passed QA
    pub fn passed(&self) -> bool {
        self.qa_report.as_ref().map(|r| r.passed).unwrap_or(true)
    }

    /// Quality score used when storing a QA-checked translation
    pub fn quality_score(&self) -> Option<i64> {
        self.qa_report
            .as_ref()
            .filter(|r| r.passed)
            .map(|r| if r.total_violations == 0 { 10 } else { 7 })
    }
}

/// Translation of one section of a document
#[derive(Debug, Clone)]
pub struct SectionOutcome {
    /// Position in document order
    pub index: usize,
    pub section_type: SectionType,
    pub outcome: TranslationOutcome,
}

/// Result of translating a whole document
#[derive(Debug, Clone)]
pub struct DocumentOutcome {
    /// Reconstructed Korean document
    pub translation: String,
    pub sections: Vec<SectionOutcome>,
    /// Number of translation memory entries committed
    pub committed_entries: usize,
    pub duration: Duration,
}

impl DocumentOutcome {
    /// True when every section passed QA
    pub fn passed(&self) -> bool {
        self.sections.iter().all(|s| s.outcome.passed())
    }

    /// Sections that failed QA
    pub fn failed_sections(&self) -> impl Iterator<Item = &SectionOutcome> {
        self.sections.iter().filter(|s| !s.outcome.passed())
    }

    /// Get a summary of the document result.
    pub fn summary(&self) -> String {
        let from_tm = self
            .sections
            .iter()
            .filter(|s| s.outcome.origin == TranslationOrigin::TranslationMemory)
            .count();
        let violations: usize = self
            .sections
            .iter()
            .filter_map(|s| s.outcome.qa_report.as_ref())
            .map(|r| r.total_violations)
            .sum();

        format!(
            "{} sections ({} from TM) | {} QA violations | {} failed | {} TM entries saved | {:.2}s",
            self.sections.len(),
            from_tm,
            violations,
            self.failed_sections().count(),
            self.committed_entries,
            self.duration.as_secs_f32()
        )
    }
}
