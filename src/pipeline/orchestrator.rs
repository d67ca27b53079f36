/*!
 * Pipeline orchestrator for coordinating translation steps.
 *
 * One text goes through five steps:
 * 1. Analysis: domain, technical terms, term mapping
 * 2. TM lookup: an exact hit short-circuits the remaining steps
 * 3. Translation through the oracle, optionally followed by a self review
 * 4. QA check
 * 5. TM save when QA passed
 *
 * Document mode runs these steps once per parsed section and commits the
 * resulting TM entries only after every section succeeded.
 */

use log::{info, warn};
use std::time::Instant;

use crate::analysis::DocumentAnalyzer;
use crate::database::{PendingEntry, TranslationMemory};
use crate::errors::{OracleError, PipelineError};
use crate::oracle::{OracleRequest, ReviewRequest, TranslationOracle};
use crate::qa::QaEngine;
use crate::run_log::{RunLog, RunStage};
use crate::sections::{
    DocumentType, SectionParser, TranslatedSectionMap, document_type_for, in_document_order,
};

use super::config::PipelineConfig;
use super::outcome::{
    DocumentOutcome, ReviewStatus, SectionOutcome, TranslationOrigin, TranslationOutcome,
};

/// Translate, then ask the oracle to review its own translation.
///
/// A failed first translation is returned as an error. A failed review keeps
/// the first translation.
pub async fn translate_with_self_review(
    oracle: &dyn TranslationOracle,
    request: &OracleRequest,
    run_log: &mut RunLog,
) -> Result<(String, ReviewStatus), OracleError> {
    let first = oracle.translate(request).await?.translation;
    run_log.record(
        RunStage::Translation,
        format!("first translation: {} chars", first.chars().count()),
    );

    let review = ReviewRequest::for_translation(request, first.clone());
    let result = match oracle.review(&review).await {
        Ok(response) if response.translation == first => (first, ReviewStatus::Approved),
        Ok(response) => (
            response.translation,
            ReviewStatus::Revised {
                first_translation: first,
            },
        ),
        Err(e) => {
            warn!("Self review failed, keeping first translation: {}", e);
            (
                first,
                ReviewStatus::ReviewFailed {
                    error: e.to_string(),
                },
            )
        }
    };

    run_log.record(RunStage::Review, result.1.to_string());
    Ok(result)
}

/// The main translation pipeline orchestrator.
#[derive(Debug)]
pub struct TranslationPipeline {
    config: PipelineConfig,
    qa: QaEngine,
    memory: TranslationMemory,
    parser: SectionParser,
}

impl TranslationPipeline {
    /// Create a new pipeline over a QA engine and a translation memory.
    pub fn new(config: PipelineConfig, qa: QaEngine, memory: TranslationMemory) -> Self {
        Self {
            config,
            qa,
            memory,
            parser: SectionParser::new(),
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn qa(&self) -> &QaEngine {
        &self.qa
    }

    pub fn memory(&self) -> &TranslationMemory {
        &self.memory
    }

    /// Release the pipeline and hand back its memory (e.g. to close it)
    pub fn into_memory(self) -> TranslationMemory {
        self.memory
    }

    /// Translate a single text and save it to the memory when QA passes.
    pub async fn translate_text(
        &self,
        oracle: &dyn TranslationOracle,
        source: &str,
        document_type: DocumentType,
        run_log: &mut RunLog,
    ) -> Result<TranslationOutcome, PipelineError> {
        let result = self
            .translate_segment(oracle, source, document_type, None, run_log)
            .await;

        let (mut outcome, pending) = match result {
            Ok(r) => r,
            Err(e) => {
                run_log.finish(&format!("failed: {}", e));
                return Err(e);
            }
        };

        if let Some(entry) = pending {
            outcome.saved_to_tm = self.memory.put(
                &entry.source,
                &entry.target,
                &entry.domain,
                entry.document_type,
                entry.quality_score,
            );
            run_log.record(
                RunStage::TmSave,
                if outcome.saved_to_tm {
                    format!("saved with quality score {}", entry.quality_score)
                } else {
                    "save failed".to_string()
                },
            );
        }

        run_log.finish(&format!("translated via {}", outcome.origin));
        Ok(outcome)
    }

    /// Translate a whole document section by section.
    ///
    /// Each section is translated with its document type and the previous
    /// section's translation as context. Any failing section fails the whole
    /// document, and no TM entry from it is committed.
    pub async fn translate_document(
        &self,
        oracle: &dyn TranslationOracle,
        text: &str,
        run_log: &mut RunLog,
        progress_callback: Option<&dyn Fn(usize, usize)>,
    ) -> Result<DocumentOutcome, PipelineError> {
        let start_time = Instant::now();
        let sections = self.parser.parse(text);
        let ordered = in_document_order(&sections);
        let total = ordered.len();

        run_log.record(RunStage::SectionParsing, format!("{} sections", total));
        info!("Translating document with {} sections", total);

        let mut translated = TranslatedSectionMap::new();
        let mut outcomes: Vec<SectionOutcome> = Vec::with_capacity(total);
        let mut staged: Vec<PendingEntry> = Vec::new();
        let mut previous: Option<String> = None;

        for (index, section) in ordered.into_iter().enumerate() {
            let document_type = document_type_for(section.section_type);
            let result = self
                .translate_segment(oracle, &section.content, document_type, previous.take(), run_log)
                .await;

            let (mut outcome, pending) = match result {
                Ok(r) => r,
                Err(e) => {
                    let failure = PipelineError::SectionFailed {
                        index,
                        section_type: section.section_type,
                        message: e.to_string(),
                    };
                    run_log.record(RunStage::SectionProgress, failure.to_string());
                    run_log.finish("document failed, nothing committed");
                    return Err(failure);
                }
            };

            outcome.saved_to_tm = pending.is_some();
            staged.extend(pending);
            previous = Some(outcome.translation.clone());

            run_log.record(
                RunStage::SectionProgress,
                format!(
                    "{}/{} {} ({}, QA {})",
                    index + 1,
                    total,
                    section.section_type,
                    outcome.origin,
                    if outcome.passed() { "pass" } else { "fail" }
                ),
            );

            translated
                .entry(section.section_type)
                .or_default()
                .push((section.clone(), outcome.translation.clone()));
            outcomes.push(SectionOutcome {
                index,
                section_type: section.section_type,
                outcome,
            });

            if let Some(callback) = progress_callback {
                callback(index + 1, total);
            }
        }

        let committed_entries = if self.memory.put_all(&staged) {
            staged.len()
        } else {
            for section in &mut outcomes {
                section.outcome.saved_to_tm = false;
            }
            0
        };
        if !staged.is_empty() {
            run_log.record(
                RunStage::TmSave,
                format!("{} of {} staged entries committed", committed_entries, staged.len()),
            );
        }

        let outcome = DocumentOutcome {
            translation: self.parser.reconstruct(&translated),
            sections: outcomes,
            committed_entries,
            duration: start_time.elapsed(),
        };
        run_log.finish(&outcome.summary());
        Ok(outcome)
    }

    /// Run analysis, lookup, translation and QA for one text.
    ///
    /// Returns the entry to store when saving is enabled and QA passed.
    async fn translate_segment(
        &self,
        oracle: &dyn TranslationOracle,
        source: &str,
        document_type: DocumentType,
        previous_translation: Option<String>,
        run_log: &mut RunLog,
    ) -> Result<(TranslationOutcome, Option<PendingEntry>), PipelineError> {
        // Step 1: Analysis
        let analysis = DocumentAnalyzer::new(self.qa.terminology()).analyze(source);
        run_log.record(
            RunStage::Analysis,
            format!(
                "domain={}, {} mapped terms",
                analysis.domain,
                analysis.term_mapping.len()
            ),
        );

        // Step 2: TM lookup
        let tm_matches = self.memory.search(
            source,
            Some(&analysis.domain),
            self.config.tm_threshold,
            self.config.max_tm_results,
        )?;

        if let Some(hit) = tm_matches.first().filter(|m| m.is_exact()) {
            run_log.record(
                RunStage::TmSearch,
                format!("exact match (quality score {})", hit.quality_score),
            );
            let translation = hit.target.clone();
            return Ok((
                TranslationOutcome {
                    source: source.to_string(),
                    translation,
                    document_type,
                    origin: TranslationOrigin::TranslationMemory,
                    analysis,
                    tm_matches,
                    qa_report: None,
                    review_status: ReviewStatus::NotRequested,
                    saved_to_tm: false,
                },
                None,
            ));
        }

        run_log.record(
            RunStage::TmSearch,
            match tm_matches.first() {
                Some(best) => format!(
                    "{} fuzzy matches (best {:.1}%)",
                    tm_matches.len(),
                    best.similarity * 100.0
                ),
                None => "no matches".to_string(),
            },
        );

        // Step 3: Translation
        let request = OracleRequest::new(
            source,
            analysis.domain.clone(),
            analysis.term_mapping.clone(),
            document_type,
        )
        .with_previous_translation(previous_translation)
        .with_reference_matches(tm_matches.clone());

        let (translation, review_status) = if self.config.self_review {
            translate_with_self_review(oracle, &request, run_log).await?
        } else {
            let response = oracle.translate(&request).await?;
            run_log.record(
                RunStage::Translation,
                format!("{} chars", response.translation.chars().count()),
            );
            (response.translation, ReviewStatus::NotRequested)
        };

        // Step 4: QA
        let report = self
            .qa
            .check_all(source, &translation, &analysis.term_mapping, document_type);
        run_log.record(RunStage::Qa, report.summary());

        // Step 5: staged save
        let pending = if self.config.save_to_tm && report.passed {
            Some(PendingEntry {
                source: source.to_string(),
                target: translation.clone(),
                domain: analysis.domain.clone(),
                document_type,
                quality_score: if report.total_violations == 0 { 10 } else { 7 },
            })
        } else {
            None
        };

        Ok((
            TranslationOutcome {
                source: source.to_string(),
                translation,
                document_type,
                origin: TranslationOrigin::Oracle,
                analysis,
                tm_matches,
                qa_report: Some(report),
                review_status,
                saved_to_tm: false,
            },
            pending,
        ))
    }
}
