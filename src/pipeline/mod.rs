/*!
 * Translation pipeline.
 *
 * - `config`: pipeline options
 * - `orchestrator`: single-text and whole-document translation
 * - `outcome`: result types
 */

pub mod config;
pub mod orchestrator;
pub mod outcome;

pub use config::PipelineConfig;
pub use orchestrator::{TranslationPipeline, translate_with_self_review};
pub use outcome::{
    DocumentOutcome, ReviewStatus, SectionOutcome, TranslationOrigin, TranslationOutcome,
};
