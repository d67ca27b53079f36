/*!
 * Rule-based QA for Korean patent translations.
 *
 * - `formatting`: unit spacing, claim period, sequence numbers
 * - `terminology`: configured forbidden renderings
 * - `claims`: antecedent marker, claim ending, method claim structure
 * - `punctuation`: colon after particle, trailing semicolon
 * - `lexicon`: fixed mistranslation tables
 * - `engine`: runs every check and builds the report
 * - `report`: plain-text renderer
 */

pub mod claims;
pub mod engine;
pub mod formatting;
pub mod lexicon;
pub mod punctuation;
pub mod report;
pub mod terminology;
pub mod violation;

// Re-export main types
pub use engine::{CHECK_NAMES, QaEngine};
pub use report::render_report;
pub use violation::{QaReport, Severity, SeverityCounts, Violation};
