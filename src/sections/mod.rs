/*!
 * Patent document sectioning.
 *
 * - `model`: section, section type and document type definitions
 * - `headers`: English header detection and Korean header names
 * - `parser`: the line-by-line parser and the document reconstructor
 */

pub mod headers;
pub mod model;
pub mod parser;

// Re-export main types
pub use model::{
    DocumentType, Section, SectionMap, SectionType, TranslatedSectionMap, document_type_for,
    in_document_order, section_count,
};
pub use parser::SectionParser;
