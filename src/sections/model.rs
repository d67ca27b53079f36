/*!
 * Section model for parsed patent documents.
 *
 * A parsed document is a mapping from section type to the ordered sections of
 * that type. Claims are stored one section per numbered claim.
 */

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Structural category of a section
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionType {
    /// Title of the invention
    Title,
    /// Abstract of the disclosure
    Abstract,
    /// A single numbered claim
    Claim,
    /// Background, field, summary, description and drawings text
    Specification,
}

impl SectionType {
    /// All section types in canonical order
    pub const ALL: [SectionType; 4] = [
        SectionType::Title,
        SectionType::Abstract,
        SectionType::Claim,
        SectionType::Specification,
    ];

    /// Document type used to pick translation and QA policy for this section
    pub fn document_type(&self) -> DocumentType {
        document_type_for(*self)
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionType::Title => write!(f, "title"),
            SectionType::Abstract => write!(f, "abstract"),
            SectionType::Claim => write!(f, "claim"),
            SectionType::Specification => write!(f, "specification"),
        }
    }
}

/// Kind of text being translated, selecting the translation and QA policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// Patent claim (strictest QA policy)
    #[default]
    Claim,
    /// Description text
    Specification,
    /// Abstract text
    Abstract,
}

impl DocumentType {
    /// Returns true for claims, which enable the claim-only QA checks
    pub fn is_claim(&self) -> bool {
        matches!(self, DocumentType::Claim)
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentType::Claim => write!(f, "claim"),
            DocumentType::Specification => write!(f, "specification"),
            DocumentType::Abstract => write!(f, "abstract"),
        }
    }
}

impl std::str::FromStr for DocumentType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "claim" | "claims" => Ok(DocumentType::Claim),
            "specification" => Ok(DocumentType::Specification),
            "abstract" => Ok(DocumentType::Abstract),
            _ => Err(anyhow::anyhow!("Invalid document type: {}", s)),
        }
    }
}

/// Fixed total mapping from section type to document type
pub fn document_type_for(section_type: SectionType) -> DocumentType {
    match section_type {
        SectionType::Title => DocumentType::Specification,
        SectionType::Abstract => DocumentType::Abstract,
        SectionType::Claim => DocumentType::Claim,
        SectionType::Specification => DocumentType::Specification,
    }
}

/// A contiguous run of source lines belonging to one structural category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Structural category
    pub section_type: SectionType,
    /// Section text, trimmed, without the header line
    pub content: String,
    /// First source line (0-based, inclusive)
    pub start_line: usize,
    /// Last source line (0-based, inclusive)
    pub end_line: usize,
    /// Header line that opened this section, empty when there was none
    pub heading: String,
}

impl Section {
    /// Create a new section
    pub fn new(
        section_type: SectionType,
        content: impl Into<String>,
        start_line: usize,
        end_line: usize,
        heading: impl Into<String>,
    ) -> Self {
        Self {
            section_type,
            content: content.into(),
            start_line,
            end_line,
            heading: heading.into(),
        }
    }

    /// Number of source lines covered by this section
    pub fn line_count(&self) -> usize {
        self.end_line.saturating_sub(self.start_line) + 1
    }
}

/// Result of parsing a document: sections grouped by type, each group in document order
pub type SectionMap = BTreeMap<SectionType, Vec<Section>>;

/// Translated sections grouped by type, as consumed by reconstruction
pub type TranslatedSectionMap = BTreeMap<SectionType, Vec<(Section, String)>>;

/// Total number of sections in a parsed document
pub fn section_count(sections: &SectionMap) -> usize {
    sections.values().map(Vec::len).sum()
}

/// All sections of a parsed document in source order
pub fn in_document_order(sections: &SectionMap) -> Vec<&Section> {
    let mut all: Vec<&Section> = sections.values().flatten().collect();
    all.sort_by_key(|s| s.start_line);
    all
}
