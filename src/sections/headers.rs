/*!
 * English patent section headers and their Korean renderings.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use super::model::SectionType;

/// Kind of header recognised in the source document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderKind {
    Title,
    Abstract,
    Claims,
    Background,
    Field,
    Summary,
    Description,
    Drawings,
}

impl HeaderKind {
    /// Section type the header opens; descriptive headers collapse into specification
    pub fn section_type(&self) -> SectionType {
        match self {
            HeaderKind::Title => SectionType::Title,
            HeaderKind::Abstract => SectionType::Abstract,
            HeaderKind::Claims => SectionType::Claim,
            HeaderKind::Background
            | HeaderKind::Field
            | HeaderKind::Summary
            | HeaderKind::Description
            | HeaderKind::Drawings => SectionType::Specification,
        }
    }
}

/// Header patterns, matched against the upper-cased, trimmed line.
/// Evaluated in order; the first match wins.
static HEADER_PATTERNS: Lazy<Vec<(HeaderKind, Regex)>> = Lazy::new(|| {
    let table: [(HeaderKind, &str); 18] = [
        (HeaderKind::Title, r"^TITLE\s*(?:OF\s*(?:THE\s*)?INVENTION)?\b"),
        (HeaderKind::Title, r"^(?:INVENTION\s+)?TITLE\b"),
        (HeaderKind::Abstract, r"^ABSTRACT\s*(?:OF\s*(?:THE\s*)?(?:DISCLOSURE|INVENTION))?\b"),
        (HeaderKind::Abstract, r"^TECHNICAL\s+ABSTRACT\b"),
        (HeaderKind::Claims, r"^CLAIMS?\b"),
        (HeaderKind::Claims, r"^WHAT\s+IS\s+CLAIMED\b"),
        (HeaderKind::Claims, r"^WE\s+CLAIM\b"),
        (HeaderKind::Claims, r"^I\s+CLAIM\b"),
        (HeaderKind::Background, r"^BACKGROUND\s*(?:OF\s*(?:THE\s*)?INVENTION)?\b"),
        (HeaderKind::Field, r"^FIELD\s*(?:OF\s*(?:THE\s*)?INVENTION)?\b"),
        (HeaderKind::Summary, r"^SUMMARY\s*(?:OF\s*(?:THE\s*)?INVENTION)?\b"),
        (HeaderKind::Summary, r"^BRIEF\s+SUMMARY\b"),
        (HeaderKind::Description, r"^DETAILED\s+DESCRIPTION\b"),
        (
            HeaderKind::Description,
            r"^DESCRIPTION\s*(?:OF\s*(?:THE\s*)?(?:PREFERRED\s+)?EMBODIMENTS?)?\b",
        ),
        (HeaderKind::Description, r"^DESCRIPTION\s*(?:OF\s*(?:THE\s*)?INVENTION)?\b"),
        (HeaderKind::Drawings, r"^BRIEF\s+DESCRIPTION\s+OF\s+(?:THE\s+)?DRAWINGS?\b"),
        (HeaderKind::Drawings, r"^DESCRIPTION\s+OF\s+(?:THE\s+)?DRAWINGS?\b"),
        (HeaderKind::Field, r"^TECHNICAL\s+FIELD\b"),
    ];

    table
        .into_iter()
        .map(|(kind, pattern)| (kind, Regex::new(pattern).expect("Invalid header regex")))
        .collect()
});

/// Numbered claim line: `1. ...` or `Claim 1. ...`
pub static CLAIM_NUMBER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?i:Claim\s+)?(\d+)\.\s+").expect("Invalid claim number regex")
});

/// English header fragments and their Korean names, most specific first
const HEADER_TRANSLATIONS: [(&str, &str); 13] = [
    ("BRIEF DESCRIPTION OF THE DRAWINGS", "도면의 간단한 설명"),
    ("DESCRIPTION OF THE DRAWINGS", "도면의 간단한 설명"),
    ("DETAILED DESCRIPTION", "발명의 상세한 설명"),
    ("TECHNICAL FIELD", "기술분야"),
    ("TITLE", "발명의 명칭"),
    ("ABSTRACT", "요약서"),
    ("CLAIMS", "청구범위"),
    ("WHAT IS CLAIMED", "청구범위"),
    ("CLAIM", "청구항"),
    ("BACKGROUND", "발명의 배경"),
    ("FIELD", "기술분야"),
    ("SUMMARY", "발명의 요약"),
    ("DESCRIPTION", "설명"),
];

/// Longest header line accepted, in words
const MAX_HEADER_WORDS: usize = 8;

/// Header lines are short and carry no sentence punctuation before their end
fn has_header_shape(line: &str) -> bool {
    let body = line.trim_end_matches([':', '.']);
    line.split_whitespace().count() <= MAX_HEADER_WORDS
        && !body.contains([',', ';', '.'])
}

/// Detect a section header in a trimmed line.
///
/// Body lines that merely start with a header word (`claims 1 to 3, wherein`,
/// `Description of FIG. 1 shows`) are rejected by their shape.
pub fn detect_header(line: &str) -> Option<HeaderKind> {
    let upper = line.trim().to_uppercase();
    if upper.is_empty() || !has_header_shape(&upper) {
        return None;
    }

    HEADER_PATTERNS
        .iter()
        .find(|(_, pattern)| pattern.is_match(&upper))
        .map(|(kind, _)| *kind)
}

/// Check whether a line starts a numbered claim
pub fn is_claim_start(line: &str) -> bool {
    CLAIM_NUMBER_REGEX.is_match(line)
}

/// Translate an English header line into its Korean name.
///
/// Falls back to the original heading when no table entry is a
/// case-insensitive substring of it.
pub fn translate_header(heading: &str) -> String {
    let upper = heading.to_uppercase();

    HEADER_TRANSLATIONS
        .iter()
        .find(|(english, _)| upper.contains(english))
        .map(|(_, korean)| korean.to_string())
        .unwrap_or_else(|| heading.to_string())
}
