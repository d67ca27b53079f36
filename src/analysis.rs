/*!
 * Document analysis run before translation.
 *
 * Identifies the technical domain, extracts frequent technical terms, spots
 * repeated claim phrasing and builds the term mapping handed to the oracle
 * and the QA engine.
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::terminology::{GENERAL_DOMAIN, TermMapping, TerminologyConfig};

/// Domain keyword lists, in tie-break order
const DOMAIN_KEYWORDS: [(&str, &[&str]); 4] = [
    (
        "electronics_semiconductor",
        &["substrate", "layer", "semiconductor", "wafer", "transistor", "chip", "circuit"],
    ),
    (
        "chemistry_pharma",
        &["compound", "molecule", "pharmaceutical", "drug", "synthesis", "reaction", "chemical"],
    ),
    (
        "mechanical",
        &["distal", "proximal", "apparatus", "device", "mechanical", "housing"],
    ),
    (
        "biotech",
        &["protein", "cell", "antibody", "gene", "dna", "rna", "biological"],
    ),
];

const STOPWORDS: [&str; 12] = [
    "The", "A", "An", "In", "Of", "And", "Or", "To", "For", "With", "By", "At",
];

/// Default number of technical terms kept by `analyze`
pub const DEFAULT_TOP_TERMS: usize = 20;

static CAPITALIZED_PHRASE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*\b").expect("Invalid capitalized phrase regex")
});

static PATENT_NOUN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:substrate|layer|compound|method|device|system|apparatus)\b")
        .expect("Invalid patent noun regex")
});

static CLAIM_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    [
        ("comprising", r"(?i)comprising\s+[A-Za-z,\s]+"),
        ("wherein", r"(?i)wherein\s+[^.;]+"),
        ("selected from", r"(?i)selected\s+from\s+[^.;]+"),
        ("consisting of", r"(?i)consisting\s+of\s+[^.;]+"),
    ]
    .into_iter()
    .map(|(name, pattern)| (name, Regex::new(pattern).expect("Invalid claim pattern regex")))
    .collect()
});

/// Repeated claim phrasing found in a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatedPattern {
    pub name: String,
    pub count: usize,
}

impl std::fmt::Display for RepeatedPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} occurrences", self.name, self.count)
    }
}

/// Output of the analysis step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    pub domain: String,
    /// Terms with their counts, most frequent first
    pub technical_terms: Vec<(String, usize)>,
    pub patterns: Vec<RepeatedPattern>,
    pub term_mapping: TermMapping,
}

/// Identify the technical domain by keyword presence.
///
/// Each keyword found (case-insensitive substring) scores one point. The
/// highest score wins, ties go to the earlier domain, zero yields `general`.
pub fn identify_domain(text: &str) -> &'static str {
    let lower = text.to_lowercase();
    let mut best = (GENERAL_DOMAIN, 0usize);

    for (domain, keywords) in DOMAIN_KEYWORDS {
        let score = keywords.iter().filter(|kw| lower.contains(**kw)).count();
        if score > best.1 {
            best = (domain, score);
        }
    }

    best.0
}

/// Most frequent technical terms.
///
/// Capitalised phrases and a fixed set of patent nouns are counted; ties keep
/// first-seen order. Stopwords and terms of two characters or fewer are dropped
/// from the best `2 * top_n` before truncating to `top_n`.
pub fn extract_technical_terms(text: &str, top_n: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    let matches = CAPITALIZED_PHRASE_REGEX
        .find_iter(text)
        .chain(PATENT_NOUN_REGEX.find_iter(text));

    for (order, m) in matches.enumerate() {
        counts.entry(m.as_str()).or_insert((0, order)).0 += 1;
    }

    let mut ranked: Vec<(&str, usize, usize)> = counts
        .into_iter()
        .map(|(term, (count, order))| (term, count, order))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    ranked
        .into_iter()
        .take(top_n * 2)
        .filter(|(term, _, _)| !STOPWORDS.contains(term) && term.chars().count() > 2)
        .take(top_n)
        .map(|(term, count, _)| (term.to_string(), count))
        .collect()
}

/// Claim phrasings that occur at least twice
pub fn identify_patterns(text: &str) -> Vec<RepeatedPattern> {
    CLAIM_PATTERNS
        .iter()
        .filter_map(|(name, re)| {
            let count = re.find_iter(text).count();
            (count >= 2).then(|| RepeatedPattern {
                name: name.to_string(),
                count,
            })
        })
        .collect()
}

/// Build the term mapping: the domain's configured terms, then general terms
/// for any extracted technical term (looked up lower-cased, keyed as found).
pub fn build_term_mapping(
    technical_terms: &[(String, usize)],
    domain: &str,
    terminology: &TerminologyConfig,
) -> TermMapping {
    let mut mapping = terminology
        .terms_for_domain(domain)
        .cloned()
        .unwrap_or_default();

    if let Some(general) = terminology.general_terms() {
        for (term, _) in technical_terms {
            if let Some(korean) = general.get(&term.to_lowercase()) {
                mapping.insert(term.clone(), korean.clone());
            }
        }
    }

    mapping
}

/// Analyzer bound to one terminology configuration
#[derive(Debug, Clone)]
pub struct DocumentAnalyzer<'a> {
    terminology: &'a TerminologyConfig,
}

impl<'a> DocumentAnalyzer<'a> {
    pub fn new(terminology: &'a TerminologyConfig) -> Self {
        Self { terminology }
    }

    /// Run every analysis step over `text`
    pub fn analyze(&self, text: &str) -> DocumentAnalysis {
        let domain = identify_domain(text);
        let technical_terms = extract_technical_terms(text, DEFAULT_TOP_TERMS);
        let patterns = identify_patterns(text);
        let term_mapping = build_term_mapping(&technical_terms, domain, self.terminology);

        debug!(
            "Analysis: domain={}, {} terms, {} repeated patterns, {} mapped terms",
            domain,
            technical_terms.len(),
            patterns.len(),
            term_mapping.len()
        );

        DocumentAnalysis {
            domain: domain.to_string(),
            technical_terms,
            patterns,
            term_mapping,
        }
    }
}
