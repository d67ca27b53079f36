/*!
 * Translation memory records.
 *
 * These structures map directly to the `translation_memory` table and to the
 * results returned by a memory lookup.
 */

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::sections::DocumentType;

/// How a memory entry matched a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    /// Source text is identical to the query
    Exact,
    /// Source text is similar to the query above the requested threshold
    Fuzzy,
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchType::Exact => write!(f, "exact"),
            MatchType::Fuzzy => write!(f, "fuzzy"),
        }
    }
}

/// Persisted translation memory record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmEntry {
    /// Row id
    pub id: i64,
    pub source_text: String,
    pub target_text: String,
    /// Content hash of `source_text`
    pub source_hash: String,
    pub domain: String,
    /// Stored document type tag (`claim`, `specification`, `abstract`)
    pub document_type: String,
    /// Quality score 0-10
    pub quality_score: i64,
    /// Creation timestamp as written by SQLite
    pub created_at: String,
}

impl TmEntry {
    /// Parse the stored document type tag
    pub fn parsed_document_type(&self) -> Option<DocumentType> {
        self.document_type.parse().ok()
    }
}

/// One result of a memory search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmMatch {
    pub source: String,
    pub target: String,
    pub domain: String,
    pub quality_score: i64,
    /// Similarity to the query in [0, 1]
    pub similarity: f64,
    pub match_type: MatchType,
}

impl TmMatch {
    /// Returns true if the match came from the exact-hash lookup
    pub fn is_exact(&self) -> bool {
        self.match_type == MatchType::Exact
    }
}

/// Aggregate counts over the whole memory
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TmStats {
    /// Number of stored entries
    pub total: i64,
    pub by_domain: BTreeMap<String, i64>,
    pub by_document_type: BTreeMap<String, i64>,
}

impl fmt::Display for TmStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total entries: {}", self.total)?;
        writeln!(f, "By domain:")?;
        for (domain, count) in &self.by_domain {
            writeln!(f, "  {}: {}", domain, count)?;
        }
        writeln!(f, "By document type:")?;
        for (doc_type, count) in &self.by_document_type {
            writeln!(f, "  {}: {}", doc_type, count)?;
        }
        Ok(())
    }
}
