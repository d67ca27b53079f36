/*!
 * Translation memory store.
 *
 * Entries are keyed by a content hash of the source text. Lookups first try
 * the exact hash, then fall back to a bounded fuzzy scan over the
 * highest-quality candidates.
 */

use anyhow::{Context, Result};
use log::{debug, error, info, warn};
use rusqlite::{params, Connection, OptionalExtension};
use sha2::{Digest, Sha256};
use std::path::Path;

use super::connection::DatabaseConnection;
use super::models::{MatchType, TmEntry, TmMatch, TmStats};
use super::similarity;
use crate::errors::StorageError;
use crate::sections::DocumentType;

/// Maximum number of rows scanned by a fuzzy search
pub const FUZZY_CANDIDATE_LIMIT: usize = 100;

/// Highest allowed quality score
pub const MAX_QUALITY_SCORE: i64 = 10;

/// A write waiting to be applied to the memory
#[derive(Debug, Clone, PartialEq)]
pub struct PendingEntry {
    pub source: String,
    pub target: String,
    pub domain: String,
    pub document_type: DocumentType,
    pub quality_score: i64,
}

/// Persistent translation memory backed by a single SQLite connection
#[derive(Debug)]
pub struct TranslationMemory {
    db: DatabaseConnection,
}

impl TranslationMemory {
    /// Create a memory over an already opened connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Open the memory stored at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let db = DatabaseConnection::new(path)
            .map_err(|e| StorageError::Open(format!("{:#}", e)))?;
        Ok(Self::new(db))
    }

    /// Open the memory at the default location
    pub fn new_default() -> Result<Self, StorageError> {
        let db =
            DatabaseConnection::new_default().map_err(|e| StorageError::Open(format!("{:#}", e)))?;
        Ok(Self::new(db))
    }

    /// Create a memory over an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self, StorageError> {
        let db = DatabaseConnection::new_in_memory()
            .map_err(|e| StorageError::Open(format!("{:#}", e)))?;
        Ok(Self::new(db))
    }

    /// Path of the underlying database
    pub fn path(&self) -> &Path {
        self.db.path()
    }

    /// Content hash used as the uniqueness key: SHA-256 truncated to 128 bits
    pub fn hash_text(text: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(text.as_bytes());
        let digest = hasher.finalize();
        digest[..16].iter().map(|b| format!("{:02x}", b)).collect()
    }

    /// Insert or replace the entry for `source`.
    ///
    /// Storage failures are logged and reported as `false`.
    pub fn put(
        &self,
        source: &str,
        target: &str,
        domain: &str,
        document_type: DocumentType,
        quality_score: i64,
    ) -> bool {
        let entry = PendingEntry {
            source: source.to_string(),
            target: target.to_string(),
            domain: domain.to_string(),
            document_type,
            quality_score,
        };

        match self.db.execute(|conn| insert_entry(conn, &entry)) {
            Ok(()) => {
                debug!("Saved translation memory entry ({} chars)", source.chars().count());
                true
            }
            Err(e) => {
                error!("Failed to save translation memory entry: {:#}", e);
                false
            }
        }
    }

    /// Apply several writes in one transaction; either all of them land or none.
    ///
    /// Storage failures are logged and reported as `false`.
    pub fn put_all(&self, entries: &[PendingEntry]) -> bool {
        if entries.is_empty() {
            return true;
        }

        let result = self.db.transaction(|tx| {
            for entry in entries {
                insert_entry(tx, entry)?;
            }
            Ok(())
        });

        match result {
            Ok(()) => {
                info!("Committed {} translation memory entries", entries.len());
                true
            }
            Err(e) => {
                error!(
                    "Failed to commit {} translation memory entries: {:#}",
                    entries.len(),
                    e
                );
                false
            }
        }
    }

    /// Search for entries matching `source`.
    ///
    /// An identical source returns a single exact match regardless of
    /// `domain` and `threshold`. Otherwise at most `FUZZY_CANDIDATE_LIMIT`
    /// entries, best quality first and optionally restricted to `domain`,
    /// are scored; those at or above `threshold` are returned best first,
    /// capped at `max_results`.
    pub fn search(
        &self,
        source: &str,
        domain: Option<&str>,
        threshold: f64,
        max_results: usize,
    ) -> Result<Vec<TmMatch>, StorageError> {
        let source_hash = Self::hash_text(source);

        let exact = self.db.execute(|conn| {
            conn.query_row(
                r#"
                SELECT source_text, target_text, domain, quality_score
                FROM translation_memory
                WHERE source_hash = ?1
                "#,
                params![source_hash],
                |row| {
                    Ok(TmMatch {
                        source: row.get(0)?,
                        target: row.get(1)?,
                        domain: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                        quality_score: row.get::<_, Option<i64>>(3)?.unwrap_or(0),
                        similarity: 1.0,
                        match_type: MatchType::Exact,
                    })
                },
            )
            .optional()
            .context("Exact lookup failed")
        })?;

        if let Some(found) = exact {
            debug!("Exact translation memory hit");
            return Ok(vec![found]);
        }

        let candidates = self.db.execute(|conn| load_candidates(conn, domain))?;

        let mut matches: Vec<TmMatch> = candidates
            .into_iter()
            .filter_map(|(source_text, target, entry_domain, quality_score)| {
                let score = similarity::ratio(source, &source_text);
                (score >= threshold).then(|| TmMatch {
                    source: source_text,
                    target,
                    domain: entry_domain,
                    quality_score,
                    similarity: score,
                    match_type: MatchType::Fuzzy,
                })
            })
            .collect();

        matches.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
        matches.truncate(max_results);

        debug!(
            "Fuzzy translation memory search found {} matches (threshold {:.2})",
            matches.len(),
            threshold
        );

        Ok(matches)
    }

    /// Fetch the full entry stored for exactly `source`
    pub fn get(&self, source: &str) -> Result<Option<TmEntry>, StorageError> {
        let source_hash = Self::hash_text(source);

        let entry = self.db.execute(|conn| {
            conn.query_row(
                r#"
                SELECT id, source_text, target_text, source_hash, domain,
                       document_type, quality_score, created_at
                FROM translation_memory
                WHERE source_hash = ?1
                "#,
                params![source_hash],
                |row| {
                    Ok(TmEntry {
                        id: row.get(0)?,
                        source_text: row.get(1)?,
                        target_text: row.get(2)?,
                        source_hash: row.get(3)?,
                        domain: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
                        document_type: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
                        quality_score: row.get::<_, Option<i64>>(6)?.unwrap_or(0),
                        created_at: row.get::<_, Option<String>>(7)?.unwrap_or_default(),
                    })
                },
            )
            .optional()
            .context("Entry lookup failed")
        })?;

        Ok(entry)
    }

    /// Number of stored entries
    pub fn entry_count(&self) -> Result<i64, StorageError> {
        let count = self.db.execute(|conn| {
            conn.query_row("SELECT COUNT(*) FROM translation_memory", [], |row| row.get(0))
                .context("Failed to count entries")
        })?;
        Ok(count)
    }

    /// Total count plus counts grouped by domain and by document type
    pub fn stats(&self) -> Result<TmStats, StorageError> {
        let stats = self.db.execute(|conn| {
            let total: i64 = conn
                .query_row("SELECT COUNT(*) FROM translation_memory", [], |row| row.get(0))
                .context("Failed to count entries")?;

            Ok(TmStats {
                total,
                by_domain: grouped_counts(conn, "domain")?,
                by_document_type: grouped_counts(conn, "document_type")?,
            })
        })?;
        Ok(stats)
    }

    /// Release the underlying connection
    pub fn close(self) -> Result<(), StorageError> {
        self.db
            .close()
            .map_err(|e| StorageError::Query(format!("{:#}", e)))
    }
}

/// Upsert one entry; an existing row with the same hash is replaced
fn insert_entry(conn: &Connection, entry: &PendingEntry) -> Result<()> {
    let quality_score = clamp_quality(entry.quality_score);

    conn.execute(
        r#"
        INSERT OR REPLACE INTO translation_memory (
            source_text, target_text, source_hash, domain, document_type, quality_score
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
        params![
            entry.source,
            entry.target,
            TranslationMemory::hash_text(&entry.source),
            entry.domain,
            entry.document_type.to_string(),
            quality_score,
        ],
    )
    .context("Failed to upsert translation memory entry")?;

    Ok(())
}

fn clamp_quality(score: i64) -> i64 {
    if !(0..=MAX_QUALITY_SCORE).contains(&score) {
        warn!(
            "Quality score {} outside 0..={}, clamping",
            score, MAX_QUALITY_SCORE
        );
    }
    score.clamp(0, MAX_QUALITY_SCORE)
}

/// Best-quality candidates for fuzzy scoring
fn load_candidates(
    conn: &Connection,
    domain: Option<&str>,
) -> Result<Vec<(String, String, String, i64)>> {
    let map_row = |row: &rusqlite::Row| -> rusqlite::Result<(String, String, String, i64)> {
        Ok((
            row.get(0)?,
            row.get(1)?,
            row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            row.get::<_, Option<i64>>(3)?.unwrap_or(0),
        ))
    };

    let limit = FUZZY_CANDIDATE_LIMIT as i64;
    let rows = match domain {
        Some(domain) => {
            let mut stmt = conn.prepare(
                r#"
                SELECT source_text, target_text, domain, quality_score
                FROM translation_memory
                WHERE domain = ?1
                ORDER BY quality_score DESC
                LIMIT ?2
                "#,
            )?;
            let rows = stmt
                .query_map(params![domain, limit], map_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            rows
        }
        None => {
            let mut stmt = conn.prepare(
                r#"
                SELECT source_text, target_text, domain, quality_score
                FROM translation_memory
                ORDER BY quality_score DESC
                LIMIT ?1
                "#,
            )?;
            let rows = stmt
                .query_map(params![limit], map_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            rows
        }
    };

    Ok(rows)
}

/// Row counts grouped by a column of the memory table
fn grouped_counts(
    conn: &Connection,
    column: &str,
) -> Result<std::collections::BTreeMap<String, i64>> {
    let sql = format!(
        "SELECT COALESCE({col}, ''), COUNT(*) FROM translation_memory GROUP BY {col}",
        col = column
    );
    let mut stmt = conn.prepare(&sql)?;
    let counts = stmt
        .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))?
        .collect::<rusqlite::Result<_>>()
        .with_context(|| format!("Failed to group entries by {}", column))?;
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_memory() -> TranslationMemory {
        TranslationMemory::new_in_memory().expect("Failed to create test memory")
    }

    #[test]
    fn test_hashText_shouldBeDeterministic128Bit() {
        let first = TranslationMemory::hash_text("A method comprising");
        let second = TranslationMemory::hash_text("A method comprising");

        assert_eq!(first, second);
        assert_eq!(first.len(), 32);
        assert_ne!(first, TranslationMemory::hash_text("A method comprising:"));
    }

    #[test]
    fn test_put_withDuplicateSource_shouldKeepSingleEntry() {
        let tm = create_test_memory();

        assert!(tm.put("A", "B", "general", DocumentType::Claim, 8));
        assert!(tm.put("A", "B", "general", DocumentType::Claim, 8));

        assert_eq!(tm.entry_count().unwrap(), 1);
        assert_eq!(tm.stats().unwrap().total, 1);
    }

    #[test]
    fn test_put_withNewTarget_shouldReplaceExisting() {
        let tm = create_test_memory();

        tm.put("source", "first", "general", DocumentType::Claim, 9);
        tm.put("source", "second", "biotech", DocumentType::Abstract, 3);

        let entry = tm.get("source").unwrap().expect("entry missing");
        assert_eq!(entry.target_text, "second");
        assert_eq!(entry.domain, "biotech");
        assert_eq!(entry.document_type, "abstract");
        assert_eq!(entry.quality_score, 3);
    }

    #[test]
    fn test_put_withOutOfRangeScore_shouldClamp() {
        let tm = create_test_memory();

        tm.put("high", "x", "general", DocumentType::Claim, 42);
        tm.put("low", "y", "general", DocumentType::Claim, -1);

        assert_eq!(tm.get("high").unwrap().unwrap().quality_score, 10);
        assert_eq!(tm.get("low").unwrap().unwrap().quality_score, 0);
    }

    #[test]
    fn test_search_withExactSource_shouldIgnoreThresholdAndDomain() {
        let tm = create_test_memory();
        tm.put("A", "B", "mechanical", DocumentType::Claim, 5);

        let results = tm.search("A", Some("biotech"), 0.0, 5).unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].similarity, 1.0);
        assert_eq!(results[0].match_type, MatchType::Exact);
        assert_eq!(results[0].target, "B");
    }

    #[test]
    fn test_search_withSimilarSource_shouldReturnFuzzyMatches() {
        let tm = create_test_memory();
        tm.put("The device of claim 1", "제1항의 장치", "general", DocumentType::Claim, 7);
        tm.put("A completely unrelated line", "무관", "general", DocumentType::Claim, 7);

        let results = tm.search("The device of claim 2", None, 0.8, 5).unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].match_type, MatchType::Fuzzy);
        assert!(results[0].similarity < 1.0);
        assert_eq!(results[0].target, "제1항의 장치");
    }

    #[test]
    fn test_search_shouldSortBySimilarityAndCap() {
        let tm = create_test_memory();
        tm.put("abcdefgh", "1", "general", DocumentType::Claim, 5);
        tm.put("abcdefxx", "2", "general", DocumentType::Claim, 9);
        tm.put("abcdxxxx", "3", "general", DocumentType::Claim, 7);

        let results = tm.search("abcdefgz", None, 0.0, 2).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].target, "1");
        assert_eq!(results[1].target, "2");
        assert!(results[0].similarity >= results[1].similarity);
    }

    #[test]
    fn test_search_raisingThreshold_shouldNeverIncreaseResults() {
        let tm = create_test_memory();
        for (i, text) in ["substrate layer", "substrate layers", "wafer layer", "drug"]
            .iter()
            .enumerate()
        {
            tm.put(text, &i.to_string(), "general", DocumentType::Specification, 5);
        }

        let mut previous = usize::MAX;
        for threshold in [0.0, 0.3, 0.5, 0.7, 0.9, 1.0] {
            let count = tm.search("substrate lay", None, threshold, 10).unwrap().len();
            assert!(count <= previous);
            previous = count;
        }
    }

    #[test]
    fn test_search_withDomain_shouldRestrictFuzzyCandidates() {
        let tm = create_test_memory();
        tm.put("a wafer substrate", "웨이퍼 기판", "electronics_semiconductor", DocumentType::Claim, 5);
        tm.put("a wafer substrates", "웨이퍼 기판들", "chemistry_pharma", DocumentType::Claim, 5);

        let results = tm
            .search("a wafer substrate.", Some("chemistry_pharma"), 0.5, 5)
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].domain, "chemistry_pharma");
    }

    #[test]
    fn test_search_shouldScanAtMostCandidateLimit() {
        let tm = create_test_memory();
        // Low-quality exact-prefix entry falls outside the best 100
        for i in 0..FUZZY_CANDIDATE_LIMIT {
            tm.put(&format!("zzzz {}", i), "z", "general", DocumentType::Claim, 9);
        }
        tm.put("the housing is sealed", "하우징", "general", DocumentType::Claim, 1);

        let results = tm.search("the housing is sealed!", None, 0.9, 5).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_stats_shouldGroupByDomainAndType() {
        let tm = create_test_memory();
        tm.put("one", "1", "biotech", DocumentType::Claim, 5);
        tm.put("two", "2", "biotech", DocumentType::Abstract, 5);
        tm.put("three", "3", "mechanical", DocumentType::Claim, 5);

        let stats = tm.stats().unwrap();

        assert_eq!(stats.total, 3);
        assert_eq!(stats.by_domain["biotech"], 2);
        assert_eq!(stats.by_domain["mechanical"], 1);
        assert_eq!(stats.by_document_type["claim"], 2);
        assert_eq!(stats.by_document_type["abstract"], 1);
    }

    #[test]
    fn test_putAll_shouldCommitEveryEntry() {
        let tm = create_test_memory();
        let entries: Vec<PendingEntry> = ["x", "y"]
            .iter()
            .map(|s| PendingEntry {
                source: s.to_string(),
                target: s.to_uppercase(),
                domain: "general".into(),
                document_type: DocumentType::Specification,
                quality_score: 10,
            })
            .collect();

        assert!(tm.put_all(&entries));
        assert_eq!(tm.entry_count().unwrap(), 2);
        assert!(tm.put_all(&[]));
    }

    #[test]
    fn test_open_shouldPersistAcrossInstances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tm.db");

        let tm = TranslationMemory::open(&path).unwrap();
        assert!(tm.put("persisted", "저장됨", "general", DocumentType::Claim, 10));
        tm.close().unwrap();

        let reopened = TranslationMemory::open(&path).unwrap();
        let results = reopened.search("persisted", None, 0.95, 5).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].target, "저장됨");
    }

    /// Memory whose table accepts reads but aborts every insert
    fn create_read_only_memory() -> TranslationMemory {
        let db = DatabaseConnection::new_in_memory().unwrap();
        db.execute(|conn| {
            conn.execute_batch(
                "CREATE TRIGGER reject_inserts BEFORE INSERT ON translation_memory
                 BEGIN SELECT RAISE(ABORT, 'read only'); END;",
            )?;
            Ok(())
        })
        .unwrap();
        TranslationMemory::new(db)
    }

    fn pending(source: &str) -> PendingEntry {
        PendingEntry {
            source: source.to_string(),
            target: source.to_uppercase(),
            domain: "general".into(),
            document_type: DocumentType::Claim,
            quality_score: 10,
        }
    }

    #[test]
    fn test_put_withMissingTable_shouldReturnFalseAndSearchShouldFail() {
        let tm = create_test_memory();
        tm.db
            .execute(|conn| {
                conn.execute_batch("DROP TABLE translation_memory")?;
                Ok(())
            })
            .unwrap();

        assert!(!tm.put("source", "target", "general", DocumentType::Claim, 10));
        assert!(!tm.put_all(&[pending("a"), pending("b")]));
        assert!(tm.search("source", None, 0.5, 5).is_err());
        assert!(tm.stats().is_err());
    }

    #[test]
    fn test_putAll_withRejectedInsert_shouldLeaveMemoryUnchanged() {
        let tm = create_read_only_memory();

        assert!(!tm.put("source", "target", "general", DocumentType::Claim, 10));
        assert!(!tm.put_all(&[pending("a"), pending("b")]));
        assert!(tm.search("a", None, 0.5, 5).unwrap().is_empty());
        assert_eq!(tm.entry_count().unwrap(), 0);
    }
}
