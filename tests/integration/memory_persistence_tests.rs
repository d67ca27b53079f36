/*!
 * Translation memory persistence across connections
 */

use patentko::database::TranslationMemory;
use patentko::sections::DocumentType;

use crate::common;

#[test]
fn test_memory_afterCloseAndReopen_shouldKeepEntries() {
    common::init_test_logging();
    let dir = common::create_temp_dir().unwrap();
    let db_path = dir.path().join("tm.db");

    let memory = TranslationMemory::open(&db_path).unwrap();
    assert!(memory.put(
        "A method comprising the compound",
        "상기 화합물을 포함하는 방법.",
        "chemistry_pharma",
        DocumentType::Claim,
        10,
    ));
    memory.close().unwrap();

    let reopened = TranslationMemory::open(&db_path).unwrap();
    let entry = reopened
        .get("A method comprising the compound")
        .unwrap()
        .expect("entry should survive reopening");

    assert_eq!(entry.target_text, "상기 화합물을 포함하는 방법.");
    assert_eq!(entry.domain, "chemistry_pharma");
    assert_eq!(entry.parsed_document_type(), Some(DocumentType::Claim));
    assert_eq!(entry.quality_score, 10);
}

#[test]
fn test_memory_withRepeatedPut_shouldStayIdempotentOnDisk() {
    let dir = common::create_temp_dir().unwrap();
    let db_path = dir.path().join("tm.db");

    let memory = TranslationMemory::open(&db_path).unwrap();
    for _ in 0..3 {
        assert!(memory.put("same source", "같은 번역", "general", DocumentType::Abstract, 7));
    }
    memory.close().unwrap();

    let reopened = TranslationMemory::open(&db_path).unwrap();
    assert_eq!(reopened.entry_count().unwrap(), 1);
}

#[test]
fn test_memory_stats_shouldGroupByDomainAndDocumentType() {
    let dir = common::create_temp_dir().unwrap();
    let memory = TranslationMemory::open(dir.path().join("tm.db")).unwrap();

    memory.put("first claim", "제1 청구항.", "biotech", DocumentType::Claim, 10);
    memory.put("second claim", "제2 청구항.", "biotech", DocumentType::Claim, 7);
    memory.put("an abstract", "요약.", "electronics", DocumentType::Abstract, 10);

    let stats = memory.stats().unwrap();

    assert_eq!(stats.total, 3);
    assert_eq!(stats.by_domain.get("biotech"), Some(&2));
    assert_eq!(stats.by_domain.get("electronics"), Some(&1));
    assert_eq!(stats.by_document_type.get("claim"), Some(&2));
    assert_eq!(stats.by_document_type.get("abstract"), Some(&1));
}

#[test]
fn test_search_afterReopen_shouldFindFuzzyMatchInDomainOnly() {
    let dir = common::create_temp_dir().unwrap();
    let db_path = dir.path().join("tm.db");

    let memory = TranslationMemory::open(&db_path).unwrap();
    memory.put(
        "A method comprising heating the compound",
        "상기 화합물을 가열하는 단계를 포함하는 방법.",
        "chemistry_pharma",
        DocumentType::Claim,
        10,
    );
    memory.close().unwrap();

    let reopened = TranslationMemory::open(&db_path).unwrap();
    let in_domain = reopened
        .search("A method comprising heating a compound", Some("chemistry_pharma"), 0.7, 5)
        .unwrap();
    let other_domain = reopened
        .search("A method comprising heating a compound", Some("electronics"), 0.7, 5)
        .unwrap();

    assert_eq!(in_domain.len(), 1);
    assert!(!in_domain[0].is_exact());
    assert!(in_domain[0].similarity >= 0.7);
    assert!(other_domain.is_empty());
}
