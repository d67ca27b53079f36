/*!
 * End-to-end translation runs against an on-disk memory
 */

use patentko::errors::PipelineError;
use patentko::oracle::MockOracle;
use patentko::pipeline::{PipelineConfig, TranslationOrigin, TranslationPipeline};
use patentko::qa::QaEngine;
use patentko::run_log::{RunLog, RunStage};
use patentko::sections::SectionType;
use patentko::TranslationMemory;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::common::{self, SAMPLE_PATENT};

fn create_pipeline(db_path: &Path, config: PipelineConfig) -> TranslationPipeline {
    let qa = QaEngine::from_files(
        common::shipped_config_path("terminology.json"),
        common::shipped_config_path("style_guide.json"),
    )
    .expect("shipped configuration should load");
    let memory = TranslationMemory::open(db_path).expect("memory should open");
    TranslationPipeline::new(config, qa, memory)
}

#[test]
fn test_translateDocument_withCleanOracle_shouldCommitEverySection() {
    common::init_test_logging();
    let dir = common::create_temp_dir().unwrap();
    let db_path = dir.path().join("tm.db");
    let pipeline = create_pipeline(&db_path, PipelineConfig::default());
    let oracle = common::sample_patent_oracle();
    let mut run_log = RunLog::new();

    let outcome = tokio_test::block_on(pipeline.translate_document(
        &oracle,
        SAMPLE_PATENT,
        &mut run_log,
        None,
    ))
    .unwrap();

    assert_eq!(outcome.sections.len(), 5);
    assert!(outcome.passed(), "{}", outcome.summary());
    assert_eq!(outcome.committed_entries, 5);
    assert_eq!(oracle.translate_calls(), 5);
    assert!(outcome.translation.contains("발명의 명칭"));
    assert!(outcome.translation.contains("1. 상기 화합물을 포함하는 방법."));
    assert_eq!(pipeline.memory().entry_count().unwrap(), 5);
    assert_eq!(run_log.events_for(RunStage::SectionProgress).count(), 5);
}

#[test]
fn test_translateDocument_secondRun_shouldServeEverySectionFromMemory() {
    let dir = common::create_temp_dir().unwrap();
    let db_path = dir.path().join("tm.db");

    let first = create_pipeline(&db_path, PipelineConfig::default());
    let first_outcome = tokio_test::block_on(first.translate_document(
        &common::sample_patent_oracle(),
        SAMPLE_PATENT,
        &mut RunLog::new(),
        None,
    ))
    .unwrap();
    first.into_memory().close().unwrap();

    let second = create_pipeline(&db_path, PipelineConfig::default());
    let oracle = MockOracle::working();
    let second_outcome = tokio_test::block_on(second.translate_document(
        &oracle,
        SAMPLE_PATENT,
        &mut RunLog::new(),
        None,
    ))
    .unwrap();

    assert_eq!(oracle.translate_calls(), 0);
    assert!(second_outcome
        .sections
        .iter()
        .all(|s| s.outcome.origin == TranslationOrigin::TranslationMemory));
    assert_eq!(second_outcome.committed_entries, 0);
    assert_eq!(second_outcome.translation, first_outcome.translation);
}

#[test]
fn test_translateDocument_withFailingOracle_shouldCommitNothing() {
    let dir = common::create_temp_dir().unwrap();
    let db_path = dir.path().join("tm.db");
    let pipeline = create_pipeline(&db_path, PipelineConfig::default());
    let oracle = MockOracle::failing();

    let result = tokio_test::block_on(pipeline.translate_document(
        &oracle,
        SAMPLE_PATENT,
        &mut RunLog::new(),
        None,
    ));

    match result {
        Err(PipelineError::SectionFailed { index, section_type, .. }) => {
            assert_eq!(index, 0);
            assert_eq!(section_type, SectionType::Title);
        }
        other => panic!("expected a section failure, got {:?}", other.map(|o| o.summary())),
    }
    assert_eq!(pipeline.memory().entry_count().unwrap(), 0);
}

#[test]
fn test_translateDocument_withProgressCallback_shouldReportEachSection() {
    let dir = common::create_temp_dir().unwrap();
    let pipeline = create_pipeline(
        &dir.path().join("tm.db"),
        PipelineConfig::default().with_save_to_tm(false),
    );
    let calls = AtomicUsize::new(0);
    let callback = |done: usize, total: usize| {
        assert!(done <= total);
        calls.fetch_add(1, Ordering::SeqCst);
    };

    let outcome = tokio_test::block_on(pipeline.translate_document(
        &common::sample_patent_oracle(),
        SAMPLE_PATENT,
        &mut RunLog::new(),
        Some(&callback),
    ))
    .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 5);
    assert_eq!(outcome.committed_entries, 0);
    assert_eq!(pipeline.memory().entry_count().unwrap(), 0);
}

#[test]
fn test_translateText_withRunLogDirectory_shouldWriteLogFile() {
    let dir = common::create_temp_dir().unwrap();
    let pipeline = create_pipeline(&dir.path().join("tm.db"), PipelineConfig::default());
    let oracle = MockOracle::working()
        .with_translation("A method comprising the compound", "상기 화합물을 포함하는 방법.");
    let mut run_log = RunLog::with_directory(dir.path().join("logs")).unwrap();

    let outcome = tokio_test::block_on(pipeline.translate_text(
        &oracle,
        "A method comprising the compound",
        patentko::DocumentType::Claim,
        &mut run_log,
    ))
    .unwrap();

    assert!(outcome.saved_to_tm);
    let log_path = run_log.file_path().expect("log file should be set").to_path_buf();
    let content = std::fs::read_to_string(log_path).unwrap();
    assert!(content.contains("tm_save"));
    assert!(content.contains("completion"));
}
