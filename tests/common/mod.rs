/*!
 * Common test utilities for the patentko test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use patentko::oracle::MockOracle;

/// A short patent document with every section type
pub const SAMPLE_PATENT: &str = "\
TITLE OF THE INVENTION
Method for Processing Data

ABSTRACT
A method for processing data comprising various steps.

CLAIMS
1. A method comprising the compound.

2. The method of claim 1, wherein the compound is heated.

DETAILED DESCRIPTION
This invention relates to data processing.
";

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Path of a file shipped in the `config/` directory
pub fn shipped_config_path(file_name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("config");
    path.push(file_name);
    path
}

/// Oracle scripted with QA-clean translations for every section of `SAMPLE_PATENT`
pub fn sample_patent_oracle() -> MockOracle {
    MockOracle::working()
        .with_translation("Method for Processing Data", "데이터 처리 방법")
        .with_translation(
            "A method for processing data comprising various steps.",
            "다양한 단계를 포함하는 데이터 처리 방법.",
        )
        .with_translation("1. A method comprising the compound.", "1. 상기 화합물을 포함하는 방법.")
        .with_translation(
            "2. The method of claim 1, wherein the compound is heated.",
            "2. 제1항에 있어서, 상기 화합물이 가열되는, 상기 방법.",
        )
        .with_translation(
            "This invention relates to data processing.",
            "본 발명은 데이터 처리에 관한 것이다.",
        )
}

/// Route library logs through env_logger; safe to call from every test
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
