/*!
 * Error types for the patentko library.
 *
 * This module contains custom error types for the different parts of the
 * translation system, using the thiserror crate for ergonomic error definitions.
 * QA violations are not errors: they are reported as data by the QA engine.
 */

use thiserror::Error;

use crate::sections::SectionType;

/// Errors raised while loading terminology, style or application configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file does not exist
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    /// Configuration file could not be read
    #[error("Failed to read configuration file {path}: {message}")]
    Unreadable {
        /// Path of the file
        path: String,
        /// Underlying IO error text
        message: String,
    },

    /// Configuration file is not valid JSON or does not match the expected shape
    #[error("Malformed configuration {path}: {message}")]
    Malformed {
        /// Path of the file (or a label for in-memory sources)
        path: String,
        /// Parser error text
        message: String,
    },

    /// Configuration parsed but failed structural validation
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Errors surfaced by the translation memory read paths
#[derive(Error, Debug)]
pub enum StorageError {
    /// Opening or initializing the database failed
    #[error("Failed to open translation memory: {0}")]
    Open(String),

    /// A query failed
    #[error("Translation memory query failed: {0}")]
    Query(String),
}

/// Errors that can occur when calling the translation oracle
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OracleError {
    /// The oracle reported a failure for the request
    #[error("Translation request failed: {0}")]
    RequestFailed(String),

    /// The oracle could not be reached or started
    #[error("Oracle unavailable: {0}")]
    Unavailable(String),

    /// The oracle answered with something that could not be parsed
    #[error("Failed to parse oracle response: {0}")]
    ParseError(String),

    /// The oracle answered successfully but without any text
    #[error("Oracle returned an empty translation")]
    EmptyTranslation,
}

/// Errors that abort a pipeline run
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Error from the oracle
    #[error("Oracle error: {0}")]
    Oracle(#[from] OracleError),

    /// Error from the translation memory
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Error from configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A section of a parsed document could not be translated
    #[error("Section {index} ({section_type}) failed: {message}")]
    SectionFailed {
        /// Position of the section in document order
        index: usize,
        /// Type of the failing section
        section_type: SectionType,
        /// Failure description
        message: String,
    },
}

impl From<anyhow::Error> for StorageError {
    fn from(error: anyhow::Error) -> Self {
        Self::Query(format!("{:#}", error))
    }
}
