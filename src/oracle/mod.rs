/*!
 * Translation oracle seam.
 *
 * The oracle is the external service that actually produces Korean text:
 * - `command`: a subprocess speaking JSON on stdin/stdout
 * - `mock`: a scripted oracle for tests and dry runs
 */

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::database::TmMatch;
use crate::errors::OracleError;
use crate::sections::DocumentType;
use crate::terminology::TermMapping;

pub mod command;
pub mod mock;

pub use command::CommandOracle;
pub use mock::{MockBehavior, MockOracle};

/// Translation request handed to the oracle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OracleRequest {
    /// English source text
    pub source_text: String,
    /// Technical domain from the analysis step
    pub domain: String,
    /// English term -> required Korean rendering
    pub term_mapping: TermMapping,
    pub document_type: DocumentType,
    /// Translation of the preceding section, when translating a document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_translation: Option<String>,
    /// Fuzzy TM matches offered as reference material
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reference_matches: Vec<TmMatch>,
}

impl OracleRequest {
    pub fn new(
        source_text: impl Into<String>,
        domain: impl Into<String>,
        term_mapping: TermMapping,
        document_type: DocumentType,
    ) -> Self {
        Self {
            source_text: source_text.into(),
            domain: domain.into(),
            term_mapping,
            document_type,
            previous_translation: None,
            reference_matches: Vec::new(),
        }
    }

    /// Attach the previous segment's translation as context
    pub fn with_previous_translation(mut self, previous: Option<String>) -> Self {
        self.previous_translation = previous;
        self
    }

    /// Attach fuzzy TM matches as reference material
    pub fn with_reference_matches(mut self, matches: Vec<TmMatch>) -> Self {
        self.reference_matches = matches;
        self
    }
}

/// Review request: a first translation to check against its source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub source_text: String,
    pub translation: String,
    pub term_mapping: TermMapping,
    pub document_type: DocumentType,
}

impl ReviewRequest {
    /// Build a review request for the translation of `request`
    pub fn for_translation(request: &OracleRequest, translation: impl Into<String>) -> Self {
        Self {
            source_text: request.source_text.clone(),
            translation: translation.into(),
            term_mapping: request.term_mapping.clone(),
            document_type: request.document_type,
        }
    }
}

/// Successful oracle answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleResponse {
    pub translation: String,
}

impl OracleResponse {
    /// Accept a non-blank translation, trimmed
    pub fn from_text(text: &str) -> Result<Self, OracleError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(OracleError::EmptyTranslation);
        }
        Ok(Self {
            translation: trimmed.to_string(),
        })
    }
}

/// Common trait for every translation oracle
///
/// Implementations are interchangeable inside the pipeline. A failure is
/// terminal for the attempt; the pipeline never retries on its own.
#[async_trait]
pub trait TranslationOracle: Send + Sync + Debug {
    /// Translate the request's source text
    async fn translate(&self, request: &OracleRequest) -> Result<OracleResponse, OracleError>;

    /// Review a first translation and return the (possibly revised) text
    async fn review(&self, request: &ReviewRequest) -> Result<OracleResponse, OracleError>;
}
