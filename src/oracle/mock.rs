/*!
 * Mock oracle implementations for testing.
 *
 * - `MockOracle::working()` - Answers with a scripted or tagged translation
 * - `MockOracle::failing()` - Always fails with an error
 * - `MockOracle::empty()` - Answers with blank text
 * - `MockOracle::failing_review()` - Translates but fails every review
 */

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::{OracleRequest, OracleResponse, ReviewRequest, TranslationOracle};
use crate::errors::OracleError;

/// Behavior mode for the mock oracle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds
    Working,
    /// Fails every Nth translate request
    Intermittent { fail_every: usize },
    /// Always fails
    Failing,
    /// Returns blank text
    Empty,
    /// Translates normally but every review fails
    FailingReview,
}

/// Mock oracle for testing pipeline behavior
#[derive(Debug, Clone)]
pub struct MockOracle {
    behavior: MockBehavior,
    /// Shared across clones
    translate_count: Arc<AtomicUsize>,
    review_count: Arc<AtomicUsize>,
    /// Source text -> translation
    translations: HashMap<String, String>,
    /// First translation -> reviewed translation
    revisions: HashMap<String, String>,
    requests: Arc<Mutex<Vec<OracleRequest>>>,
}

impl MockOracle {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            translate_count: Arc::new(AtomicUsize::new(0)),
            review_count: Arc::new(AtomicUsize::new(0)),
            translations: HashMap::new(),
            revisions: HashMap::new(),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every })
    }

    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    pub fn failing_review() -> Self {
        Self::new(MockBehavior::FailingReview)
    }

    /// Script the translation returned for an exact source text
    pub fn with_translation(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.translations.insert(source.into(), target.into());
        self
    }

    /// Script the review outcome for a first translation
    pub fn with_revision(mut self, first: impl Into<String>, revised: impl Into<String>) -> Self {
        self.revisions.insert(first.into(), revised.into());
        self
    }

    /// Number of translate calls so far
    pub fn translate_calls(&self) -> usize {
        self.translate_count.load(Ordering::SeqCst)
    }

    /// Number of review calls so far
    pub fn review_calls(&self) -> usize {
        self.review_count.load(Ordering::SeqCst)
    }

    /// Every translate request received, in order
    pub fn recorded_requests(&self) -> Vec<OracleRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    fn scripted_translation(&self, source: &str) -> String {
        self.translations
            .get(source)
            .cloned()
            .unwrap_or_else(|| format!("[KO] {}", source))
    }
}

#[async_trait]
impl TranslationOracle for MockOracle {
    async fn translate(&self, request: &OracleRequest) -> Result<OracleResponse, OracleError> {
        let count = self.translate_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        match self.behavior {
            MockBehavior::Working | MockBehavior::FailingReview => {
                OracleResponse::from_text(&self.scripted_translation(&request.source_text))
            }

            MockBehavior::Intermittent { fail_every } => {
                if fail_every > 0 && count % fail_every == fail_every - 1 {
                    Err(OracleError::RequestFailed(format!(
                        "Simulated intermittent failure (request #{})",
                        count + 1
                    )))
                } else {
                    OracleResponse::from_text(&self.scripted_translation(&request.source_text))
                }
            }

            MockBehavior::Failing => Err(OracleError::RequestFailed(
                "Simulated oracle failure".to_string(),
            )),

            MockBehavior::Empty => OracleResponse::from_text(""),
        }
    }

    async fn review(&self, request: &ReviewRequest) -> Result<OracleResponse, OracleError> {
        self.review_count.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            MockBehavior::FailingReview | MockBehavior::Failing => Err(
                OracleError::RequestFailed("Simulated review failure".to_string()),
            ),
            MockBehavior::Empty => OracleResponse::from_text(""),
            _ => {
                let reviewed = self
                    .revisions
                    .get(&request.translation)
                    .unwrap_or(&request.translation);
                OracleResponse::from_text(reviewed)
            }
        }
    }
}
