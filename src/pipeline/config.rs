/*!
 * Pipeline options.
 */

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Options controlling one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Ask the oracle to review its own first translation
    #[serde(default = "default_true")]
    pub self_review: bool,

    /// Store QA-passing translations in the translation memory
    #[serde(default = "default_true")]
    pub save_to_tm: bool,

    /// Minimum similarity for a TM match to be used
    #[serde(default = "default_tm_threshold")]
    pub tm_threshold: f64,

    /// Maximum number of TM matches kept per lookup
    #[serde(default = "default_max_tm_results")]
    pub max_tm_results: usize,
}

fn default_true() -> bool {
    true
}

fn default_tm_threshold() -> f64 {
    0.95
}

fn default_max_tm_results() -> usize {
    5
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            self_review: default_true(),
            save_to_tm: default_true(),
            tm_threshold: default_tm_threshold(),
            max_tm_results: default_max_tm_results(),
        }
    }
}

impl PipelineConfig {
    /// Enable or disable the self-review pass.
    pub fn with_self_review(mut self, enabled: bool) -> Self {
        self.self_review = enabled;
        self
    }

    /// Enable or disable saving to the translation memory.
    pub fn with_save_to_tm(mut self, enabled: bool) -> Self {
        self.save_to_tm = enabled;
        self
    }

    /// Set the TM lookup threshold.
    pub fn with_tm_threshold(mut self, threshold: f64) -> Self {
        self.tm_threshold = threshold;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.tm_threshold) {
            return Err(ConfigError::Invalid(format!(
                "tm_threshold must be between 0.0 and 1.0, got {}",
                self.tm_threshold
            )));
        }
        if self.max_tm_results == 0 {
            return Err(ConfigError::Invalid(
                "max_tm_results must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
