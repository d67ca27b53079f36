/*!
 * Terminology and style configuration.
 *
 * Both files are loaded into typed structures and validated up front, so a
 * malformed table stops the program at startup instead of surfacing inside a
 * QA check. Built-in defaults mirror the files shipped under `config/`.
 */

use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::errors::ConfigError;

/// Domain key holding terms shared by every domain
pub const GENERAL_DOMAIN: &str = "general";

/// English term to Korean rendering
pub type TermMapping = BTreeMap<String, String>;

/// Terminology tables consumed by analysis and QA
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TerminologyConfig {
    /// English term -> Korean renderings that must never appear in a translation
    #[serde(default)]
    pub forbidden_translations: BTreeMap<String, Vec<String>>,

    /// Domain -> (English term -> preferred Korean rendering)
    #[serde(default)]
    pub domain_terms: BTreeMap<String, TermMapping>,
}

impl TerminologyConfig {
    /// Load and validate a terminology file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config: Self = load_json(path.as_ref())?;
        config.validate()?;
        debug!(
            "Loaded terminology: {} forbidden entries, {} domains",
            config.forbidden_translations.len(),
            config.domain_terms.len()
        );
        Ok(config)
    }

    /// Parse and validate terminology from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|e| ConfigError::Malformed {
            path: "<inline>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check structural constraints that serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (term, renderings) in &self.forbidden_translations {
            if term.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "forbidden_translations contains an empty English term".to_string(),
                ));
            }
            if renderings.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "forbidden_translations['{}'] has no renderings",
                    term
                )));
            }
            if renderings.iter().any(|r| r.trim().is_empty()) {
                return Err(ConfigError::Invalid(format!(
                    "forbidden_translations['{}'] contains an empty rendering",
                    term
                )));
            }
        }

        for (domain, terms) in &self.domain_terms {
            if domain.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "domain_terms contains an empty domain name".to_string(),
                ));
            }
            for (english, korean) in terms {
                if english.trim().is_empty() || korean.trim().is_empty() {
                    return Err(ConfigError::Invalid(format!(
                        "domain_terms['{}'] contains an empty term or rendering",
                        domain
                    )));
                }
            }
        }

        Ok(())
    }

    /// Preferred renderings for one domain
    pub fn terms_for_domain(&self, domain: &str) -> Option<&TermMapping> {
        self.domain_terms.get(domain)
    }

    /// Terms shared by every domain
    pub fn general_terms(&self) -> Option<&TermMapping> {
        self.domain_terms.get(GENERAL_DOMAIN)
    }
}

impl Default for TerminologyConfig {
    fn default() -> Self {
        let forbidden = [
            ("comprising", vec!["구비하는"]),
            ("detach", vec!["탈착하다"]),
            ("said", vec!["말한"]),
        ];

        let domains: [(&str, &[(&str, &str)]); 5] = [
            (
                GENERAL_DOMAIN,
                &[
                    ("apparatus", "장치"),
                    ("composition", "조성물"),
                    ("compound", "화합물"),
                    ("device", "장치"),
                    ("layer", "층"),
                    ("method", "방법"),
                    ("system", "시스템"),
                ],
            ),
            (
                "electronics_semiconductor",
                &[
                    ("circuit", "회로"),
                    ("layer", "층"),
                    ("semiconductor", "반도체"),
                    ("transistor", "트랜지스터"),
                    ("wafer", "웨이퍼"),
                ],
            ),
            (
                "chemistry_pharma",
                &[
                    ("compound", "화합물"),
                    ("molecule", "분자"),
                    ("reaction", "반응"),
                    ("substrate", "기재"),
                    ("synthesis", "합성"),
                ],
            ),
            (
                "mechanical",
                &[
                    ("distal end", "원위 단부"),
                    ("housing", "하우징"),
                    ("proximal end", "근위 단부"),
                ],
            ),
            (
                "biotech",
                &[
                    ("antibody", "항체"),
                    ("cell", "세포"),
                    ("gene", "유전자"),
                    ("incubate", "정치"),
                    ("protein", "단백질"),
                ],
            ),
        ];

        Self {
            forbidden_translations: forbidden
                .into_iter()
                .map(|(term, list)| {
                    (term.to_string(), list.into_iter().map(String::from).collect())
                })
                .collect(),
            domain_terms: domains
                .into_iter()
                .map(|(domain, terms)| {
                    (
                        domain.to_string(),
                        terms
                            .iter()
                            .map(|(en, ko)| (en.to_string(), ko.to_string()))
                            .collect(),
                    )
                })
                .collect(),
        }
    }
}

/// Style guide consumed by the formatting check
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleGuide {
    #[serde(default)]
    pub formatting_rules: FormattingRules,
}

impl StyleGuide {
    /// Load a style guide file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        load_json(path.as_ref())
    }
}

/// Switches for the individual formatting rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormattingRules {
    /// One space between a number and a degree unit
    #[serde(default = "default_true")]
    pub temperature_spacing: bool,

    /// One space between a number and `%`
    #[serde(default = "default_true")]
    pub percentage_spacing: bool,

    /// Claims end with a period
    #[serde(default = "default_true")]
    pub claim_terminal_period: bool,

    /// Sequence references read `서열번호 N`
    #[serde(default = "default_true")]
    pub sequence_number_format: bool,
}

impl Default for FormattingRules {
    fn default() -> Self {
        Self {
            temperature_spacing: true,
            percentage_spacing: true,
            claim_terminal_period: true,
            sequence_number_format: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Read a JSON file into `T`, mapping each failure onto a configuration error
pub(crate) fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let label = path.display().to_string();

    if !path.exists() {
        return Err(ConfigError::NotFound(label));
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
        path: label.clone(),
        message: e.to_string(),
    })?;

    serde_json::from_str(&content).map_err(|e| ConfigError::Malformed {
        path: label,
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_shouldPassValidation() {
        let config = TerminologyConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.general_terms().unwrap()["compound"], "화합물");
        assert!(config.terms_for_domain("biotech").is_some());
        assert!(config.terms_for_domain("astronomy").is_none());
    }

    #[test]
    fn test_fromJsonStr_withValidTables_shouldLoad() {
        let json = r#"{
            "forbidden_translations": {"comprising": ["구비하는"]},
            "domain_terms": {"general": {"method": "방법"}}
        }"#;

        let config = TerminologyConfig::from_json_str(json).unwrap();
        assert_eq!(config.forbidden_translations["comprising"], vec!["구비하는"]);
    }

    #[test]
    fn test_fromJsonStr_withEmptyForbiddenList_shouldFail() {
        let json = r#"{"forbidden_translations": {"comprising": []}}"#;
        let err = TerminologyConfig::from_json_str(json).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_fromJsonStr_withWrongShape_shouldReportMalformed() {
        let json = r#"{"forbidden_translations": {"comprising": "구비하는"}}"#;
        let err = TerminologyConfig::from_json_str(json).unwrap_err();
        assert!(matches!(err, ConfigError::Malformed { .. }));
    }

    #[test]
    fn test_fromJsonStr_withUnknownField_shouldFail() {
        let json = r#"{"forbidden": {}}"#;
        assert!(TerminologyConfig::from_json_str(json).is_err());
    }

    #[test]
    fn test_fromJsonStr_withEmptyRendering_shouldFail() {
        let json = r#"{"domain_terms": {"general": {"method": " "}}}"#;
        assert!(matches!(
            TerminologyConfig::from_json_str(json),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_fromFile_withMissingFile_shouldReportNotFound() {
        let err = TerminologyConfig::from_file("/nonexistent/terminology.json").unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_styleGuide_fromFile_shouldApplyDefaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"formatting_rules": {{"percentage_spacing": false}}}}"#).unwrap();

        let style = StyleGuide::from_file(file.path()).unwrap();
        assert!(!style.formatting_rules.percentage_spacing);
        assert!(style.formatting_rules.temperature_spacing);
    }

    #[test]
    fn test_styleGuide_withUnknownRule_shouldBeRejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"formatting_rules": {{"bold_headers": true}}}}"#).unwrap();

        assert!(matches!(
            StyleGuide::from_file(file.path()),
            Err(ConfigError::Malformed { .. })
        ));
    }
}
