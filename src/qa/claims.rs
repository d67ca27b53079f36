/*!
 * Claim structure rules: antecedent marker, noun-phrase ending and method
 * claim preamble/ending.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use super::violation::{Severity, Violation, head_chars, tail_chars};

/// Korean marker meaning "the aforementioned"
pub const ANTECEDENT_MARKER: &str = "상기";

/// English nouns tracked for antecedent basis and their Korean renderings
const ANTECEDENT_NOUNS: [(&str, &str); 6] = [
    ("compound", "화합물"),
    ("device", "장치"),
    ("method", "방법"),
    ("system", "시스템"),
    ("apparatus", "장치"),
    ("composition", "조성물"),
];

/// Canonical noun-phrase endings of a Korean claim
pub const CLAIM_ENDINGS: [&str; 7] = [
    "방법.", "장치.", "시스템.", "화합물.", "조성물.", "키트.", "용도.",
];

static DEFINITE_NOUN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bthe\s+(compound|device|method|system|apparatus|composition)")
        .expect("Invalid definite noun regex")
});

/// `상기 <noun>` adjacency pattern per Korean noun
static MARKED_NOUN_REGEXES: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    let mut nouns: Vec<&'static str> = ANTECEDENT_NOUNS.iter().map(|(_, ko)| *ko).collect();
    nouns.sort_unstable();
    nouns.dedup();
    nouns
        .into_iter()
        .map(|ko| {
            let pattern = format!(r"{}\s+{}", ANTECEDENT_MARKER, regex::escape(ko));
            (ko, Regex::new(&pattern).expect("Invalid antecedent regex"))
        })
        .collect()
});

static METHOD_PREAMBLE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"방법으로서,|방법에\s*있어서,").expect("Invalid method preamble regex")
});

static METHOD_ENDING_REGEXES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"포함하는\s*방법\.$",
        r"특성화되는,?\s*방법\.$",
        r"이루어지는\s*방법\.$",
        r"구성되는\s*방법\.$",
    ]
    .into_iter()
    .map(|p| Regex::new(p).expect("Invalid method ending regex"))
    .collect()
});

fn korean_noun_for(english: &str) -> Option<&'static str> {
    let lower = english.to_lowercase();
    ANTECEDENT_NOUNS
        .iter()
        .find(|(en, _)| *en == lower)
        .map(|(_, ko)| *ko)
}

fn has_marked_noun(translation: &str, korean: &str) -> bool {
    MARKED_NOUN_REGEXES
        .iter()
        .find(|(ko, _)| *ko == korean)
        .is_some_and(|(_, re)| re.is_match(translation))
}

/// Definite references in the source need the antecedent marker in the translation.
///
/// One violation per Korean noun that appears in the translation but never
/// directly after the marker. `device` and `apparatus` share a rendering and
/// are reported once.
pub fn check_antecedent_basis(source: &str, translation: &str) -> Vec<Violation> {
    let mut seen: Vec<&'static str> = Vec::new();
    let mut violations = Vec::new();

    for caps in DEFINITE_NOUN_REGEX.captures_iter(source) {
        let Some(korean) = korean_noun_for(&caps[1]) else {
            continue;
        };
        if seen.contains(&korean) {
            continue;
        }
        seen.push(korean);

        if translation.contains(korean) && !has_marked_noun(translation, korean) {
            violations.push(
                Violation::new(
                    "antecedent_basis",
                    Severity::Major,
                    format!(
                        "Noun with antecedent basis ('{}') is missing '{}'",
                        &caps[0],
                        ANTECEDENT_MARKER
                    ),
                    format!("'{}' found", korean),
                    korean,
                )
                .with_correct(format!("{} {}", ANTECEDENT_MARKER, korean)),
            );
        }
    }

    violations
}

/// A claim must close on one of the canonical noun-phrase endings
pub fn check_claim_structure(translation: &str) -> Vec<Violation> {
    let trimmed = translation.trim();
    if CLAIM_ENDINGS.iter().any(|ending| trimmed.ends_with(ending)) {
        return Vec::new();
    }

    vec![
        Violation::new(
            "claim_noun_phrase_ending",
            Severity::Major,
            "Claim does not end with a complete noun phrase",
            "end of text",
            tail_chars(translation, 30),
        )
        .with_correct("... 방법. / ... 장치. etc."),
    ]
}

/// Returns true if "방법" occurs anywhere other than as the closing head noun.
///
/// A claim whose only "방법" is its last word names the method as the head
/// noun of a single noun phrase and has no preamble to check.
fn has_method_preamble_position(trimmed: &str) -> bool {
    let occurrences = trimmed.matches("방법").count();
    let closes_on_method = trimmed.trim_end_matches('.').trim_end().ends_with("방법");

    match occurrences {
        0 => false,
        1 => !closes_on_method,
        _ => true,
    }
}

/// Detailed method-claim preamble and ending checks
pub fn check_method_claim(translation: &str) -> Vec<Violation> {
    let trimmed = translation.trim();
    let mut violations = Vec::new();

    if !trimmed.contains("방법") {
        return violations;
    }

    if has_method_preamble_position(trimmed) && !METHOD_PREAMBLE_REGEX.is_match(trimmed) {
        violations.push(
            Violation::new(
                "method_claim_preamble",
                Severity::Major,
                "Method claim should open with '~방법으로서,' or '~방법에 있어서,'",
                "start of claim",
                format!("{}...", head_chars(trimmed, 50)),
            )
            .with_correct("~방법으로서, ... / ~방법에 있어서, ..."),
        );
    }

    let proper_ending = METHOD_ENDING_REGEXES.iter().any(|re| re.is_match(trimmed));
    if !proper_ending && trimmed.ends_with("방법.") {
        violations.push(
            Violation::new(
                "method_claim_ending_structure",
                Severity::Minor,
                "Method claim ending should be reviewed",
                "end of claim",
                tail_chars(trimmed, 50),
            )
            .with_correct("~를 포함하는 방법. / ~특성화되는, 방법."),
        );
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkAntecedentBasis_withoutMarker_shouldFlagMajor() {
        let violations =
            check_antecedent_basis("A method comprising the compound", "화합물을 포함하는 방법");

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule_id, "antecedent_basis");
        assert_eq!(violations[0].severity, Severity::Major);
        assert_eq!(violations[0].correct, "상기 화합물");
    }

    #[test]
    fn test_checkAntecedentBasis_withMarker_shouldPass() {
        assert!(check_antecedent_basis(
            "A method comprising the compound",
            "상기 화합물을 포함하는 방법."
        )
        .is_empty());
    }

    #[test]
    fn test_checkAntecedentBasis_withoutEnglishPattern_shouldPass() {
        assert!(check_antecedent_basis("A compound", "화합물.").is_empty());
    }

    #[test]
    fn test_checkAntecedentBasis_withSharedRendering_shouldReportOnce() {
        let violations = check_antecedent_basis(
            "the device and the apparatus and THE DEVICE",
            "장치 및 장치",
        );
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].found, "장치");
    }

    #[test]
    fn test_checkAntecedentBasis_withNounMissingFromTranslation_shouldPass() {
        assert!(check_antecedent_basis("the composition", "혼합물.").is_empty());
    }

    #[test]
    fn test_checkClaimStructure_shouldAcceptCanonicalEndings() {
        for ending in CLAIM_ENDINGS {
            let text = format!("A를 포함하는 {}", ending);
            assert!(check_claim_structure(&text).is_empty(), "{}", text);
        }
    }

    #[test]
    fn test_checkClaimStructure_withVerbEnding_shouldFlagMajor() {
        let violations = check_claim_structure("화합물을 포함한다.");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule_id, "claim_noun_phrase_ending");
    }

    #[test]
    fn test_checkMethodClaim_withTerminalHeadNounOnly_shouldPass() {
        assert!(check_method_claim("상기 화합물을 포함하는 방법.").is_empty());
    }

    #[test]
    fn test_checkMethodClaim_withoutPreamble_shouldFlagMajor() {
        let violations =
            check_method_claim("데이터 처리 방법은 A 단계를 포함하는 방법.");

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule_id, "method_claim_preamble");
        assert_eq!(violations[0].severity, Severity::Major);
    }

    #[test]
    fn test_checkMethodClaim_withPreambleAndProperEnding_shouldPass() {
        assert!(check_method_claim("데이터 처리 방법으로서, A 단계를 포함하는 방법.").is_empty());
        assert!(check_method_claim("데이터 처리 방법에 있어서, B로 구성되는 방법.").is_empty());
    }

    #[test]
    fn test_checkMethodClaim_withUnusualEnding_shouldFlagMinor() {
        let violations = check_method_claim("데이터 처리 방법으로서, A 단계를 수행하는 방법.");

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule_id, "method_claim_ending_structure");
        assert_eq!(violations[0].severity, Severity::Minor);
    }

    #[test]
    fn test_checkMethodClaim_withoutMethod_shouldPass() {
        assert!(check_method_claim("A를 포함하는 장치.").is_empty());
    }
}
