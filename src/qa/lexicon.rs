/*!
 * Fixed lexical tables of known patent mistranslations.
 *
 * Domain mistranslations, numeric comparisons and the "adapted to"
 * transitional phrase fire only when the English trigger is in the source.
 * The standard-terminology rules look at the translation alone.
 */

use super::violation::{Severity, Violation};

/// Known-wrong renderings of an English term
struct Mistranslation {
    english: &'static str,
    wrong: &'static [&'static str],
    correct: &'static str,
    context: Option<&'static str>,
}

const DOMAIN_MISTRANSLATIONS: [Mistranslation; 12] = [
    Mistranslation { english: "substrate", wrong: &["기판"], correct: "기재", context: Some("chemistry") },
    Mistranslation { english: "detach", wrong: &["탈착하다"], correct: "탈리하다", context: None },
    Mistranslation { english: "fault", wrong: &["오류"], correct: "고장", context: Some("mechanical/electrical") },
    Mistranslation { english: "source", wrong: &["공급원"], correct: "선원", context: Some("radiation") },
    Mistranslation { english: "communication", wrong: &["통신"], correct: "연통", context: Some("fluid") },
    Mistranslation { english: "distal end", wrong: &["말단"], correct: "원위 단부", context: None },
    Mistranslation { english: "proximal end", wrong: &["말단"], correct: "근위 단부", context: None },
    Mistranslation { english: "intake", wrong: &["흡기구"], correct: "흡입구", context: Some("liquid") },
    Mistranslation { english: "ground", wrong: &["지면"], correct: "접지", context: Some("electrical") },
    Mistranslation { english: "recite", wrong: &["암송", "열거"], correct: "기술하다", context: None },
    Mistranslation { english: "incubate", wrong: &["배양"], correct: "정치", context: None },
    Mistranslation { english: "adapted to", wrong: &["적합화된"], correct: "~하도록 구성된", context: None },
];

/// Discouraged renderings of "embodiment"
pub const FORBIDDEN_EMBODIMENTS: [&str; 3] = ["실시태양", "실시예", "구현예"];

/// Wrong rendering of "subject matter"
const SUBJECT_MATTER_WRONG: &str = "주제";

/// Numeric comparison phrases: (english, rule id, wrong renderings, correct alternatives)
const NUMERICAL_COMPARISONS: [(&str, &str, &[&str], &str); 2] = [
    (
        "more than one",
        "more_than_one_mistranslation",
        &["하나(1개) 이상", "하나 이상"],
        "둘(2개) 이상 / 하나(1개) 초과",
    ),
    (
        "less than two",
        "less_than_two_mistranslation",
        &["둘(2개) 이하", "둘 이하"],
        "하나(1개) 이하 / 둘(2개) 미만",
    ),
];

const ADAPTED_TO_WRONG: [&str; 2] = ["적합화된", "적응된"];

/// Domain mistranslations, gated on the English term being in the source
pub fn check_domain_terms(source: &str, translation: &str) -> Vec<Violation> {
    let source_lower = source.to_lowercase();
    let mut violations = Vec::new();

    for rule in &DOMAIN_MISTRANSLATIONS {
        if !source_lower.contains(rule.english) {
            continue;
        }

        for wrong in rule.wrong {
            if translation.contains(wrong) {
                let description = match rule.context {
                    Some(context) => {
                        format!("'{}' mistranslated in a {} context", rule.english, context)
                    }
                    None => format!("'{}' mistranslated", rule.english),
                };
                violations.push(
                    Violation::new(
                        format!("domain_mistranslation_{}", rule.english.replace(' ', "_")),
                        Severity::Major,
                        description,
                        format!("'{}' found", wrong),
                        *wrong,
                    )
                    .with_correct(rule.correct),
                );
            }
        }
    }

    violations
}

/// Standard renderings of "embodiment" and "subject matter", translation only
pub fn check_standard_terminology(translation: &str) -> Vec<Violation> {
    let mut violations: Vec<Violation> = FORBIDDEN_EMBODIMENTS
        .iter()
        .filter(|term| translation.contains(**term))
        .map(|term| {
            Violation::new(
                "embodiment_forbidden_term",
                Severity::Minor,
                format!("Avoid '{}' for 'embodiment'", term),
                format!("'{}' found", term),
                *term,
            )
            .with_correct("실시형태 (preferred)")
        })
        .collect();

    if translation.contains(SUBJECT_MATTER_WRONG) {
        violations.push(
            Violation::new(
                "subject_matter_mistranslation",
                Severity::Minor,
                "Avoid '주제' for 'subject matter'",
                "'주제' found",
                SUBJECT_MATTER_WRONG,
            )
            .with_correct("대상물 / 대상"),
        );
    }

    violations
}

/// Numeric comparison phrases rendered with the wrong bound
pub fn check_numerical_expressions(source: &str, translation: &str) -> Vec<Violation> {
    let source_lower = source.to_lowercase();

    NUMERICAL_COMPARISONS
        .iter()
        .filter(|(english, ..)| source_lower.contains(english))
        .filter_map(|(english, rule_id, wrong, correct)| {
            let found = wrong.iter().find(|w| translation.contains(**w))?;
            Some(
                Violation::new(
                    *rule_id,
                    Severity::Major,
                    format!("'{}' mistranslated", english),
                    format!("'{}' found", found),
                    *found,
                )
                .with_correct(*correct),
            )
        })
        .collect()
}

/// "adapted to" rendered as suitability instead of configuration changes claim scope
pub fn check_transitional_phrases(source: &str, translation: &str) -> Vec<Violation> {
    if !source.to_lowercase().contains("adapted to") {
        return Vec::new();
    }

    let found: Vec<&str> = ADAPTED_TO_WRONG
        .iter()
        .copied()
        .filter(|w| translation.contains(w))
        .collect();

    if found.is_empty() {
        return Vec::new();
    }

    vec![
        Violation::new(
            "adapted_to_mistranslation",
            Severity::Critical,
            "'adapted to' mistranslated; affects claim scope",
            found
                .iter()
                .map(|w| format!("'{}' found", w))
                .collect::<Vec<_>>()
                .join(", "),
            found.join("/"),
        )
        .with_correct("~하도록 구성된"),
    ]
}
