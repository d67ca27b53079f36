/*!
 * Formatting rules: unit spacing, claim terminal period and sequence-number
 * phrasing.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use super::violation::{Severity, Violation, position_of, tail_chars};
use crate::sections::DocumentType;
use crate::terminology::FormattingRules;

/// Number followed by a degree unit, capturing the gap
static TEMPERATURE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)(\s*)(℃|°C)").expect("Invalid temperature regex")
});

/// Number followed by a percent sign, capturing the gap
static PERCENT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)(\s*)%").expect("Invalid percent regex")
});

/// Any spelling of a sequence-number reference
static SEQUENCE_NUMBER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"서열\s?번호\s?:?\s?(\d+)").expect("Invalid sequence number regex")
});

/// Run the formatting rules enabled in `rules` against a translation
pub fn check_formatting(
    text: &str,
    document_type: DocumentType,
    rules: &FormattingRules,
) -> Vec<Violation> {
    let mut violations = Vec::new();

    if rules.temperature_spacing {
        for caps in TEMPERATURE_REGEX.captures_iter(text) {
            if &caps[2] != " " {
                let whole = caps.get(0).map_or("", |m| m.as_str());
                let start = caps.get(0).map_or(0, |m| m.start());
                violations.push(
                    Violation::new(
                        "format_temperature",
                        Severity::Minor,
                        "Temperature needs exactly one space between number and unit",
                        position_of(text, start),
                        whole,
                    )
                    .with_correct(format!("{} {}", &caps[1], &caps[3])),
                );
            }
        }
    }

    if rules.percentage_spacing {
        for caps in PERCENT_REGEX.captures_iter(text) {
            if &caps[2] != " " {
                let whole = caps.get(0).map_or("", |m| m.as_str());
                let start = caps.get(0).map_or(0, |m| m.start());
                violations.push(
                    Violation::new(
                        "format_percentage",
                        Severity::Minor,
                        "Percentage needs exactly one space between number and sign",
                        position_of(text, start),
                        whole,
                    )
                    .with_correct(format!("{} %", &caps[1])),
                );
            }
        }
    }

    if rules.claim_terminal_period && document_type.is_claim() && !text.trim().ends_with('.') {
        violations.push(
            Violation::new(
                "claim_ending",
                Severity::Major,
                "Claim must end with a period",
                "end of text",
                tail_chars(text, 20),
            )
            .with_correct("... (add a terminal period)"),
        );
    }

    if rules.sequence_number_format {
        for caps in SEQUENCE_NUMBER_REGEX.captures_iter(text) {
            let whole = caps.get(0).map_or("", |m| m.as_str());
            let canonical = format!("서열번호 {}", &caps[1]);
            if whole != canonical {
                let start = caps.get(0).map_or(0, |m| m.start());
                violations.push(
                    Violation::new(
                        "seq_id_format",
                        Severity::Minor,
                        "Sequence number must read '서열번호 N'",
                        position_of(text, start),
                        whole,
                    )
                    .with_correct(canonical),
                );
            }
        }
    }

    violations
}
