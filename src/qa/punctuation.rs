/*!
 * Punctuation rules for colons after particles and trailing semicolons.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use super::violation::{Severity, Violation, position_of};
use crate::sections::DocumentType;

/// Particle directly followed by a colon
static PARTICLE_COLON_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(로서|에서|에|를|을|이|가)\s*:").expect("Invalid particle colon regex")
});

/// Claims use a comma after a particle; no text ends on a semicolon
pub fn check_punctuation(text: &str, document_type: DocumentType) -> Vec<Violation> {
    let mut violations = Vec::new();

    if document_type.is_claim() {
        for caps in PARTICLE_COLON_REGEX.captures_iter(text) {
            let whole = caps.get(0).map_or("", |m| m.as_str());
            let start = caps.get(0).map_or(0, |m| m.start());
            violations.push(
                Violation::new(
                    "colon_after_particle",
                    Severity::Major,
                    "Claims must not use a colon after a particle",
                    position_of(text, start),
                    whole,
                )
                .with_correct(format!("{},", &caps[1])),
            );
        }
    }

    if text.trim().ends_with(';') {
        violations.push(
            Violation::new(
                "semicolon_at_list_end",
                Severity::Minor,
                "No semicolon after the last list item",
                "end of text",
                "... ;",
            )
            .with_correct("... (remove the semicolon)"),
        );
    }

    violations
}
