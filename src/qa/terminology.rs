/*!
 * Forbidden-rendering check driven by the terminology configuration.
 */

use std::collections::BTreeMap;

use super::violation::{Severity, Violation};
use crate::terminology::TermMapping;

/// Flag every configured forbidden rendering present in the translation.
///
/// Matching is on the translation alone; the English term need not occur in
/// the source.
pub fn check_forbidden_terms(
    translation: &str,
    term_mapping: &TermMapping,
    forbidden: &BTreeMap<String, Vec<String>>,
) -> Vec<Violation> {
    let mut violations = Vec::new();

    for (english, renderings) in forbidden {
        for rendering in renderings {
            if translation.contains(rendering.as_str()) {
                let preferred = term_mapping.get(english).cloned().unwrap_or_default();
                violations.push(
                    Violation::new(
                        format!("forbidden_term_{}", english.replace(' ', "_")),
                        Severity::Major,
                        format!("Forbidden rendering of '{}': {}", english, rendering),
                        format!("'{}' found", rendering),
                        rendering.clone(),
                    )
                    .with_correct(preferred),
                );
            }
        }
    }

    violations
}
