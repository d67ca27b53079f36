/*!
 * Tests for section parsing and reconstruction
 */

use patentko::sections::{
    SectionParser, SectionType, TranslatedSectionMap, in_document_order, section_count,
};

use crate::common::SAMPLE_PATENT;

/// Reconstructing with the original text keeps section order and content
#[test]
fn test_parseThenReconstruct_withIdentityTranslation_shouldPreserveOrderAndContent() {
    let parser = SectionParser::new();
    let sections = parser.parse(SAMPLE_PATENT);

    let mut translated = TranslatedSectionMap::new();
    for (section_type, group) in &sections {
        translated.insert(
            *section_type,
            group.iter().map(|s| (s.clone(), s.content.clone())).collect(),
        );
    }
    let rebuilt = parser.reconstruct(&translated);

    let contents: Vec<&str> = in_document_order(&sections)
        .into_iter()
        .map(|s| s.content.as_str())
        .collect();
    let mut cursor = 0;
    for content in &contents {
        let found = rebuilt[cursor..]
            .find(content)
            .unwrap_or_else(|| panic!("'{}' missing or out of order", content));
        cursor += found + content.len();
    }

    assert_eq!(contents.len(), 5);
    assert!(rebuilt.contains("발명의 명칭"));
    assert!(rebuilt.contains("요약서"));
    assert!(rebuilt.contains("청구범위"));
}

/// Each numbered claim becomes its own section
#[test]
fn test_parse_withTwoNumberedClaims_shouldYieldTwoClaimSections() {
    let sections = SectionParser::new().parse(SAMPLE_PATENT);

    assert_eq!(section_count(&sections), 5);
    assert_eq!(sections[&SectionType::Claim].len(), 2);
    assert!(sections[&SectionType::Claim][1].content.starts_with("2. The method"));
}

/// Text without headers degrades to one specification section
#[test]
fn test_parse_withoutHeaders_shouldYieldSingleSpecification() {
    let text = "Some free text.\nAnother line.";
    let sections = SectionParser::new().parse(text);

    assert_eq!(section_count(&sections), 1);
    let only = &sections[&SectionType::Specification][0];
    assert_eq!(only.content, text);
    assert!(only.heading.is_empty());
}
