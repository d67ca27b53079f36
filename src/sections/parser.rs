/*!
 * Patent section parser.
 *
 * Splits a raw English patent document into title, abstract, individual
 * claims and specification sections, and rebuilds a translated document
 * from translated sections in the original order with Korean headers.
 */

use log::debug;

use super::headers::{detect_header, is_claim_start, translate_header};
use super::model::{Section, SectionMap, SectionType, TranslatedSectionMap, section_count};

/// Line-oriented patent section parser
#[derive(Debug, Clone, Default)]
pub struct SectionParser;

/// Mutable state for one parse pass
struct ParseState<'a> {
    sections: SectionMap,
    /// Type opened by the last header; `None` before the first header
    current: Option<SectionType>,
    buffer: Vec<&'a str>,
    start_line: usize,
    /// Header text waiting to be attached to the next saved section
    pending_heading: String,
}

impl<'a> ParseState<'a> {
    fn new() -> Self {
        Self {
            sections: SectionMap::new(),
            current: None,
            buffer: Vec::new(),
            start_line: 0,
            pending_heading: String::new(),
        }
    }

    /// Save the buffered lines as a section ending at `end_line`.
    ///
    /// Text before the first header is kept as specification.
    fn flush(&mut self, end_line: usize) {
        let content = self.buffer.join("\n").trim().to_string();
        self.buffer.clear();

        if content.is_empty() {
            return;
        }

        let section_type = self.current.unwrap_or(SectionType::Specification);
        let heading = std::mem::take(&mut self.pending_heading);

        self.sections.entry(section_type).or_default().push(Section::new(
            section_type,
            content,
            self.start_line,
            end_line.max(self.start_line),
            heading,
        ));
    }
}

impl SectionParser {
    /// Create a new parser
    pub fn new() -> Self {
        Self
    }

    /// Parse a document into sections grouped by type.
    ///
    /// Inside a claims block every numbered line (`1. ...`, `Claim 2. ...`)
    /// starts a new claim section. A document without any recognised header
    /// becomes a single specification section.
    pub fn parse(&self, text: &str) -> SectionMap {
        let lines: Vec<&str> = text.lines().collect();
        let mut state = ParseState::new();

        for (i, &line) in lines.iter().enumerate() {
            let trimmed = line.trim();

            if trimmed.is_empty() {
                // Leading blank lines belong to nothing
                if !state.buffer.is_empty() || state.current.is_some() {
                    state.buffer.push(line);
                }
                continue;
            }

            if state.current == Some(SectionType::Claim) && is_claim_start(trimmed) {
                state.flush(i.saturating_sub(1));
                state.start_line = i;
                state.buffer.push(line);
                continue;
            }

            if let Some(kind) = detect_header(trimmed) {
                state.flush(i.saturating_sub(1));
                state.current = Some(kind.section_type());
                state.start_line = i;
                state.pending_heading = trimmed.to_string();
                continue;
            }

            if state.buffer.is_empty() && state.current.is_none() {
                state.start_line = i;
            }
            state.buffer.push(line);
        }

        state.flush(lines.len().saturating_sub(1));

        debug!(
            "Parsed document into {} sections ({} lines)",
            section_count(&state.sections),
            lines.len()
        );

        state.sections
    }

    /// Rebuild a document from translated sections.
    ///
    /// Sections from every type are pooled and emitted by ascending start line.
    /// A section with a heading is preceded by the Korean header and a blank line;
    /// every section is followed by a blank line.
    pub fn reconstruct(&self, translated: &TranslatedSectionMap) -> String {
        let mut pooled: Vec<&(Section, String)> = translated.values().flatten().collect();
        pooled.sort_by_key(|(section, _)| section.start_line);

        let mut lines: Vec<String> = Vec::with_capacity(pooled.len() * 4);
        for (section, text) in pooled {
            if !section.heading.is_empty() {
                lines.push(translate_header(&section.heading));
                lines.push(String::new());
            }
            lines.push(text.clone());
            lines.push(String::new());
        }

        lines.join("\n")
    }
}
