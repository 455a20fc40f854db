//! Given-name extraction.

use tracing::debug;

use super::patterns::{GIVEN_NAME_LABEL_LINE, GIVEN_NAME_LEADING, GIVEN_NAME_PATTERNS, NAME_VALUE};
use super::{char_len, ExtractionMatch, FieldExtractor, Strategy};
use crate::document::keywords::NameFilter;
use crate::document::lines::DocumentText;

/// Given-name field extractor.
///
/// The label must be the exact bilingual "Nombre / Name" line. OCR often
/// reads the tail of that label as a stray "y" at the start of the value
/// line, which is stripped.
#[derive(Debug, Clone, Default)]
pub struct GivenNameExtractor {
    filter: NameFilter,
}

impl GivenNameExtractor {
    pub fn new(filter: NameFilter) -> Self {
        Self { filter }
    }

    fn accept(&self, value: &str) -> bool {
        char_len(value) > 1 && !self.filter.rejects_value(value)
    }

    fn from_label_line(&self, doc: &DocumentText<'_>) -> Option<ExtractionMatch<String>> {
        let lines = doc.lines();
        let index = lines.position(|l| GIVEN_NAME_LABEL_LINE.is_match(l))?;
        debug!("Given name label at line {}", index);

        let next = lines.get(index + 1)?;
        debug!("Line after given name label: {:?}", next);

        let value = strip_leading(next);
        if NAME_VALUE.is_match(&value) && self.accept(&value) {
            return Some(ExtractionMatch::new(
                value.to_uppercase(),
                Strategy::LabelAdjacent,
                next,
            ));
        }

        None
    }

    fn from_label_pattern(&self, doc: &DocumentText<'_>) -> Option<ExtractionMatch<String>> {
        for pattern in GIVEN_NAME_PATTERNS.iter() {
            let Some(group) = pattern.captures(doc.raw()).and_then(|caps| caps.get(1)) else {
                continue;
            };

            let value = strip_leading(group.as_str());
            if self.accept(&value) {
                return Some(
                    ExtractionMatch::new(value.to_uppercase(), Strategy::LabelPattern, group.as_str())
                        .with_position(group.start(), group.end()),
                );
            }
        }

        None
    }
}

fn strip_leading(value: &str) -> String {
    GIVEN_NAME_LEADING.replace(value.trim(), "").trim().to_string()
}

impl FieldExtractor for GivenNameExtractor {
    type Output = String;

    fn extract(&self, doc: &DocumentText<'_>) -> Option<ExtractionMatch<String>> {
        self.from_label_line(doc)
            .or_else(|| self.from_label_pattern(doc))
    }
}
