//! National document number extraction.
//!
//! Argentine document numbers have 8 digits and are printed grouped with
//! dots (`30.123.456`). The labeled form is tried first, then the grouped
//! shape anywhere, then any bare 8-digit run.

use tracing::debug;

use super::patterns::DOCUMENT_NUMBER_PATTERNS;
use super::{ExtractionMatch, FieldExtractor, Strategy};
use crate::document::lines::DocumentText;

/// Document number field extractor.
#[derive(Debug, Clone, Default)]
pub struct DocumentNumberExtractor;

impl DocumentNumberExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for DocumentNumberExtractor {
    type Output = String;

    fn extract(&self, doc: &DocumentText<'_>) -> Option<ExtractionMatch<String>> {
        for (index, pattern) in DOCUMENT_NUMBER_PATTERNS.iter().enumerate() {
            let Some(group) = pattern.captures(doc.raw()).and_then(|caps| caps.get(1)) else {
                continue;
            };

            let number = clean_document_number(group.as_str());
            if !is_document_number(&number) {
                debug!("Rejected document number candidate {:?}", group.as_str());
                continue;
            }

            let strategy = if index == 0 {
                Strategy::LabelPattern
            } else {
                Strategy::ValueShape
            };

            return Some(
                ExtractionMatch::new(number, strategy, group.as_str())
                    .with_position(group.start(), group.end()),
            );
        }

        None
    }
}

/// Remove grouping dots and whitespace.
pub fn clean_document_number(raw: &str) -> String {
    raw.chars().filter(|c| *c != '.' && !c.is_whitespace()).collect()
}

/// Exactly 8 ASCII digits.
pub fn is_document_number(s: &str) -> bool {
    s.len() == 8 && s.bytes().all(|b| b.is_ascii_digit())
}

/// Format a document number with dots (XX.XXX.XXX).
pub fn format_document_number(number: &str) -> String {
    let digits = clean_document_number(number);
    if !is_document_number(&digits) {
        return number.to_string();
    }

    format!("{}.{}.{}", &digits[0..2], &digits[2..5], &digits[5..8])
}
