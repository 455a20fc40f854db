//! Identity-document field extraction module.

mod keywords;
mod lines;
mod parser;
pub mod rules;

pub use keywords::{KeywordMatcher, NameFilter};
pub use lines::{DocumentText, LineSequence};
pub use parser::{DocumentFieldExtractor, ExtractionResult, FieldMatch};

use lazy_static::lazy_static;

use crate::models::fields::ExtractedFields;

lazy_static! {
    static ref DEFAULT_EXTRACTOR: DocumentFieldExtractor = DocumentFieldExtractor::new();
}

/// Trait for document parsers.
pub trait DocumentParser {
    /// Parse OCR text into fields plus provenance and warnings.
    fn parse(&self, text: &str) -> ExtractionResult;

    /// Parse OCR text into fields only.
    fn extract_fields(&self, text: &str) -> ExtractedFields {
        self.parse(text).fields
    }
}

/// Extract fields from OCR text using the default Argentine DNI profile.
///
/// Never fails: fields that cannot be found are left empty.
pub fn extract(text: &str) -> ExtractedFields {
    DEFAULT_EXTRACTOR.extract_fields(text)
}
