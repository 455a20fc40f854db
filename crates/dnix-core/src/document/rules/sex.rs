//! Sex marker extraction.

use super::patterns::SEX_PATTERNS;
use super::{ExtractionMatch, FieldExtractor, Strategy};
use crate::document::lines::DocumentText;
use crate::models::fields::Sex;

/// Sex field extractor: a single `M` or `F` after the "Sexo / Sex" label.
#[derive(Debug, Clone, Default)]
pub struct SexExtractor;

impl SexExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for SexExtractor {
    type Output = Sex;

    fn extract(&self, doc: &DocumentText<'_>) -> Option<ExtractionMatch<Sex>> {
        SEX_PATTERNS.iter().find_map(|pattern| {
            let group = pattern.captures(doc.raw())?.get(1)?;
            let sex = Sex::from_letter(group.as_str())?;
            Some(
                ExtractionMatch::new(sex, Strategy::LabelPattern, group.as_str())
                    .with_position(group.start(), group.end()),
            )
        })
    }
}
