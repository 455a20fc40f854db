//! Surname extraction.
//!
//! Three strategies in order: the line after a fuzzy-matched "Apellido" /
//! "Surname" label, a regex scan for the label followed by a value line, and
//! finally the first upper-case line that is not boilerplate. On the card the
//! surname precedes the given name, so the first positional candidate is the
//! best guess.

use tracing::debug;

use super::patterns::{
    CANDIDATE_LEADING, CANDIDATE_TRAILING, LEADING_PUNCTUATION, NAME_CANDIDATE, NAME_VALUE,
    SURNAME_LABEL_LINE, SURNAME_PATTERNS,
};
use super::{char_len, ExtractionMatch, FieldExtractor, Strategy};
use crate::document::keywords::NameFilter;
use crate::document::lines::DocumentText;

/// Surname field extractor.
#[derive(Debug, Clone)]
pub struct SurnameExtractor {
    filter: NameFilter,
    positional_fallback: bool,
}

impl SurnameExtractor {
    pub fn new(filter: NameFilter) -> Self {
        Self {
            filter,
            positional_fallback: true,
        }
    }

    /// Enable or disable the positional guess.
    pub fn with_positional_fallback(mut self, enabled: bool) -> Self {
        self.positional_fallback = enabled;
        self
    }

    fn from_label_line(&self, doc: &DocumentText<'_>) -> Option<ExtractionMatch<String>> {
        let lines = doc.lines();
        let index = lines.position(|l| SURNAME_LABEL_LINE.is_match(l))?;
        debug!("Surname label at line {}", index);

        let next = lines.get(index + 1)?;
        debug!("Line after surname label: {:?}", next);

        let value = LEADING_PUNCTUATION.replace(next, "");
        let value = value.trim();

        if NAME_VALUE.is_match(value) && char_len(value) > 1 && !self.filter.rejects_value(value) {
            return Some(ExtractionMatch::new(
                value.to_uppercase(),
                Strategy::LabelAdjacent,
                next,
            ));
        }

        None
    }

    fn from_label_pattern(&self, doc: &DocumentText<'_>) -> Option<ExtractionMatch<String>> {
        for pattern in SURNAME_PATTERNS.iter() {
            let Some(caps) = pattern.captures(doc.raw()) else {
                continue;
            };
            let Some(group) = caps.get(1) else {
                continue;
            };

            let value = LEADING_PUNCTUATION.replace(group.as_str().trim(), "");
            let value = value.trim();

            if char_len(value) > 1 && !self.filter.rejects_value(value) {
                return Some(
                    ExtractionMatch::new(value.to_uppercase(), Strategy::LabelPattern, group.as_str())
                        .with_position(group.start(), group.end()),
                );
            }
        }

        None
    }

    /// Upper-case lines that could be a name, in document order.
    pub fn candidates<'a>(&self, doc: &DocumentText<'a>) -> Vec<(usize, String)> {
        doc.lines()
            .iter()
            .enumerate()
            .filter_map(|(index, line)| {
                let clean = CANDIDATE_LEADING.replace(line, "");
                let clean = CANDIDATE_TRAILING.replace(&clean, "");
                let clean = clean.trim();

                if NAME_CANDIDATE.is_match(clean) && !self.filter.rejects_candidate(clean) {
                    debug!("Surname candidate {}: {:?}", index, clean);
                    Some((index, clean.to_string()))
                } else {
                    None
                }
            })
            .collect()
    }

    fn from_position(&self, doc: &DocumentText<'_>) -> Option<ExtractionMatch<String>> {
        let (_, first) = self.candidates(doc).into_iter().next()?;
        Some(ExtractionMatch::new(
            first.trim().to_uppercase(),
            Strategy::Positional,
            first,
        ))
    }
}

impl Default for SurnameExtractor {
    fn default() -> Self {
        Self::new(NameFilter::default())
    }
}

impl FieldExtractor for SurnameExtractor {
    type Output = String;

    fn extract(&self, doc: &DocumentText<'_>) -> Option<ExtractionMatch<String>> {
        self.from_label_line(doc)
            .or_else(|| self.from_label_pattern(doc))
            .or_else(|| {
                if self.positional_fallback {
                    self.from_position(doc)
                } else {
                    None
                }
            })
    }
}
