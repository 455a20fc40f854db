//! Rule-based field extractors for identity-document OCR text.
//!
//! Each field is resolved by a cascade of strategies tried from the most
//! constrained (label plus value shape) to the least constrained (value
//! shape or line position alone). The first strategy that yields an
//! acceptable value wins.

pub mod birth_date;
pub mod document_number;
pub mod given_name;
pub mod patterns;
pub mod sex;
pub mod surname;

pub use birth_date::{parse_birth_date, BirthDateExtractor};
pub use document_number::DocumentNumberExtractor;
pub use given_name::GivenNameExtractor;
pub use sex::SexExtractor;
pub use surname::SurnameExtractor;

use serde::{Deserialize, Serialize};

use super::lines::DocumentText;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Run the strategy cascade and return the first accepted value.
    fn extract(&self, doc: &DocumentText<'_>) -> Option<ExtractionMatch<Self::Output>>;
}

/// Kind of rule that produced a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Value on the line right after a recognized label line.
    LabelAdjacent,
    /// Regex anchored on a label in the raw text.
    LabelPattern,
    /// Regex on the value's own shape, without a label.
    ValueShape,
    /// Guess from line position.
    Positional,
}

impl Strategy {
    /// Fixed confidence attached to values found by this strategy.
    pub fn confidence(&self) -> f32 {
        match self {
            Strategy::LabelAdjacent => 0.95,
            Strategy::LabelPattern => 0.85,
            Strategy::ValueShape => 0.7,
            Strategy::Positional => 0.4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::LabelAdjacent => "label_adjacent",
            Strategy::LabelPattern => "label_pattern",
            Strategy::ValueShape => "value_shape",
            Strategy::Positional => "positional",
        }
    }
}

/// Extracted value with the strategy that found it.
#[derive(Debug, Clone)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Strategy that produced the value.
    pub strategy: Strategy,
    /// Confidence score (0.0 - 1.0).
    pub confidence: f32,
    /// Byte span in the raw text, when the value came from a regex scan.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, strategy: Strategy, source: impl Into<String>) -> Self {
        Self {
            value,
            strategy,
            confidence: strategy.confidence(),
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

/// Count characters the way a reader would, not bytes.
pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}
