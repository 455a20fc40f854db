//! Document field extractor combining the per-field rule cascades.

use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, error, info};

use crate::error::Result;
use crate::models::config::{DnixConfig, LayoutProfile};
use crate::models::fields::{ExtractedFields, Field};

use super::keywords::NameFilter;
use super::lines::DocumentText;
use super::rules::{
    BirthDateExtractor, DocumentNumberExtractor, ExtractionMatch, FieldExtractor,
    GivenNameExtractor, SexExtractor, Strategy, SurnameExtractor,
};
use super::DocumentParser;

/// Result of field extraction.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtractionResult {
    /// Extracted fields.
    pub fields: ExtractedFields,
    /// How each populated field was found, in canonical field order.
    pub matches: Vec<FieldMatch>,
    /// Extraction warnings.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Provenance of one extracted field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldMatch {
    pub field: Field,
    pub strategy: Strategy,
    pub confidence: f32,
    /// Text the rule matched before cleanup.
    pub source: String,
    /// Byte range of the match in the raw text, for regex strategies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<(usize, usize)>,
}

/// Rule-based extractor for the bilingual identity card layout.
///
/// Holds only compiled patterns, so one instance can be shared freely
/// between threads.
#[derive(Debug, Clone)]
pub struct DocumentFieldExtractor {
    profile_name: String,
    min_field_confidence: f32,
    surname: SurnameExtractor,
    given_name: GivenNameExtractor,
    document_number: DocumentNumberExtractor,
    birth_date: BirthDateExtractor,
    sex: SexExtractor,
}

impl DocumentFieldExtractor {
    /// Create an extractor for the default Argentine DNI profile.
    pub fn new() -> Self {
        Self::build(LayoutProfile::argentine_dni().name, NameFilter::default())
    }

    /// Create an extractor for a custom layout profile.
    pub fn with_profile(profile: &LayoutProfile) -> Result<Self> {
        let filter = NameFilter::compile(profile)?;
        Ok(Self::build(profile.name.clone(), filter))
    }

    /// Create an extractor from a full configuration.
    pub fn from_config(config: &DnixConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_profile(&config.profile)?
            .with_positional_fallback(config.extraction.positional_fallback)
            .with_min_confidence(config.extraction.min_field_confidence))
    }

    fn build(profile_name: String, filter: NameFilter) -> Self {
        Self {
            profile_name,
            min_field_confidence: 0.0,
            surname: SurnameExtractor::new(filter.clone()),
            given_name: GivenNameExtractor::new(filter),
            document_number: DocumentNumberExtractor::new(),
            birth_date: BirthDateExtractor::new(),
            sex: SexExtractor::new(),
        }
    }

    /// Enable or disable the positional surname guess.
    pub fn with_positional_fallback(mut self, enabled: bool) -> Self {
        self.surname = self.surname.with_positional_fallback(enabled);
        self
    }

    /// Drop fields found with less than this confidence.
    pub fn with_min_confidence(mut self, confidence: f32) -> Self {
        self.min_field_confidence = confidence;
        self
    }

    /// Name of the layout profile in use.
    pub fn profile_name(&self) -> &str {
        &self.profile_name
    }

    fn keep<T>(&self, field: Field, found: Option<ExtractionMatch<T>>, matches: &mut Vec<FieldMatch>) -> Option<T> {
        let found = found?;
        if found.confidence < self.min_field_confidence {
            debug!(
                "Dropping {} found by {} (confidence {:.2} below {:.2})",
                field,
                found.strategy.as_str(),
                found.confidence,
                self.min_field_confidence
            );
            return None;
        }

        debug!("Found {} by {}: {:?}", field, found.strategy.as_str(), found.source);
        matches.push(FieldMatch {
            field,
            strategy: found.strategy,
            confidence: found.confidence,
            source: found.source,
            span: found.position,
        });
        Some(found.value)
    }

    fn run(&self, text: &str) -> (ExtractedFields, Vec<FieldMatch>) {
        let doc = DocumentText::new(text);
        let mut matches = Vec::new();

        let fields = ExtractedFields {
            document_number: self.keep(Field::DocumentNumber, self.document_number.extract(&doc), &mut matches),
            given_name: self.keep(Field::GivenName, self.given_name.extract(&doc), &mut matches),
            surname: self.keep(Field::Surname, self.surname.extract(&doc), &mut matches),
            birth_date: self.keep(Field::BirthDate, self.birth_date.extract(&doc), &mut matches),
            sex: self.keep(Field::Sex, self.sex.extract(&doc), &mut matches),
        };

        (fields, matches)
    }
}

impl Default for DocumentFieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentParser for DocumentFieldExtractor {
    fn parse(&self, text: &str) -> ExtractionResult {
        let start = start_timer();

        info!("Parsing {} characters of OCR text", text.len());

        let (fields, matches) = panic::catch_unwind(AssertUnwindSafe(|| self.run(text)))
            .unwrap_or_else(|_| {
                error!("Field extraction failed, returning an empty result");
                (ExtractedFields::default(), Vec::new())
            });

        let mut warnings = Vec::new();
        if fields.document_number.is_none() {
            warnings.push("Could not extract document number".to_string());
        }
        if fields.given_name.is_none() || fields.surname.is_none() {
            warnings.push("Could not extract full name".to_string());
        }
        if fields.birth_date.is_none() {
            warnings.push("Could not extract birth date".to_string());
        }
        for warning in &warnings {
            info!("{}", warning);
        }

        debug!("Extracted {} of {} fields", matches.len(), Field::ALL.len());

        ExtractionResult {
            fields,
            matches,
            warnings,
            processing_time_ms: start.map(|s| s.elapsed().as_millis() as u64).unwrap_or(0),
        }
    }
}

// No monotonic clock on wasm32-unknown-unknown.
#[cfg(not(target_arch = "wasm32"))]
fn start_timer() -> Option<Instant> {
    Some(Instant::now())
}

#[cfg(target_arch = "wasm32")]
fn start_timer() -> Option<Instant> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fields::Sex;
    use pretty_assertions::assert_eq;

    const CANONICAL: &str = "Apellido / Surname
GONZALEZ
Nombre / Name
y MARIA
Documento / Document
30.123.456
Fecha de Nacimiento / Date of Birth
15 MAY/MAY 1990
Sexo / Sex
F";

    #[test]
    fn test_parse_canonical_layout() {
        let result = DocumentFieldExtractor::new().parse(CANONICAL);

        assert_eq!(
            result.fields,
            ExtractedFields {
                document_number: Some("30123456".to_string()),
                given_name: Some("MARIA".to_string()),
                surname: Some("GONZALEZ".to_string()),
                birth_date: Some("15 MAY/MAY 1990".to_string()),
                sex: Some(Sex::Female),
            }
        );
        assert!(result.warnings.is_empty());
        assert_eq!(
            result.matches.iter().map(|m| m.field).collect::<Vec<_>>(),
            Field::ALL.to_vec()
        );
        assert_eq!(result.matches[1].strategy, Strategy::LabelAdjacent);

        let (start, end) = result.matches[0].span.unwrap();
        assert_eq!(&CANONICAL[start..end], "30.123.456");
    }

    #[test]
    fn test_empty_input_warns() {
        let result = DocumentFieldExtractor::new().parse("");

        assert!(result.fields.is_empty());
        assert!(result.matches.is_empty());
        assert_eq!(
            result.warnings,
            vec![
                "Could not extract document number".to_string(),
                "Could not extract full name".to_string(),
                "Could not extract birth date".to_string(),
            ]
        );
    }

    #[test]
    fn test_min_confidence_drops_positional_guess() {
        let text = "REPUBLICA ARGENTINA\nFERNANDEZ\n12345678";

        let lenient = DocumentFieldExtractor::new().parse(text);
        assert_eq!(lenient.fields.surname.as_deref(), Some("FERNANDEZ"));

        let strict = DocumentFieldExtractor::new().with_min_confidence(0.5).parse(text);
        assert_eq!(strict.fields.surname, None);
        assert_eq!(strict.fields.document_number.as_deref(), Some("12345678"));
    }

    #[test]
    fn test_positional_fallback_disabled() {
        let extractor = DocumentFieldExtractor::new().with_positional_fallback(false);
        assert_eq!(extractor.extract_fields("FERNANDEZ\nLUCIA").surname, None);
    }

    #[test]
    fn test_custom_profile() {
        let mut profile = LayoutProfile::argentine_dni();
        profile.name = "ar-dni-bsas".to_string();
        profile.boilerplate_keywords.push("buenos aires".to_string());

        let text = "BUENOS AIRES\nFERNANDEZ";
        let extractor = DocumentFieldExtractor::with_profile(&profile).unwrap();
        assert_eq!(extractor.profile_name(), "ar-dni-bsas");
        assert_eq!(extractor.extract_fields(text).surname.as_deref(), Some("FERNANDEZ"));
        assert_eq!(
            DocumentFieldExtractor::new().extract_fields(text).surname.as_deref(),
            Some("BUENOS AIRES")
        );
    }

    #[test]
    fn test_invalid_profile_fails_at_construction() {
        let mut profile = LayoutProfile::argentine_dni();
        profile.label_patterns.push("(unclosed".to_string());

        assert!(matches!(
            DocumentFieldExtractor::with_profile(&profile),
            Err(crate::DnixError::Profile(_))
        ));
    }

    #[test]
    fn test_from_config() {
        let mut config = DnixConfig::default();
        config.extraction.positional_fallback = false;

        let extractor = DocumentFieldExtractor::from_config(&config).unwrap();
        assert_eq!(extractor.extract_fields("FERNANDEZ").surname, None);
    }

    #[test]
    fn test_extractor_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DocumentFieldExtractor>();
    }
}
