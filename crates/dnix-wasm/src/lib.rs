//! WASM bindings for identity-document OCR text field extraction.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js.
//! OCR itself runs on the JavaScript side; these bindings take the recognized
//! text and return the structured fields.

use wasm_bindgen::prelude::*;

use dnix_core::document::rules::document_number::format_document_number;
use dnix_core::{
    DocumentFieldExtractor, DocumentParser, ExtractedFields, FieldMatch, LayoutProfile,
};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Extract identity fields from OCR text using the default layout.
///
/// Returns an object with `documentNumber`, `givenName`, `surname`,
/// `birthDate` and `sex`; fields that were not found are omitted.
#[wasm_bindgen(js_name = extractFields)]
pub fn extract_fields(text: &str) -> Result<JsValue, JsValue> {
    to_js(&dnix_core::extract(text))
}

/// Interpret a birth date token (e.g. "15 MAY/MAY 1990") as an ISO date.
#[wasm_bindgen(js_name = parseBirthDate)]
pub fn parse_birth_date(token: &str) -> Option<String> {
    dnix_core::parse_birth_date(token).map(|d| d.to_string())
}

/// Format an 8-digit document number as printed on the card (XX.XXX.XXX).
#[wasm_bindgen(js_name = formatDocumentNumber)]
pub fn format_document_number_js(number: &str) -> String {
    format_document_number(number)
}

/// Document extractor class for browser use.
#[wasm_bindgen]
pub struct DocumentExtractor {
    extractor: DocumentFieldExtractor,
}

#[wasm_bindgen]
impl DocumentExtractor {
    /// Create an extractor for the Argentine DNI layout.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            extractor: DocumentFieldExtractor::new(),
        }
    }

    /// Create an extractor from a JSON layout profile.
    #[wasm_bindgen(js_name = withProfile)]
    pub fn with_profile(profile_json: &str) -> Result<DocumentExtractor, JsValue> {
        let profile: LayoutProfile = serde_json::from_str(profile_json).map_err(to_js_error)?;
        let extractor = DocumentFieldExtractor::with_profile(&profile).map_err(to_js_error)?;

        Ok(Self { extractor })
    }

    /// Name of the layout profile in use.
    #[wasm_bindgen(getter, js_name = profileName)]
    pub fn profile_name(&self) -> String {
        self.extractor.profile_name().to_string()
    }

    /// Enable or disable the positional surname guess.
    #[wasm_bindgen(js_name = setPositionalFallback)]
    pub fn set_positional_fallback(&mut self, enabled: bool) {
        self.extractor = self.extractor.clone().with_positional_fallback(enabled);
    }

    /// Drop fields found with less than this confidence.
    #[wasm_bindgen(js_name = setMinConfidence)]
    pub fn set_min_confidence(&mut self, confidence: f32) {
        self.extractor = self.extractor.clone().with_min_confidence(confidence);
    }

    /// Extract fields from text.
    #[wasm_bindgen]
    pub fn extract(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&self.extractor.extract_fields(text))
    }

    /// Get extraction result with metadata.
    #[wasm_bindgen(js_name = extractWithMetadata)]
    pub fn extract_with_metadata(&self, text: &str) -> Result<JsValue, JsValue> {
        let result = self.extractor.parse(text);

        #[derive(serde::Serialize)]
        #[serde(rename_all = "camelCase")]
        struct ExtractResult {
            fields: ExtractedFields,
            matches: Vec<FieldMatch>,
            warnings: Vec<String>,
            has_minimum_identity: bool,
            birth_date_iso: Option<String>,
            processing_time_ms: u64,
        }

        let output = ExtractResult {
            has_minimum_identity: result.fields.has_minimum_identity(),
            birth_date_iso: result.fields.birth_date_parsed().map(|d| d.to_string()),
            fields: result.fields,
            matches: result.matches,
            warnings: result.warnings,
            processing_time_ms: result.processing_time_ms,
        };

        to_js(&output)
    }
}

impl Default for DocumentExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(to_js_error)
}

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_parse_birth_date() {
        assert_eq!(parse_birth_date("15 MAY/MAY 1990"), Some("1990-05-15".to_string()));
        assert_eq!(parse_birth_date("31 FEB/FEB 1990"), None);
    }

    #[wasm_bindgen_test]
    fn test_format_document_number() {
        assert_eq!(format_document_number_js("30123456"), "30.123.456");
    }

    #[wasm_bindgen_test]
    fn test_with_profile_rejects_bad_json() {
        assert!(DocumentExtractor::with_profile("not json").is_err());
        assert!(DocumentExtractor::with_profile(r#"{"label_patterns": ["(unclosed"]}"#).is_err());
    }

    #[wasm_bindgen_test]
    fn test_with_profile_uses_defaults_for_missing_lists() {
        let extractor = DocumentExtractor::with_profile(r#"{"name": "ar-dni-bsas"}"#).unwrap();
        assert_eq!(extractor.profile_name(), "ar-dni-bsas");
    }

    #[wasm_bindgen_test]
    fn test_extract_returns_object() {
        let value = DocumentExtractor::new()
            .extract("Documento / Document\n30.123.456")
            .unwrap();
        assert!(value.is_object());
    }
}
