//! Configuration structures for field extraction.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{DnixError, Result};

/// Main configuration for dnix.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DnixConfig {
    /// Extraction options.
    pub extraction: ExtractionConfig,

    /// Document layout keywords.
    pub profile: LayoutProfile,
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Fall back to guessing the surname from line position when no label
    /// is recognized.
    pub positional_fallback: bool,

    /// Minimum strategy confidence to keep an extracted field (0.0 - 1.0).
    pub min_field_confidence: f32,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            positional_fallback: true,
            min_field_confidence: 0.0,
        }
    }
}

/// Keyword lists describing one printed document layout.
///
/// Keywords are matched literally and case-insensitively. `label_patterns`
/// holds regex fragments for labels that OCR tends to garble.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutProfile {
    /// Profile identifier.
    pub name: String,

    /// Field label words. A name value containing one of these is a
    /// mis-detected label line.
    pub label_keywords: Vec<String>,

    /// Issuer boilerplate printed on the card.
    pub boilerplate_keywords: Vec<String>,

    /// Extra regex fragments excluded from positional surname candidates.
    pub label_patterns: Vec<String>,
}

impl LayoutProfile {
    /// Bilingual Spanish/English Argentine national identity card.
    pub fn argentine_dni() -> Self {
        Self {
            name: "ar-dni".to_string(),
            label_keywords: words(&[
                "nombre",
                "name",
                "sexo",
                "sex",
                "nacionalidad",
                "nationality",
                "fecha",
                "date",
                "documento",
                "document",
            ]),
            boilerplate_keywords: words(&[
                "republica",
                "argentina",
                "mercosur",
                "registro",
                "nacional",
                "ministerio",
                "interior",
                "documento",
                "identidad",
            ]),
            label_patterns: words(&["ap[eoli]+", "apellido", "surname"]),
        }
    }
}

impl Default for LayoutProfile {
    fn default() -> Self {
        Self::argentine_dni()
    }
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

impl DnixConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check option ranges that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        let confidence = self.extraction.min_field_confidence;
        if !(0.0..=1.0).contains(&confidence) {
            return Err(DnixError::Config(format!(
                "min_field_confidence must be between 0.0 and 1.0, got {}",
                confidence
            )));
        }
        Ok(())
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
