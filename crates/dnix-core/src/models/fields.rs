//! Identity-document field models.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::document::rules::parse_birth_date;

/// Fields extracted from the OCR text of an identity document.
///
/// Every field is optional. An absent field means "not found" and the caller
/// should ask for it manually.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedFields {
    /// National document number, exactly 8 digits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_number: Option<String>,

    /// Given name(s), upper-cased.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,

    /// Surname(s), upper-cased.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,

    /// Birth date token as printed, e.g. `15 MAY/MAY 1990`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,

    /// Sex marker.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sex: Option<Sex>,
}

impl ExtractedFields {
    /// True when nothing was extracted.
    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|f| !self.has(*f))
    }

    /// Whether a given field is populated.
    pub fn has(&self, field: Field) -> bool {
        match field {
            Field::DocumentNumber => self.document_number.is_some(),
            Field::GivenName => self.given_name.is_some(),
            Field::Surname => self.surname.is_some(),
            Field::BirthDate => self.birth_date.is_some(),
            Field::Sex => self.sex.is_some(),
        }
    }

    /// Fields that were not found, in canonical order.
    pub fn missing_fields(&self) -> Vec<Field> {
        Field::ALL.iter().copied().filter(|f| !self.has(*f)).collect()
    }

    /// A scan is worth keeping when it produced a document number or a given
    /// name; otherwise the capture screen asks for a better photo.
    pub fn has_minimum_identity(&self) -> bool {
        self.document_number.is_some() || self.given_name.is_some()
    }

    /// Calendar interpretation of the birth date token, if it is a real date.
    pub fn birth_date_parsed(&self) -> Option<NaiveDate> {
        self.birth_date.as_deref().and_then(parse_birth_date)
    }

    /// String value of a field, for tabular output.
    pub fn value(&self, field: Field) -> Option<String> {
        match field {
            Field::DocumentNumber => self.document_number.clone(),
            Field::GivenName => self.given_name.clone(),
            Field::Surname => self.surname.clone(),
            Field::BirthDate => self.birth_date.clone(),
            Field::Sex => self.sex.map(|s| s.as_str().to_string()),
        }
    }
}

/// Names of the extracted fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    DocumentNumber,
    GivenName,
    Surname,
    BirthDate,
    Sex,
}

impl Field {
    /// All fields in canonical order.
    pub const ALL: [Field; 5] = [
        Field::DocumentNumber,
        Field::GivenName,
        Field::Surname,
        Field::BirthDate,
        Field::Sex,
    ];

    /// Serialized name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::DocumentNumber => "documentNumber",
            Field::GivenName => "givenName",
            Field::Surname => "surname",
            Field::BirthDate => "birthDate",
            Field::Sex => "sex",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Field::DocumentNumber => "Document number",
            Field::GivenName => "Given name",
            Field::Surname => "Surname",
            Field::BirthDate => "Birth date",
            Field::Sex => "Sex",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sex marker printed on the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Sex {
    /// Parse a single `M`/`F` letter, case-insensitively.
    pub fn from_letter(s: &str) -> Option<Self> {
        match s.trim() {
            "M" | "m" => Some(Sex::Male),
            "F" | "f" => Some(Sex::Female),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "F",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
