//! Core library for identity-document OCR text processing.
//!
//! This crate provides:
//! - Line tokenization of raw OCR output
//! - Field extraction for the bilingual Argentine DNI layout (surname, given
//!   name, document number, birth date, sex) as ordered strategy cascades
//! - Layout profiles that keep the keyword lists out of the matching code
//! - Data models and JSON configuration

pub mod error;
pub mod models;
pub mod document;

pub use error::{DnixError, ProfileError, Result};
pub use models::config::{DnixConfig, ExtractionConfig, LayoutProfile};
pub use models::fields::{ExtractedFields, Field, Sex};
pub use document::{
    extract, DocumentFieldExtractor, DocumentParser, ExtractionResult, FieldMatch, LineSequence,
};
pub use document::rules::{parse_birth_date, Strategy};
