//! Birth date extraction for bilingual "DD MON/MON YYYY" tokens.
//!
//! The matched token is stored verbatim. [`parse_birth_date`] offers a
//! calendar reading for callers that want one.

use chrono::NaiveDate;
use tracing::debug;

use super::patterns::{BILINGUAL_DATE, BILINGUAL_DATE_PARTS, BIRTH_DATE_PATTERNS};
use super::{ExtractionMatch, FieldExtractor, Strategy};
use crate::document::lines::DocumentText;

/// Birth date field extractor.
#[derive(Debug, Clone, Default)]
pub struct BirthDateExtractor;

impl BirthDateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for BirthDateExtractor {
    type Output = String;

    fn extract(&self, doc: &DocumentText<'_>) -> Option<ExtractionMatch<String>> {
        let strategies = [
            Strategy::LabelPattern,
            Strategy::ValueShape,
            Strategy::LabelPattern,
        ];

        for (pattern, strategy) in BIRTH_DATE_PATTERNS.iter().zip(strategies) {
            if let Some(group) = pattern.captures(doc.raw()).and_then(|caps| caps.get(1)) {
                let token = group.as_str().trim();
                debug!("Birth date token {:?}", token);
                return Some(
                    ExtractionMatch::new(token.to_string(), strategy, group.as_str())
                        .with_position(group.start(), group.end()),
                );
            }
        }

        // Any date-shaped token, whatever the months say
        let group = BILINGUAL_DATE.captures(doc.raw()).and_then(|caps| caps.get(1))?;
        debug!("Unlabeled date token {:?}", group.as_str());
        Some(
            ExtractionMatch::new(group.as_str().trim().to_string(), Strategy::ValueShape, group.as_str())
                .with_position(group.start(), group.end()),
        )
    }
}

/// Read a "DD MON/MON YYYY" token as a calendar date.
///
/// The first month code is read as Spanish, the second as English; either
/// one is enough. Returns `None` for tokens of another shape or impossible
/// dates.
pub fn parse_birth_date(token: &str) -> Option<NaiveDate> {
    let caps = BILINGUAL_DATE_PARTS.captures(token.trim())?;

    let day: u32 = caps[1].parse().ok()?;
    let year: i32 = caps[4].parse().ok()?;
    let month = spanish_month_to_number(&caps[2])
        .or_else(|| english_month_to_number(&caps[3]))
        .or_else(|| english_month_to_number(&caps[2]))
        .or_else(|| spanish_month_to_number(&caps[3]))?;

    NaiveDate::from_ymd_opt(year, month, day)
}

fn spanish_month_to_number(code: &str) -> Option<u32> {
    match code.to_uppercase().as_str() {
        "ENE" => Some(1),
        "FEB" => Some(2),
        "MAR" => Some(3),
        "ABR" => Some(4),
        "MAY" => Some(5),
        "JUN" => Some(6),
        "JUL" => Some(7),
        "AGO" => Some(8),
        "SEP" | "SET" => Some(9),
        "OCT" => Some(10),
        "NOV" => Some(11),
        "DIC" => Some(12),
        _ => None,
    }
}

fn english_month_to_number(code: &str) -> Option<u32> {
    match code.to_uppercase().as_str() {
        "JAN" => Some(1),
        "FEB" => Some(2),
        "MAR" => Some(3),
        "APR" => Some(4),
        "MAY" => Some(5),
        "JUN" => Some(6),
        "JUL" => Some(7),
        "AUG" => Some(8),
        "SEP" => Some(9),
        "OCT" => Some(10),
        "NOV" => Some(11),
        "DEC" => Some(12),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn extract(text: &str) -> Option<ExtractionMatch<String>> {
        BirthDateExtractor::new().extract(&DocumentText::new(text))
    }

    #[test]
    fn test_labeled_date() {
        let m = extract("Fecha de Nacimiento / Date of Birth\n15 MAY/MAY 1990").unwrap();
        assert_eq!(m.value, "15 MAY/MAY 1990");
        assert_eq!(m.strategy, Strategy::LabelPattern);
    }

    #[test]
    fn test_month_pair_without_label() {
        let m = extract("ARGENTINA\n01 NOV/ NOV 1969\nF").unwrap();
        assert_eq!(m.value, "01 NOV/ NOV 1969");
        assert_eq!(m.strategy, Strategy::ValueShape);
    }

    #[test]
    fn test_anchored_on_birth_word() {
        // Garbled month codes only match the label-anchored form.
        let m = extract("Nacimiento Birth 8\n11 JUI/JUL 1999").unwrap();
        assert_eq!(m.value, "11 JUI/JUL 1999");
        assert_eq!(m.strategy, Strategy::LabelPattern);
    }

    #[test]
    fn test_unlabeled_fallback() {
        let m = extract("ARGENTINA\n11 JUI/JUI 1999").unwrap();
        assert_eq!(m.value, "11 JUI/JUI 1999");
        assert_eq!(m.strategy, Strategy::ValueShape);
    }

    #[test]
    fn test_no_date() {
        assert!(extract("GONZALEZ\n30.123.456").is_none());
        assert!(extract("").is_none());
    }

    #[test]
    fn test_parse_birth_date() {
        assert_eq!(parse_birth_date("15 MAY/MAY 1990"), NaiveDate::from_ymd_opt(1990, 5, 15));
        assert_eq!(parse_birth_date("11 JUL/JUL 1999"), NaiveDate::from_ymd_opt(1999, 7, 11));
        assert_eq!(parse_birth_date("03 DIC/DEC 2001"), NaiveDate::from_ymd_opt(2001, 12, 3));
        assert_eq!(parse_birth_date("03 ene/ jan 2001"), NaiveDate::from_ymd_opt(2001, 1, 3));
        // Garbled Spanish code, English code still readable
        assert_eq!(parse_birth_date("20 AGD/AUG 1985"), NaiveDate::from_ymd_opt(1985, 8, 20));
        assert!(parse_birth_date("20 AG0/AUG 1985").is_none());
    }

    #[test]
    fn test_parse_birth_date_rejects_impossible() {
        assert_eq!(parse_birth_date("31 FEB/FEB 1990"), None);
        assert_eq!(parse_birth_date("15 XXX/YYY 1990"), None);
        assert_eq!(parse_birth_date("1990-05-15"), None);
    }
}
