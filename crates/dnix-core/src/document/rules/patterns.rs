//! Common regex patterns for identity-document extraction.
//!
//! Labels are printed bilingually ("Apellido / Surname") and OCR misreads
//! them often, so label tokens use character classes for the usual letter
//! confusions. The optional companion after a label (`/ Surname`) is only
//! allowed on the label's own line.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Surname label, tolerant of {e,o}, {l,i} and {d,o,l,i} confusions
    pub static ref SURNAME_LABEL_LINE: Regex = Regex::new(
        r"(?i)ap[eoli]{2,5}[il]{1,3}[doli]{2,3}|surname"
    ).unwrap();

    // Surname label followed by the value on a later line, most specific first
    pub static ref SURNAME_PATTERNS: Vec<Regex> = vec![
        Regex::new(
            r"(?i)(?:d\s)?(?:ap[eoli]{2,5}[il]{1,3}[doli]{2,3}|surname)[ \t]*/?[ \t]*(?:[A-Z]+)?[ \t]*[\r\n]+\s*[.\s]*([A-ZÑÁÉÍÓÚÜ][A-ZÑÁÉÍÓÚÜ\s]+?)(?:[\r\n]|\s{2,})"
        ).unwrap(),
        Regex::new(
            r"(?i)(?:ap[eoli]{2,5}[il]{1,3}[doli]{2,3}|surname)[ \t]*/?[ \t]*(?:[A-Z]+)?[ \t]*[\r\n]+\s*[.\s]*([A-ZÑÁÉÍÓÚÜ\s]+)"
        ).unwrap(),
        Regex::new(
            r"(?i)(?:apellido|surname)[ \t]*/?[ \t]*(?:[A-Z]+)?[ \t]*[\r\n]+\s*[.\s]*([A-ZÑÁÉÍÓÚÜ\s]+?)[\r\n]"
        ).unwrap(),
        Regex::new(
            r"(?i)(?:apellido|surname)[ \t]*/?[ \t]*(?:[A-Z]+)?[ \t]*[\r\n]+\s*[.\s]*([A-ZÑÁÉÍÓÚÜ\s]+)"
        ).unwrap(),
    ];

    // Bilingual given-name label occupying a whole line
    pub static ref GIVEN_NAME_LABEL_LINE: Regex = Regex::new(
        r"(?i)^nombre\s*/?\s*name$"
    ).unwrap();

    pub static ref GIVEN_NAME_PATTERNS: Vec<Regex> = vec![
        Regex::new(
            r"(?i)\b(?:nombre|name)[ \t]*/?[ \t]*(?:[A-Z]+)?[ \t]*[\r\n]+\s*([A-ZÑÁÉÍÓÚÜ\s]+?)(?:[\r\n]|\s{2,})"
        ).unwrap(),
        Regex::new(
            r"(?i)\b(?:nombre|name)[ \t]*/?[ \t]*(?:[A-Z]+)?[ \t]*[\r\n]+\s*([A-ZÑÁÉÍÓÚÜ\s]+)"
        ).unwrap(),
    ];

    // Name values: letters, accented capitals and spaces only
    pub static ref NAME_VALUE: Regex = Regex::new(
        r"(?i)^[A-ZÑÁÉÍÓÚÜ\s]+$"
    ).unwrap();

    // Positional candidates must already be upper case
    pub static ref NAME_CANDIDATE: Regex = Regex::new(
        r"^[A-ZÑÁÉÍÓÚÜ\s]{2,40}$"
    ).unwrap();

    pub static ref LEADING_PUNCTUATION: Regex = Regex::new(
        r"^[.,\-\s]+"
    ).unwrap();

    pub static ref CANDIDATE_LEADING: Regex = Regex::new(
        r"^[.,\-\s\[]+"
    ).unwrap();

    pub static ref CANDIDATE_TRAILING: Regex = Regex::new(
        r"[.,\-\s\]]+$"
    ).unwrap();

    // Punctuation plus a standalone "y" read from the end of the name label
    pub static ref GIVEN_NAME_LEADING: Regex = Regex::new(
        r"(?i)^[.,\-\s]*(?:y(?:[.,\-\s]+|$))?[.,\-\s]*"
    ).unwrap();

    // Document number, most specific first
    pub static ref DOCUMENT_NUMBER_PATTERNS: Vec<Regex> = vec![
        Regex::new(
            r"(?i)(?:documento|document)[ \t]*/?[ \t]*(?:[A-Z]+)?[ \t]*\r?\n\s*([0-9]{1,2}[.\s]?[0-9]{3}[.\s]?[0-9]{3})\b"
        ).unwrap(),
        Regex::new(
            r"\b([0-9]{2}[.\s][0-9]{3}[.\s][0-9]{3})\b"
        ).unwrap(),
        Regex::new(
            r"\b([0-9]{8})\b"
        ).unwrap(),
    ];

    // Birth date, labeled forms first
    pub static ref BIRTH_DATE_PATTERNS: Vec<Regex> = vec![
        Regex::new(
            r"(?i)(?:fecha\s+de\s+nacimiento|date\s+of\s+birth)[ \t]*/?[ \t]*(?:[A-Z]+)?[ \t]*\r?\n\s*([0-9]{1,2}\s+[A-Z]{3}[/\s]*[A-Z]{3}\s+[0-9]{4})"
        ).unwrap(),
        Regex::new(
            r"(?i)\b([0-9]{1,2}\s+(?:ENE|FEB|MAR|ABR|MAY|JUN|JUL|AGO|SEP|OCT|NOV|DIC)[/\s]*(?:JAN|FEB|MAR|APR|MAY|JUN|JUL|AUG|SEP|OCT|NOV|DEC)\s+[0-9]{4})\b"
        ).unwrap(),
        Regex::new(
            r"(?i)(?:nacimiento|birth)[^\n]*\n\s*([0-9]{1,2}\s+[A-Z]{3}[/\s]*[A-Z]{3}\s+[0-9]{4})"
        ).unwrap(),
    ];

    // Any "DD MON/MON YYYY" token
    pub static ref BILINGUAL_DATE: Regex = Regex::new(
        r"(?i)\b([0-9]{1,2}\s+[A-Z]{3}[/\s]*[A-Z]{3}\s+[0-9]{4})\b"
    ).unwrap();

    pub static ref BILINGUAL_DATE_PARTS: Regex = Regex::new(
        r"(?i)^([0-9]{1,2})\s+([A-Z]{3})[/\s]*([A-Z]{3})\s+([0-9]{4})$"
    ).unwrap();

    pub static ref SEX_PATTERNS: Vec<Regex> = vec![
        Regex::new(
            r"(?i)(?:sexo|sex)[ \t]*/?[ \t]*(?:[A-Z]+)?[ \t]*(?:\r?\n)?\s*([MF])\b"
        ).unwrap(),
        Regex::new(
            r"(?i)\b(?:sexo|sex)[:\s]*([MF])\b"
        ).unwrap(),
    ];
}
