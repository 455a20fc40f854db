//! End-to-end extraction over synthetic OCR captures of the identity card.

use dnix_core::{extract, DocumentFieldExtractor, DocumentParser, ExtractedFields, Sex, Strategy};
use pretty_assertions::assert_eq;

const CANONICAL: &str = "\
Apellido / Surname
GONZALEZ
Nombre / Name
y MARIA
Documento / Document
30.123.456
Fecha de Nacimiento / Date of Birth
15 MAY/MAY 1990
Sexo / Sex
F
";

// A noisier capture: header boilerplate, misread labels, stray punctuation
// and the issue date next to the birth date.
const NOISY: &str = "\
REPUBLICA ARGENTINA - MERCOSUR
REGISTRO NACIONAL DE LAS PERSONAS
d Apeliido / Surname
. LOPEZ
Nombre / Name
y JUAN PABLO
Sexo / Sex   Nacionalidad / Nationality
M            ARGENTINA
Fecha de nacimiento / Date of birth
01 NOV/ NOV 1969
Fecha de emision / Date of issue
20 MAR/ MAR 2015
Documento / Document
22.333.444
Tramite N / Of. ident.
00512345678912
";

#[test]
fn canonical_layout() {
    assert_eq!(
        extract(CANONICAL),
        ExtractedFields {
            document_number: Some("30123456".to_string()),
            given_name: Some("MARIA".to_string()),
            surname: Some("GONZALEZ".to_string()),
            birth_date: Some("15 MAY/MAY 1990".to_string()),
            sex: Some(Sex::Female),
        }
    );
}

#[test]
fn noisy_capture() {
    let fields = extract(NOISY);

    assert_eq!(fields.surname.as_deref(), Some("LOPEZ"));
    assert_eq!(fields.given_name.as_deref(), Some("JUAN PABLO"));
    assert_eq!(fields.document_number.as_deref(), Some("22333444"));
    assert_eq!(fields.birth_date.as_deref(), Some("01 NOV/ NOV 1969"));
    assert_eq!(fields.birth_date_parsed(), chrono::NaiveDate::from_ymd_opt(1969, 11, 1));
}

#[test]
fn misread_surname_label() {
    let fields = extract("Apeliido\nPEREZ");
    assert_eq!(fields.surname.as_deref(), Some("PEREZ"));
}

#[test]
fn bare_eight_digit_document_number() {
    let fields = extract("ARGENTINA\nRAMIREZ\n12345678\n");
    assert_eq!(fields.document_number.as_deref(), Some("12345678"));
}

#[test]
fn empty_input() {
    let fields = extract("");
    assert!(fields.is_empty());
    assert_eq!(fields.missing_fields().len(), 5);
    assert!(!fields.has_minimum_identity());
}

#[test]
fn unrecognizable_input() {
    let fields = extract("lorem ipsum dolor\nsit amet, consectetur\n@@@ ###");
    assert_eq!(fields, ExtractedFields::default());
}

#[test]
fn extraction_is_idempotent() {
    let extractor = DocumentFieldExtractor::new();
    for text in [CANONICAL, NOISY, "", "Apeliido\nPEREZ"] {
        assert_eq!(extractor.extract_fields(text), extractor.extract_fields(text));
        assert_eq!(extract(text), extractor.extract_fields(text));
    }
}

#[test]
fn document_number_is_always_eight_digits() {
    for text in [
        "1234567",
        "123456789",
        "Documento / Document\n1.234.567",
        "Documento\n123 456 7890",
        CANONICAL,
        NOISY,
    ] {
        if let Some(number) = extract(text).document_number {
            assert_eq!(number.len(), 8, "{text:?}");
            assert!(number.bytes().all(|b| b.is_ascii_digit()), "{text:?}");
        }
    }
    assert_eq!(extract("1234567").document_number, None);
    assert_eq!(extract("123456789").document_number, None);
}

#[test]
fn labels_and_boilerplate_never_become_names() {
    for text in [
        "Apellido / Surname\nNACIONALIDAD",
        "Apellido / Surname\nDOCUMENTO",
        "Nombre / Name\nNACIONALIDAD",
        "Nombre / Name\nDOCUMENTO",
        "REPUBLICA ARGENTINA\nDOCUMENTO NACIONAL DE IDENTIDAD\nMERCOSUR",
    ] {
        let fields = extract(text);
        for value in [fields.surname, fields.given_name].into_iter().flatten() {
            assert_ne!(value, "NACIONALIDAD", "{text:?}");
            assert_ne!(value, "DOCUMENTO", "{text:?}");
        }
    }
}

#[test]
fn provenance_reports_strategies() {
    let result = DocumentFieldExtractor::new().parse("REPUBLICA ARGENTINA\nFERNANDEZ\nLUCIA\n12345678");

    let strategies: Vec<_> = result.matches.iter().map(|m| (m.field, m.strategy)).collect();
    assert_eq!(
        strategies,
        vec![
            (dnix_core::Field::DocumentNumber, Strategy::ValueShape),
            (dnix_core::Field::Surname, Strategy::Positional),
        ]
    );
}

#[test]
fn extractor_shared_across_threads() {
    let extractor = std::sync::Arc::new(DocumentFieldExtractor::new());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let extractor = extractor.clone();
            std::thread::spawn(move || extractor.extract_fields(CANONICAL))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), extract(CANONICAL));
    }
}
