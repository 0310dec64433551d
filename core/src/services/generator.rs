//! Document number and verification code generation.

use chrono::{Datelike, Utc};
use rand::Rng;

use crate::domain::entities::verification_record::CODE_LENGTH;
use crate::domain::entities::DocumentType;

const ALPHANUMERIC: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

fn random_alphanumeric(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| ALPHANUMERIC[rng.gen_range(0..ALPHANUMERIC.len())] as char)
        .collect()
}

/// Generate a verification code: 6 uppercase alphanumeric characters
pub fn generate_verification_code() -> String {
    random_alphanumeric(CODE_LENGTH)
}

/// Generate a document number: `{PREFIX}/{YYYY}/{MM}/{RANDOM6}`
///
/// Year and month come from the current UTC date; the suffix is a random
/// 6-character uppercase alphanumeric string.
pub fn generate_document_number(document_type: DocumentType) -> String {
    let now = Utc::now();
    format!(
        "{}/{}/{:02}/{}",
        document_type.prefix(),
        now.year(),
        now.month(),
        random_alphanumeric(6)
    )
}

/// Generate a document number from a type name, defaulting to the `DOC`
/// prefix for unknown types
pub fn generate_document_number_for(type_name: &str) -> String {
    generate_document_number(DocumentType::from_name(type_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_verification_code;
    use regex::Regex;

    #[test]
    fn test_verification_code_format() {
        let pattern = Regex::new(r"^[A-Z0-9]{6}$").unwrap();
        for _ in 0..100 {
            let code = generate_verification_code();
            assert!(pattern.is_match(&code), "bad code: {}", code);
        }
    }

    #[test]
    fn test_generated_code_passes_validation() {
        let code = generate_verification_code();
        assert!(validate_verification_code(&code, &code).is_ok());
    }

    #[test]
    fn test_codes_vary() {
        let codes: std::collections::HashSet<String> =
            (0..100).map(|_| generate_verification_code()).collect();
        assert!(codes.len() > 1);
    }

    #[test]
    fn test_document_number_format() {
        let pattern = Regex::new(r"^BC/\d{4}/\d{2}/[A-Z0-9]{6}$").unwrap();
        let number = generate_document_number_for("birth_certificate");
        assert!(pattern.is_match(&number), "bad number: {}", number);
    }

    #[test]
    fn test_all_known_prefixes() {
        for (name, prefix) in [
            ("permanent_residence_permit", "PRP"),
            ("naturalisation_certificate", "NAT"),
            ("work_permit", "WP"),
            ("retired_person_visa", "RV"),
            ("refugee_travel_document", "REF"),
            ("birth_certificate", "BC"),
        ] {
            let number = generate_document_number_for(name);
            assert!(number.starts_with(&format!("{}/", prefix)), "{} -> {}", name, number);
        }
    }

    #[test]
    fn test_unknown_type_uses_default_prefix() {
        let pattern = Regex::new(r"^DOC/\d{4}/\d{2}/[A-Z0-9]{6}$").unwrap();
        let number = generate_document_number_for("drivers_licence");
        assert!(pattern.is_match(&number), "bad number: {}", number);
    }
}
