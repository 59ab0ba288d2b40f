use std::sync::LazyLock;

use osm_model::SourceKind;
use regex::Regex;

use super::{Normalized, is_blank, reject};
use crate::ledger::{AuditField, Ledger};

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\w.-]+@[\w.-]+").expect("Invalid email regex"));

/// Top-level domain suffixes accepted for emails and websites.
pub(crate) const ALLOWED_DOMAIN_SUFFIXES: &[&str] = &[
    ".com", ".org", ".net", ".edu", ".gov", ".us", ".nyc", ".biz", ".info", ".io", ".it", ".co",
    ".site", ".cz", ".hu", ".int",
];

/// Extracts the address part of `Name <address>`, or the whole value.
fn parse_address(value: &str) -> &str {
    if let Some(start) = value.find('<')
        && let Some(len) = value[start + 1..].find('>')
    {
        return value[start + 1..start + 1 + len].trim();
    }
    value.trim()
}

/// Normalizes an `email` value: lower-cased, and kept only if it looks like
/// an address on an allowed domain.
pub fn normalize_email(raw: &str, source: SourceKind, ledger: &mut Ledger) -> Normalized {
    if is_blank(raw) {
        return reject(ledger, AuditField::Email, raw, source);
    }

    let email = raw.trim().to_lowercase();
    let address = parse_address(&email);

    let valid = !address.is_empty()
        && EMAIL_REGEX.is_match(&email)
        && ALLOWED_DOMAIN_SUFFIXES
            .iter()
            .any(|suffix| address.ends_with(suffix));
    if !valid {
        return reject(ledger, AuditField::Email, &email, source);
    }

    Normalized::Accepted(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(raw: &str) -> (Normalized, Ledger) {
        let mut ledger = Ledger::new();
        let result = normalize_email(raw, SourceKind::Node, &mut ledger);
        (result, ledger)
    }

    #[test]
    fn address_is_lower_cased() {
        assert_eq!(
            run(" Info@Zabars.COM ").0,
            Normalized::Accepted("info@zabars.com".to_string())
        );
    }

    #[test]
    fn display_name_form_is_accepted() {
        assert!(run("Shop <shop@example.nyc>").0.is_accepted());
    }

    #[test]
    fn unknown_domain_is_rejected() {
        let (result, ledger) = run("JOHN@EXAMPLE.XYZ");
        assert_eq!(result, Normalized::Rejected);
        assert_eq!(ledger.field(AuditField::Email).rejected["john@example.xyz"], 1);
    }

    #[test]
    fn missing_at_sign_is_rejected() {
        assert_eq!(run("www.example.com").0, Normalized::Rejected);
    }

    #[test]
    fn empty_brackets_are_rejected() {
        assert_eq!(run("<>").0, Normalized::Rejected);
    }
}
