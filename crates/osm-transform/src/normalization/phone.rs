use std::sync::LazyLock;

use osm_model::SourceKind;
use regex::Regex;

use super::postcode::last_chars;
use super::{Normalized, fix, is_blank, reject};
use crate::ledger::{AuditField, Ledger};

/// North American number with an optional `+1` country code.
static PHONE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\+?1?\s?-?\(?\)?)(\d{3})\D*(\d{3})\D*(\d{4})$").expect("Invalid phone regex")
});

/// Local area-code prefixes that get the `+1 ` country code prepended.
const LOCAL_PREFIXES: &[&str] = &[
    "212 ", "(212", "646 ", "(646", "212-", "646-", "917 ", "(917", "917-", "800 ", "800-",
    "(800", "718-", "(888", "845-", "855-",
];

/// Normalizes a `phone` value towards `+1 AAA-BBB-CCCC`.
///
/// The rewrites run in a fixed order, each recorded as a fix, and the result
/// must then match [`PHONE_REGEX`].
pub fn normalize_phone(raw: &str, source: SourceKind, ledger: &mut Ledger) -> Normalized {
    if is_blank(raw) {
        return reject(ledger, AuditField::Phone, raw, source);
    }

    let mut phone = raw.trim().to_string();

    if let Some(rest) = phone.strip_prefix('+')
        && !rest.starts_with('1')
    {
        let corrected = format!("+1 {rest}");
        phone = fix(ledger, AuditField::Phone, &phone, corrected);
    }

    if phone.contains('.') {
        let corrected = phone.replace('.', "-");
        phone = fix(ledger, AuditField::Phone, &phone, corrected);
    }

    if let Some(rest) = phone.strip_prefix("001") {
        let corrected = format!("+1{rest}");
        phone = fix(ledger, AuditField::Phone, &phone, corrected);
    }

    if let Some(rest) = phone.strip_prefix("1 ").or_else(|| phone.strip_prefix("1-")) {
        let corrected = format!("+1 {rest}");
        phone = fix(ledger, AuditField::Phone, &phone, corrected);
    }

    if LOCAL_PREFIXES.iter().any(|prefix| phone.starts_with(prefix)) {
        let corrected = format!("+1 {phone}");
        phone = fix(ledger, AuditField::Phone, &phone, corrected);
    }

    let bare_local = (phone.starts_with("212") || phone.starts_with("646"))
        && phone.chars().nth(3).is_some_and(|c| c.is_ascii_digit());
    if bare_local {
        let corrected = format!("+1 {phone}");
        phone = fix(ledger, AuditField::Phone, &phone, corrected);
    }

    if last_chars(&phone, 4).contains(' ') {
        let tail = last_chars(&phone, 5);
        let head = &phone[..phone.len() - tail.len()];
        let corrected = format!("{head}{}", tail.replace(' ', ""));
        phone = fix(ledger, AuditField::Phone, &phone, corrected);
    }

    if !PHONE_REGEX.is_match(&phone) {
        return reject(ledger, AuditField::Phone, &phone, source);
    }

    Normalized::Accepted(phone)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(raw: &str) -> (Normalized, Ledger) {
        let mut ledger = Ledger::new();
        let result = normalize_phone(raw, SourceKind::Node, &mut ledger);
        (result, ledger)
    }

    fn accepted(raw: &str) -> String {
        run(raw).0.into_accepted().expect("phone accepted")
    }

    #[test]
    fn dotted_local_number_gets_country_code() {
        let (result, ledger) = run("212.555.1234");
        assert_eq!(result, Normalized::Accepted("+1 212-555-1234".to_string()));
        let fixes = &ledger.field(AuditField::Phone).fixes;
        assert_eq!(fixes["212.555.1234"]["212-555-1234"], 1);
        assert_eq!(fixes["212-555-1234"]["+1 212-555-1234"], 1);
    }

    #[test]
    fn international_prefixes_are_rewritten() {
        assert_eq!(accepted("001 212 555 1234"), "+1 212 555 1234");
        assert_eq!(accepted("1-212-555-1234"), "+1 212-555-1234");
        assert_eq!(accepted("+212 555 1234"), "+1 212 555 1234");
    }

    #[test]
    fn bare_digits_get_country_code() {
        assert_eq!(accepted("2125551234"), "+1 2125551234");
        assert_eq!(accepted("(212) 555-1234"), "+1 (212) 555-1234");
    }

    #[test]
    fn split_last_group_is_joined() {
        assert_eq!(accepted("+1 212 555 12 34"), "+1 212 555 1234");
    }

    #[test]
    fn short_number_is_rejected() {
        let (result, ledger) = run("5551234");
        assert_eq!(result, Normalized::Rejected);
        assert_eq!(ledger.field(AuditField::Phone).rejected["5551234"], 1);
        assert_eq!(ledger.counts().values_eliminated, 1);
    }
}
