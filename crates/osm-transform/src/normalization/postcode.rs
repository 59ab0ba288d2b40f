use osm_model::SourceKind;

use super::{Normalized, fix, is_blank, reject};
use crate::ledger::{AuditField, Ledger};

/// Normalizes an `addr:postcode` value to a five-digit ZIP code.
///
/// ZIP+4 codes lose the extension and a leading state code (`NY 10025`) is
/// dropped by keeping the last five characters.
pub fn normalize_postcode(raw: &str, source: SourceKind, ledger: &mut Ledger) -> Normalized {
    if is_blank(raw) {
        return reject(ledger, AuditField::PostCode, raw, source);
    }

    let mut code = raw.trim().to_string();

    if code.contains('-') && code.chars().count() == 10 {
        let corrected: String = code.chars().take(5).collect();
        code = fix(ledger, AuditField::PostCode, &code, corrected);
    }

    if code.contains("NY") {
        let corrected = last_chars(&code, 5).to_string();
        code = fix(ledger, AuditField::PostCode, &code, corrected);
    }

    if code.len() != 5 || !code.bytes().all(|b| b.is_ascii_digit()) {
        return reject(ledger, AuditField::PostCode, &code, source);
    }

    Normalized::Accepted(code)
}

/// The last `count` characters of `value`, or all of it when shorter.
pub(crate) fn last_chars(value: &str, count: usize) -> &str {
    let skip = value.chars().count().saturating_sub(count);
    match value.char_indices().nth(skip) {
        Some((index, _)) => &value[index..],
        None => "",
    }
}
