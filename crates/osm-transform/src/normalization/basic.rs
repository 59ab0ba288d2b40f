use std::sync::LazyLock;

use osm_model::{FieldKind, SourceKind};
use regex::Regex;

use super::text::{is_title_case, title_case};
use super::{Normalized, fix, is_blank};
use crate::ledger::{AuditField, Ledger};

/// Characters allowed in free-text values.
static BASIC_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^[a-zA-Z0-9'_.,;:=–’>!´é~êçóíáô®@½·"\-()&/+\s]+$"#)
        .expect("Invalid basic value regex")
});

/// Normalizes a free-text value (house number, amenity, name, cuisine, shop,
/// building, inscription).
///
/// House numbers lose `#` and cuisines are title-cased with `_` read as a
/// space; both are re-trimmed after the rewrite. Rejections are recorded
/// under the tag key.
pub fn normalize_basic(
    kind: FieldKind,
    key: &str,
    raw: &str,
    source: SourceKind,
    ledger: &mut Ledger,
) -> Normalized {
    if is_blank(raw) {
        ledger.record_other_rejection(key, raw, source);
        return Normalized::Rejected;
    }

    let mut value = raw.trim().to_string();

    if kind == FieldKind::HouseNumber && value.contains('#') {
        let corrected = value.replace('#', "").trim().to_string();
        value = fix(ledger, AuditField::HouseNumber, &value, corrected);
    }

    if kind == FieldKind::Cuisine && (!is_title_case(&value) || value.contains('_')) {
        let corrected = title_case(&value).replace('_', " ").trim().to_string();
        value = fix(ledger, AuditField::Cuisine, &value, corrected);
    }

    if !BASIC_REGEX.is_match(&value) {
        ledger.record_other_rejection(key, &value, source);
        return Normalized::Rejected;
    }

    Normalized::Accepted(value)
}
