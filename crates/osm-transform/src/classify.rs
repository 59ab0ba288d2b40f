//! Tag key classification and normalizer dispatch.

use std::sync::LazyLock;

use osm_model::{FieldKind, SourceKind};
use regex::Regex;

use crate::ledger::Ledger;
use crate::normalization::{
    Normalized, normalize_basic, normalize_city, normalize_email, normalize_phone,
    normalize_postcode, normalize_review_flag, normalize_state, normalize_street,
    normalize_website,
};

/// Vendor prefix removed from keys before any check.
pub const VENDOR_PREFIX: &str = "cityracks.";

/// Structural key check. The digit `0` is not accepted.
static KEY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z:\-_1-9]+$").expect("Invalid tag key regex"));

/// Exact-match key table. Keys containing `inscription` are matched separately.
pub const FIELD_TABLE: &[(&str, FieldKind)] = &[
    ("addr:housenumber", FieldKind::HouseNumber),
    ("amenity", FieldKind::Amenity),
    ("name", FieldKind::Name),
    ("cuisine", FieldKind::Cuisine),
    ("shop", FieldKind::Shop),
    ("building", FieldKind::Building),
    ("addr:street", FieldKind::Street),
    ("addr:state", FieldKind::State),
    ("addr:city", FieldKind::City),
    ("addr:postcode", FieldKind::PostCode),
    ("phone", FieldKind::Phone),
    ("email", FieldKind::Email),
    ("website", FieldKind::Website),
    ("url", FieldKind::Website),
    ("tiger:reviewed", FieldKind::TigerReviewed),
];

/// How a tag key is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Field(FieldKind),
    /// Structurally valid but not cleaned; the tag is skipped.
    Unrecognized,
    /// Fails the structural key check; the tag is dropped.
    BadKey,
}

/// Removes every occurrence of the vendor prefix.
pub fn strip_vendor_prefix(key: &str) -> String {
    key.replace(VENDOR_PREFIX, "")
}

pub fn is_valid_key(key: &str) -> bool {
    KEY_REGEX.is_match(key)
}

/// Looks a structurally valid key up in the field table.
pub fn field_kind_for(key: &str) -> Option<FieldKind> {
    FIELD_TABLE
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, kind)| *kind)
        .or_else(|| key.contains("inscription").then_some(FieldKind::Inscription))
}

/// Classifies a key that has already had its vendor prefix stripped.
pub fn classify_key(key: &str) -> Classification {
    if !is_valid_key(key) {
        return Classification::BadKey;
    }
    match field_kind_for(key) {
        Some(kind) => Classification::Field(kind),
        None => Classification::Unrecognized,
    }
}

/// Runs the normalizer for `kind` on one value.
pub fn normalize_field(
    kind: FieldKind,
    key: &str,
    raw: &str,
    source: SourceKind,
    ledger: &mut Ledger,
) -> Normalized {
    match kind {
        FieldKind::Street => normalize_street(raw, source, ledger),
        FieldKind::City => normalize_city(raw, source, ledger),
        FieldKind::State => normalize_state(raw, source, ledger),
        FieldKind::PostCode => normalize_postcode(raw, source, ledger),
        FieldKind::Phone => normalize_phone(raw, source, ledger),
        FieldKind::Email => normalize_email(raw, source, ledger),
        FieldKind::Website => normalize_website(raw, source, ledger),
        FieldKind::TigerReviewed => normalize_review_flag(raw, source, ledger),
        FieldKind::HouseNumber
        | FieldKind::Amenity
        | FieldKind::Name
        | FieldKind::Cuisine
        | FieldKind::Shop
        | FieldKind::Building
        | FieldKind::Inscription => normalize_basic(kind, key, raw, source, ledger),
    }
}
