use osm_model::SourceKind;

use super::{Normalized, fix, is_blank, reject};
use crate::ledger::{AuditField, Ledger};

const REVIEW_STATES: &[&str] = &["yes", "no", "aerial"];

/// Normalizes a `tiger:reviewed` flag to `yes`, `no` or `aerial`.
pub fn normalize_review_flag(raw: &str, source: SourceKind, ledger: &mut Ledger) -> Normalized {
    if is_blank(raw) {
        return reject(ledger, AuditField::TigerReviewed, raw, source);
    }

    let flag = raw.trim();

    if flag == "; no; no" || flag == "not" {
        return Normalized::Accepted(fix(ledger, AuditField::TigerReviewed, flag, "no".to_string()));
    }

    if !REVIEW_STATES.contains(&flag) {
        return reject(ledger, AuditField::TigerReviewed, flag, source);
    }

    Normalized::Accepted(flag.to_string())
}
