//! Per-field value normalizers.
//!
//! Every normalizer takes the raw tag value and the kind of entity it came
//! from, records each correction or rejection in the [`Ledger`], and returns a
//! [`Normalized`] outcome. A rejected value is never an error; the tag is
//! simply dropped from the cleaned output.

mod basic;
mod city;
mod email;
mod phone;
mod postcode;
mod review;
mod state;
mod street;
pub mod text;
mod website;

pub use basic::normalize_basic;
pub use city::normalize_city;
pub use email::normalize_email;
pub use phone::normalize_phone;
pub use postcode::normalize_postcode;
pub use review::normalize_review_flag;
pub use state::normalize_state;
pub use street::normalize_street;
pub use website::normalize_website;

use osm_model::SourceKind;

use crate::ledger::{AuditField, Ledger};

/// Outcome of normalizing one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized {
    Accepted(String),
    Rejected,
}

impl Normalized {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Normalized::Accepted(_))
    }

    pub fn accepted(&self) -> Option<&str> {
        match self {
            Normalized::Accepted(value) => Some(value),
            Normalized::Rejected => None,
        }
    }

    pub fn into_accepted(self) -> Option<String> {
        match self {
            Normalized::Accepted(value) => Some(value),
            Normalized::Rejected => None,
        }
    }
}

/// Empty or whitespace-only.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Records a rejection of `value` for `field` and returns [`Normalized::Rejected`].
fn reject(ledger: &mut Ledger, field: AuditField, value: &str, source: SourceKind) -> Normalized {
    ledger.record_rejection(field, value, source);
    Normalized::Rejected
}

/// Records `original => corrected` and returns the corrected value.
fn fix(ledger: &mut Ledger, field: AuditField, original: &str, corrected: String) -> String {
    ledger.record_fix(field, original, &corrected);
    corrected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_covers_empty_and_whitespace() {
        assert!(is_blank(""));
        assert!(is_blank("   "));
        assert!(is_blank("\t\n"));
        assert!(!is_blank(" a "));
    }

    #[test]
    fn accepted_accessors() {
        let value = Normalized::Accepted("NY".to_string());
        assert!(value.is_accepted());
        assert_eq!(value.accepted(), Some("NY"));
        assert_eq!(Normalized::Rejected.into_accepted(), None);
    }
}
