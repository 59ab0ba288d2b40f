use osm_model::SourceKind;

use super::{Normalized, fix, is_blank, reject};
use crate::ledger::{AuditField, Ledger};

const HOME_STATE: &str = "NY";
const NEIGHBORING_STATE: &str = "NJ";

/// Normalizes an `addr:state` value to a two-letter code.
///
/// Punctuation is stripped and every spelling of New York becomes `NY`.
/// Only `NY` and `NJ` are kept; `NJ` is noted as outside the home state.
pub fn normalize_state(raw: &str, source: SourceKind, ledger: &mut Ledger) -> Normalized {
    if is_blank(raw) {
        return reject(ledger, AuditField::State, raw, source);
    }

    let mut name = raw.trim().to_uppercase();
    let lower = name.to_lowercase();

    if name.contains('.') || name.contains(',') {
        let corrected = name.replace(['.', ','], "");
        name = fix(ledger, AuditField::State, &name, corrected);
    }

    if lower == "new york" || lower == "new york city" {
        name = fix(ledger, AuditField::State, &name, HOME_STATE.to_string());
    }

    if lower == "ny" && name != HOME_STATE {
        name = fix(ledger, AuditField::State, &name, HOME_STATE.to_string());
    }

    if lower.contains("ny") && name.chars().count() > 2 {
        name = fix(ledger, AuditField::State, &name, HOME_STATE.to_string());
    }

    if name.is_empty() || !name.chars().all(char::is_alphabetic) {
        return reject(ledger, AuditField::State, &name, source);
    }

    if name != HOME_STATE {
        ledger.record_outside(AuditField::State, &name);
        if name != NEIGHBORING_STATE {
            return reject(ledger, AuditField::State, &name, source);
        }
    }

    Normalized::Accepted(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(raw: &str) -> (Normalized, Ledger) {
        let mut ledger = Ledger::new();
        let result = normalize_state(raw, SourceKind::Node, &mut ledger);
        (result, ledger)
    }

    #[test]
    fn spellings_of_new_york_become_ny() {
        for raw in ["ny", "NY", "N.Y.", "New York", "new york city", "NYC", "NY NY"] {
            assert_eq!(run(raw).0, Normalized::Accepted("NY".to_string()), "{raw}");
        }
    }

    #[test]
    fn punctuation_fix_is_recorded() {
        let (_, ledger) = run("N.Y.");
        assert_eq!(ledger.field(AuditField::State).fixes["N.Y."]["NY"], 1);
    }

    #[test]
    fn new_jersey_is_kept_as_outside() {
        let (result, ledger) = run("nj");
        assert_eq!(result, Normalized::Accepted("NJ".to_string()));
        assert_eq!(ledger.field(AuditField::State).outside["NJ"], 1);
    }

    #[test]
    fn other_states_are_rejected() {
        let (result, ledger) = run("CA");
        assert_eq!(result, Normalized::Rejected);
        assert_eq!(ledger.field(AuditField::State).rejected["CA"], 1);
    }

    #[test]
    fn non_alphabetic_is_rejected() {
        let (result, ledger) = run("N 1");
        assert_eq!(result, Normalized::Rejected);
        assert!(ledger.field(AuditField::State).outside.is_empty());
    }
}
