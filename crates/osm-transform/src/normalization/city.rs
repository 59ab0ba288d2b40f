use osm_model::SourceKind;

use super::text::title_case;
use super::{Normalized, fix, is_blank, reject};
use crate::ledger::{AuditField, Ledger};

/// Spelling corrections applied to the lower-cased value.
const TYPOS: &[(&str, &str)] = &[
    ("nwe", "new"),
    ("yoro", "york"),
    ("ykrk", "york"),
    ("ykro", "york"),
];

const HOME_CITIES: &[&str] = &["New York", "New York City"];

/// Cities outside the home city that are still kept.
const NEIGHBORING_CITIES: &[&str] = &[
    "Union City",
    "West New York",
    "North Bergen",
    "Weehawken",
    "Long Island City",
    "Roosevelt Island",
    "Queens",
    "Guttenberg",
    "Astoria",
    "Hoboken",
    "Jersey City",
    "Morristown",
];

/// Home-city abbreviations matched anywhere in the lower-cased value.
const HOME_ABBREVIATIONS: &[&str] = &["ny", "nyc", "nyy"];

/// Normalizes an `addr:city` value.
///
/// Values without punctuation must be letters and spaces only. Spelling and
/// case are corrected, anything naming the home city collapses to
/// `New York`, and remaining values are kept only for the neighboring cities.
pub fn normalize_city(raw: &str, source: SourceKind, ledger: &mut Ledger) -> Normalized {
    if is_blank(raw) {
        return reject(ledger, AuditField::City, raw, source);
    }

    let mut name = raw.trim().to_string();

    let punctuated = name.contains(',') || name.contains('.');
    if !punctuated && !name.chars().all(|c| c.is_alphabetic() || c.is_whitespace()) {
        return reject(ledger, AuditField::City, &name, source);
    }

    let mut lower = name.to_lowercase();

    for (typo, correct) in TYPOS {
        if lower.contains(typo) {
            lower = lower.replace(typo, correct);
            name = fix(ledger, AuditField::City, &name, title_case(&lower));
        }
    }

    if (lower == "new york" || lower == "new york city") && !HOME_CITIES.contains(&name.as_str()) {
        let corrected = title_case(&name);
        name = fix(ledger, AuditField::City, &name, corrected);
    }

    if HOME_ABBREVIATIONS.iter().any(|abbreviation| lower.contains(abbreviation)) {
        name = fix(ledger, AuditField::City, &name, "New York".to_string());
    }

    if lower == "west new york" && name != "West New York" {
        let corrected = title_case(&name);
        name = fix(ledger, AuditField::City, &name, corrected);
    } else if name != "West New York" && lower.contains("new york") && name.chars().count() > 8 {
        let corrected: String = name.chars().take(8).collect();
        name = fix(ledger, AuditField::City, &name, corrected);
    }

    if !HOME_CITIES.contains(&name.as_str()) {
        ledger.record_outside(AuditField::City, &name);
        if !NEIGHBORING_CITIES.contains(&name.as_str()) {
            return reject(ledger, AuditField::City, &name, source);
        }
    }

    Normalized::Accepted(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(raw: &str) -> (Normalized, Ledger) {
        let mut ledger = Ledger::new();
        let result = normalize_city(raw, SourceKind::Way, &mut ledger);
        (result, ledger)
    }

    #[test]
    fn state_suffix_collapses_to_home_city() {
        let (result, ledger) = run("new york, ny");
        assert_eq!(result, Normalized::Accepted("New York".to_string()));
        assert_eq!(ledger.field(AuditField::City).fixes["new york, ny"]["New York"], 1);
    }

    #[test]
    fn typo_is_corrected_and_title_cased() {
        let (result, ledger) = run("New Yoro");
        assert_eq!(result, Normalized::Accepted("New York".to_string()));
        assert_eq!(ledger.field(AuditField::City).fixes["New Yoro"]["New York"], 1);
    }

    #[test]
    fn long_home_city_is_truncated() {
        assert_eq!(run("New York City").0, Normalized::Accepted("New York".to_string()));
        assert_eq!(run("new york city").0, Normalized::Accepted("New York".to_string()));
    }

    #[test]
    fn neighboring_city_is_kept_but_noted() {
        let (result, ledger) = run("Hoboken");
        assert_eq!(result, Normalized::Accepted("Hoboken".to_string()));
        assert_eq!(ledger.field(AuditField::City).outside["Hoboken"], 1);
        assert_eq!(ledger.counts().values_eliminated, 0);
    }

    #[test]
    fn west_new_york_keeps_full_name() {
        assert_eq!(
            run("west new york").0,
            Normalized::Accepted("West New York".to_string())
        );
    }

    #[test]
    fn distant_city_is_rejected() {
        let (result, ledger) = run("Boston");
        assert_eq!(result, Normalized::Rejected);
        assert_eq!(ledger.field(AuditField::City).outside["Boston"], 1);
        assert_eq!(ledger.field(AuditField::City).rejected["Boston"], 1);
    }

    #[test]
    fn digits_without_punctuation_are_rejected() {
        let (result, ledger) = run("10025");
        assert_eq!(result, Normalized::Rejected);
        assert!(ledger.field(AuditField::City).outside.is_empty());
    }
}
