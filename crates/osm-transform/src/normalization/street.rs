use osm_model::SourceKind;
use tracing::debug;

use super::{Normalized, fix, is_blank, reject};
use crate::ledger::{AuditField, Ledger};

/// Street types accepted as the final token.
const ALLOWED_STREET_TYPES: &[&str] = &[
    "Americas",
    "Avenue",
    "Boulevard",
    "Broadway",
    "Circle",
    "Court",
    "Drive",
    "East",
    "Lane",
    "North",
    "Parkway",
    "Place",
    "Plaza",
    "Road",
    "South",
    "Square",
    "Street",
    "Terrace",
    "Walk",
    "Way",
    "West",
];

/// Ordinal endings that let an otherwise unknown final token through (`86th`).
const ORDINAL_ENDINGS: &[&str] = &["st", "nd", "rd", "th"];

/// Directional abbreviations in the leading part, applied in this order.
const DIRECTIONS: &[(&str, &str)] = &[
    ("N.", "North"),
    ("E.", "East"),
    ("S.", "South"),
    ("W.", "West"),
    ("N ", "North "),
    ("E ", "East "),
    ("S ", "South "),
    ("W ", "West "),
];

fn expand_street_type(token: &str) -> Option<&'static str> {
    let expanded = match token {
        "St" | "St." | "street" | "st" | "st." => "Street",
        "pl" | "pl." | "place" | "Pl" | "Pl." => "Place",
        "avenue" | "ave" | "ave." | "Ave" | "Ave." | "Avene" | "Aveneu" | "Avenue,#392" => {
            "Avenue"
        }
        "dr" | "dr." | "Dr" | "Dr." => "Drive",
        "N" => "North",
        "S" => "South",
        "E" => "East",
        "W" => "West",
        _ => return None,
    };
    Some(expanded)
}

fn is_allowed_street_type(token: &str) -> bool {
    if ALLOWED_STREET_TYPES.contains(&token) {
        return true;
    }
    let allowed = ORDINAL_ENDINGS.iter().any(|ending| token.ends_with(ending));
    if allowed {
        debug!(street_type = token, "ordinal street type allowed");
    }
    allowed
}

/// Normalizes an `addr:street` value.
///
/// The last space-separated token is the street type: abbreviations are
/// expanded and the result must be alphanumeric and either a known type or an
/// ordinal. Directional abbreviations in the leading part are spelled out.
/// A single-token value is checked the same way but returned as given.
pub fn normalize_street(raw: &str, source: SourceKind, ledger: &mut Ledger) -> Normalized {
    if is_blank(raw) {
        return reject(ledger, AuditField::Street, raw, source);
    }

    let trimmed = raw.trim();
    let (mut leading, mut street_type, multi_token) = match trimmed.rsplit_once(' ') {
        Some((leading, street_type)) => (leading.to_string(), street_type.to_string(), true),
        None => (trimmed.to_string(), trimmed.to_string(), false),
    };

    if let Some(expanded) = expand_street_type(&street_type) {
        street_type = fix(ledger, AuditField::Street, &street_type, expanded.to_string());
    }

    for (abbreviation, spelled) in DIRECTIONS {
        if leading.contains(abbreviation) {
            let corrected = leading.replace(abbreviation, spelled);
            leading = fix(ledger, AuditField::Street, &leading, corrected);
        }
    }

    let alphanumeric = !street_type.is_empty() && street_type.chars().all(char::is_alphanumeric);
    if !alphanumeric || !is_allowed_street_type(&street_type) {
        return reject(ledger, AuditField::Street, &street_type, source);
    }

    if multi_token {
        Normalized::Accepted(format!("{leading} {street_type}"))
    } else {
        Normalized::Accepted(leading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(raw: &str) -> (Normalized, Ledger) {
        let mut ledger = Ledger::new();
        let result = normalize_street(raw, SourceKind::Node, &mut ledger);
        (result, ledger)
    }

    #[test]
    fn expands_direction_and_type() {
        let (result, ledger) = run("W 86th St");
        assert_eq!(result, Normalized::Accepted("West 86th Street".to_string()));
        let fixes = &ledger.field(AuditField::Street).fixes;
        assert_eq!(fixes["St"]["Street"], 1);
        assert_eq!(fixes["W 86th"]["West 86th"], 1);
    }

    #[test]
    fn dotted_direction_is_spelled_out() {
        let (result, _) = run("W. 79th Street");
        assert_eq!(result, Normalized::Accepted("West 79th Street".to_string()));
    }

    #[test]
    fn ordinal_type_is_allowed() {
        let (result, _) = run("Avenue of the 86th");
        assert_eq!(result, Normalized::Accepted("Avenue of the 86th".to_string()));
    }

    #[test]
    fn single_token_is_returned_unchanged() {
        assert_eq!(run("Broadway").0, Normalized::Accepted("Broadway".to_string()));
        assert_eq!(run("  N ").0, Normalized::Accepted("N".to_string()));
    }

    #[test]
    fn unknown_type_is_rejected_by_type() {
        let (result, ledger) = run("Columbus Circus");
        assert_eq!(result, Normalized::Rejected);
        assert_eq!(ledger.field(AuditField::Street).rejected["Circus"], 1);
        assert_eq!(ledger.counts().values_eliminated, 1);
    }

    #[test]
    fn punctuated_type_is_rejected() {
        let (result, ledger) = run("Main St,");
        assert_eq!(result, Normalized::Rejected);
        assert_eq!(ledger.field(AuditField::Street).rejected["St,"], 1);
    }

    #[test]
    fn blank_is_rejected() {
        let (result, ledger) = run("   ");
        assert_eq!(result, Normalized::Rejected);
        assert_eq!(ledger.field(AuditField::Street).rejected["   "], 1);
    }
}
