//! Field normalizers and derivations.
//!
//! Every function here is total: any input string yields a value, and numeric parsing never
//! produces `NaN`.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::{CostOfLivingLabel, FirearmLaws, MarijuanaStatus, Party};

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static regex"));

// Longest leading decimal literal, the way `parseFloat` reads one.
static LEADING_FLOAT: LazyLock<Regex> = LazyLock::new(|| {
    // ASCII digits only: `\d` would also accept Arabic-Indic and other Unicode digits.
    Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?").expect("static regex")
});

/// Index the label is computed from when the cost index is missing.
const COST_OF_LIVING_FALLBACK: f64 = 95.0;

pub fn parse_party(code: &str) -> Party {
    match code.trim().to_uppercase().as_str() {
        "R" => Party::Republican,
        "D" => Party::Democrat,
        "M" | "N" => Party::Nonpartisan,
        "I" => Party::Independent,
        _ => Party::Independent,
    }
}

/// Mayor codes: a blank cell means the race is nonpartisan.
pub fn parse_mayor_party(code: &str) -> Party {
    if code.is_empty() {
        Party::Nonpartisan
    } else {
        parse_party(code)
    }
}

pub fn parse_marijuana(status: &str) -> MarijuanaStatus {
    let normalized = status.trim().to_lowercase();
    if normalized.starts_with("rec") {
        MarijuanaStatus::Recreational
    } else if normalized.starts_with("med") {
        MarijuanaStatus::Medical
    } else if normalized.starts_with("dec") {
        MarijuanaStatus::Decriminalized
    } else {
        MarijuanaStatus::Illegal
    }
}

/// Classify firearm policy from the first letter of a Giffords grade.
pub fn determine_firearm_laws(giffords_grade: &str) -> FirearmLaws {
    match giffords_grade
        .trim()
        .chars()
        .next()
        .map(|c| c.to_ascii_uppercase())
    {
        Some('A' | 'B') => FirearmLaws::Restrictive,
        Some('C') => FirearmLaws::Moderate,
        _ => FirearmLaws::Permissive,
    }
}

/// Band a cost-of-living index. Each upper bound is inclusive.
pub fn cost_of_living_label(col: f64) -> CostOfLivingLabel {
    if col <= 90.0 {
        CostOfLivingLabel::Low
    } else if col <= 96.0 {
        CostOfLivingLabel::LowMedium
    } else if col <= 110.0 {
        CostOfLivingLabel::Medium
    } else if col <= 130.0 {
        CostOfLivingLabel::High
    } else {
        CostOfLivingLabel::VeryHigh
    }
}

/// Label for a parsed index, treating a missing (`0`) index as typical.
pub fn cost_of_living_label_or_typical(col: f64) -> CostOfLivingLabel {
    if col == 0.0 {
        cost_of_living_label(COST_OF_LIVING_FALLBACK)
    } else {
        cost_of_living_label(col)
    }
}

/// Slug ID: `{city}-{state}` lowercased, whitespace runs replaced by one `-`.
pub fn generate_id(city: &str, state: &str) -> String {
    let joined = format!("{city}-{state}").to_lowercase();
    WHITESPACE_RUN.replace_all(&joined, "-").into_owned()
}

/// Parse a numeric cell. Currency, percent and thousands separators are ignored; anything
/// unreadable is `0`.
pub fn parse_number(value: &str) -> f64 {
    let cleaned: String = value
        .chars()
        .filter(|c| !matches!(c, '$' | '%' | ','))
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() || cleaned == "NA" || cleaned == "?" {
        return 0.0;
    }

    LEADING_FLOAT
        .find(cleaned)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

pub fn parse_boolean(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "y" | "yes" | "true")
}

/// Collapse whitespace runs to single spaces and trim.
pub fn sanitize_text(value: &str) -> String {
    WHITESPACE_RUN.replace_all(value, " ").trim().to_string()
}

pub fn normalize_city_political_lean(value: &str) -> String {
    let cleaned = sanitize_text(value);
    if cleaned.is_empty() {
        "Not specified".to_string()
    } else {
        cleaned
    }
}

/// Sanitized text, with `NA` treated as blank.
pub fn normalize_availability(value: &str) -> String {
    let cleaned = sanitize_text(value);
    if cleaned.eq_ignore_ascii_case("NA") {
        String::new()
    } else {
        cleaned
    }
}

pub fn synthesize_climate(description: &str, sunny_days: f64) -> String {
    let description = description.trim();
    if sunny_days != 0.0 {
        format!("{description} with roughly {sunny_days} sunny days per year.")
    } else {
        description.to_string()
    }
}

/// Fix known city misspellings in the source data.
pub fn correct_city(raw: &str) -> &str {
    match raw {
        "Tuscon" => "Tucson",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn party_codes() {
        assert_eq!(parse_party("R"), Party::Republican);
        assert_eq!(parse_party(" d "), Party::Democrat);
        assert_eq!(parse_party("M"), Party::Nonpartisan);
        assert_eq!(parse_party("N"), Party::Nonpartisan);
        assert_eq!(parse_party("I"), Party::Independent);
        assert_eq!(parse_party(""), Party::Independent);
        assert_eq!(parse_party("Green"), Party::Independent);
    }

    #[test]
    fn mayor_blank_is_nonpartisan() {
        assert_eq!(parse_mayor_party(""), Party::Nonpartisan);
        assert_eq!(parse_mayor_party("D"), Party::Democrat);
        assert_eq!(parse_mayor_party("X"), Party::Independent);
    }

    #[test]
    fn marijuana_prefixes() {
        assert_eq!(parse_marijuana("Recreational"), MarijuanaStatus::Recreational);
        assert_eq!(parse_marijuana(" MEDICAL only"), MarijuanaStatus::Medical);
        assert_eq!(parse_marijuana("decrim"), MarijuanaStatus::Decriminalized);
        assert_eq!(parse_marijuana("Fully legal"), MarijuanaStatus::Illegal);
        assert_eq!(parse_marijuana(""), MarijuanaStatus::Illegal);
    }

    #[test]
    fn firearm_laws_from_grade() {
        for grade in ["A+", "A", "B", "B-", "a-"] {
            assert_eq!(determine_firearm_laws(grade), FirearmLaws::Restrictive, "{grade}");
        }
        for grade in ["C", "C+"] {
            assert_eq!(determine_firearm_laws(grade), FirearmLaws::Moderate, "{grade}");
        }
        for grade in ["D", "F", "", "Unknown"] {
            assert_eq!(determine_firearm_laws(grade), FirearmLaws::Permissive, "{grade}");
        }
    }

    #[test]
    fn cost_of_living_boundaries() {
        let cases = [
            (90.0, CostOfLivingLabel::Low),
            (91.0, CostOfLivingLabel::LowMedium),
            (96.0, CostOfLivingLabel::LowMedium),
            (97.0, CostOfLivingLabel::Medium),
            (110.0, CostOfLivingLabel::Medium),
            (111.0, CostOfLivingLabel::High),
            (130.0, CostOfLivingLabel::High),
            (131.0, CostOfLivingLabel::VeryHigh),
        ];
        for (col, label) in cases {
            assert_eq!(cost_of_living_label(col), label, "{col}");
        }
        assert_eq!(cost_of_living_label(90.5), CostOfLivingLabel::LowMedium);
    }

    #[test]
    fn missing_cost_index_labels_as_typical() {
        assert_eq!(cost_of_living_label_or_typical(0.0), CostOfLivingLabel::LowMedium);
        assert_eq!(cost_of_living_label_or_typical(140.0), CostOfLivingLabel::VeryHigh);
    }

    #[test]
    fn ids_are_lowercase_hyphen_slugs() {
        assert_eq!(generate_id("Tucson", "Arizona"), "tucson-arizona");
        assert_eq!(generate_id("Salt Lake  City", "Utah"), "salt-lake-city-utah");
        assert_eq!(generate_id("Raleigh", "North Carolina"), "raleigh-north-carolina");
        assert_eq!(generate_id(correct_city("Tuscon"), "Arizona"), "tucson-arizona");
    }

    #[test]
    fn parse_number_is_total() {
        assert_eq!(parse_number(""), 0.0);
        assert_eq!(parse_number("NA"), 0.0);
        assert_eq!(parse_number("?"), 0.0);
        assert_eq!(parse_number("abc"), 0.0);
        assert_eq!(parse_number("$1,234.50"), 1234.5);
        assert_eq!(parse_number(" 6.25% "), 6.25);
        assert_eq!(parse_number("-3"), -3.0);
        assert_eq!(parse_number(".5"), 0.5);
        assert_eq!(parse_number("1e400"), 0.0);
        assert_eq!(parse_number("inf"), 0.0);
        assert_eq!(parse_number("NaN"), 0.0);
    }

    #[test]
    fn parse_number_reads_leading_literal() {
        assert_eq!(parse_number("12 inches"), 12.0);
        assert_eq!(parse_number("3.5.1"), 3.5);
        assert_eq!(parse_number("2e3x"), 2000.0);
        assert_eq!(parse_number("5\u{0665}"), 5.0);
        assert_eq!(parse_number("\u{0665}"), 0.0);
    }

    #[test]
    fn booleans() {
        for yes in ["y", "Y", "yes", " TRUE "] {
            assert!(parse_boolean(yes), "{yes}");
        }
        for no in ["", "n", "no", "1", "t"] {
            assert!(!parse_boolean(no), "{no}");
        }
    }

    #[test]
    fn text_cleanup() {
        assert_eq!(sanitize_text("  a \t b\n c  "), "a b c");
        assert_eq!(normalize_city_political_lean("   "), "Not specified");
        assert_eq!(normalize_city_political_lean("Lean  D"), "Lean D");
        assert_eq!(normalize_availability("na"), "");
        assert_eq!(normalize_availability(" 12 miles "), "12 miles");
    }

    #[test]
    fn climate_mentions_sunny_days_when_known() {
        assert_eq!(
            synthesize_climate(" Hot summers ", 228.0),
            "Hot summers with roughly 228 sunny days per year."
        );
        assert_eq!(synthesize_climate(" Mild ", 0.0), "Mild");
    }
}
