//! Core data model types for the destination import.
//!
//! The emitted unit is a [`DestinationRecord`]. Its serialized shape (camelCase keys, field order,
//! integer-looking whole numbers) is the contract with every downstream destination store.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Magazine-limit text used when the gun-law table has nothing for a state.
pub const DEFAULT_MAGAZINE_LIMIT: &str = "No state restrictions on magazine capacity";

/// Veteran-benefit text used when the locations row leaves the column blank.
pub const DEFAULT_VETERAN_BENEFIT: &str = "No state-specific veteran benefit noted.";

/// Giffords grade used when the gun-law table has no grade for a state.
pub const UNKNOWN_GRADE: &str = "Unknown";

/// Political party affiliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Party {
    Democrat,
    Republican,
    Independent,
    Nonpartisan,
}

/// Legal status of marijuana in a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarijuanaStatus {
    Recreational,
    Medical,
    Decriminalized,
    Illegal,
}

/// Coarse firearm-policy classification derived from a Giffords grade.
///
/// A high Giffords grade means strict regulation, which is labeled [`FirearmLaws::Restrictive`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FirearmLaws {
    Restrictive,
    Moderate,
    Permissive,
}

/// Banded cost-of-living label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CostOfLivingLabel {
    Low,
    #[serde(rename = "Low/Medium")]
    LowMedium,
    Medium,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl CostOfLivingLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::LowMedium => "Low/Medium",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::VeryHigh => "Very High",
        }
    }
}

impl fmt::Display for CostOfLivingLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gun-law facts for one state, joined into destinations by state code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GunLawRecord {
    /// Free-text magazine capacity restriction.
    pub magazine_limit: String,
    /// Giffords letter grade, e.g. `"A-"`, or `"Unknown"`.
    pub giffords_grade: String,
    pub ghost_gun_ban: bool,
    pub assault_weapon_ban: bool,
}

impl Default for GunLawRecord {
    fn default() -> Self {
        Self {
            magazine_limit: DEFAULT_MAGAZINE_LIMIT.to_string(),
            giffords_grade: UNKNOWN_GRADE.to_string(),
            ghost_gun_ban: false,
            assault_weapon_ban: false,
        }
    }
}

/// One city-level output row combining location, political, policy and livability attributes.
///
/// Numeric fields are always present: unparsable cells become `0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationRecord {
    pub id: String,
    pub state_code: String,
    pub city: String,
    pub county: String,
    pub state: String,
    pub state_party: Party,
    pub governor_party: Party,
    pub mayor_party: Party,
    pub city_political_lean: String,
    #[serde(with = "js_number")]
    pub population: f64,
    #[serde(with = "js_number")]
    pub density: f64,
    #[serde(with = "js_number")]
    pub sales_tax: f64,
    #[serde(with = "js_number")]
    pub income_tax: f64,
    pub marijuana_status: MarijuanaStatus,
    pub firearm_laws: FirearmLaws,
    #[serde(rename = "giffordScore")]
    pub giffords_grade: String,
    pub magazine_limit: String,
    pub ghost_gun_ban: bool,
    pub assault_weapon_ban: bool,
    pub veteran_benefits: String,
    pub climate: String,
    #[serde(with = "js_number")]
    pub snowfall: f64,
    #[serde(with = "js_number")]
    pub rainfall: f64,
    #[serde(with = "js_number")]
    pub gas_price: f64,
    #[serde(with = "js_number")]
    pub cost_of_living: f64,
    pub cost_of_living_label: CostOfLivingLabel,
    #[serde(with = "js_number")]
    pub sunny_days: f64,
    #[serde(with = "js_number")]
    pub lgbtq_score: f64,
    pub tech_hub: bool,
    pub military_hub: bool,
    pub va_support: bool,
    #[serde(rename = "nearestVA")]
    pub nearest_va: String,
    #[serde(rename = "distanceToVA")]
    pub distance_to_va: String,
    #[serde(with = "js_number")]
    pub humidity_summer: f64,
    pub description: String,
    #[serde(with = "js_number")]
    pub tci_score: f64,
    #[serde(with = "js_number")]
    pub alw_score: f64,
    #[serde(with = "js_number")]
    pub ahs_score: f64,
    #[serde(rename = "election2016Winner")]
    pub election_2016_winner: String,
    #[serde(rename = "election2016Percent", with = "js_number")]
    pub election_2016_percent: f64,
    #[serde(rename = "election2024Winner")]
    pub election_2024_winner: String,
    #[serde(rename = "election2024Percent", with = "js_number")]
    pub election_2024_percent: f64,
    pub election_change: String,
}

/// A non-fatal data-quality finding tied to one input row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    /// The row had fewer cells than the header; the row was skipped.
    ColumnCountMismatch {
        /// 1-based physical line number in the locations file.
        line: usize,
        expected: usize,
        found: usize,
    },
    /// Population was blank or unparsable; the record was kept with `0`.
    MissingPopulation { city: String, state_code: String },
    /// Density was blank or unparsable; the record was kept with `0`.
    MissingDensity { city: String, state_code: String },
    /// The LGBTQ cell held the `?` sentinel; the record was kept with `0`.
    UnratedLgbtq { city: String, state_code: String },
}

impl Issue {
    /// Line number for row-shape issues, `None` for issues located by city/state.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::ColumnCountMismatch { line, .. } => Some(*line),
            _ => None,
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ColumnCountMismatch { line, expected, found } => {
                write!(f, "Line {line}: expected {expected} columns, found {found}")
            }
            Self::MissingPopulation { city, state_code } => {
                write!(f, "{}, {state_code}: missing population value", city_or_unknown(city))
            }
            Self::MissingDensity { city, state_code } => {
                write!(f, "{}, {state_code}: missing density value", city_or_unknown(city))
            }
            Self::UnratedLgbtq { city, state_code } => {
                write!(f, "{}, {state_code}: LGBTQ score reported as '?'", city_or_unknown(city))
            }
        }
    }
}

fn city_or_unknown(city: &str) -> &str {
    if city.is_empty() { "Unknown city" } else { city }
}

/// Result of one import pass: records and issues, both in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReport {
    pub destinations: Vec<DestinationRecord>,
    pub issues: Vec<Issue>,
}

impl ImportReport {
    pub fn destination_count(&self) -> usize {
        self.destinations.len()
    }

    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }
}

/// Serializes whole `f64`s as JSON integers (`1234` rather than `1234.0`), the way
/// `JSON.stringify` prints them, so regenerated files diff cleanly against existing ones.
///
/// Whole values below 1e21 are written positionally from their shortest round-trip digits
/// (`2^60` prints as `1152921504606847000`, as in JavaScript). Everything else falls through to
/// `serde_json`, so exponent-form output is not byte-identical: `1e300` where JavaScript writes
/// `1e+300`.
mod js_number {
    use serde::{Deserialize, Deserializer, Serializer};

    // JavaScript switches to exponent notation from here on.
    const POSITIONAL_LIMIT: f64 = 1e21;

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() && value.fract() == 0.0 && value.abs() < POSITIONAL_LIMIT {
            // `Display` for f64 is positional with shortest round-trip digits, never exponent.
            if let Ok(whole) = value.to_string().parse::<i128>() {
                return serializer.serialize_i128(whole);
            }
        }
        serializer.serialize_f64(*value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        f64::deserialize(deserializer)
    }
}
