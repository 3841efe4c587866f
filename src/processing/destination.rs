//! Row → [`DestinationRecord`] transformation and per-row issue checks.

use crate::ingestion::gun_laws::GunLawTable;
use crate::ingestion::tokenizer::{LocationTable, RawRecord, Row};
use crate::types::{DEFAULT_VETERAN_BENEFIT, DestinationRecord, GunLawRecord, ImportReport, Issue};

use super::normalize::{
    correct_city, cost_of_living_label_or_typical, determine_firearm_laws, generate_id,
    normalize_availability, normalize_city_political_lean, parse_boolean, parse_marijuana,
    parse_mayor_party, parse_number, parse_party, sanitize_text, synthesize_climate,
};
use super::states::state_name;

/// Locations CSV header names, matched literally.
pub mod columns {
    pub const STATE: &str = "State";
    pub const CITY: &str = "City";
    pub const COUNTY: &str = "County";
    pub const POPULATION: &str = "Population";
    pub const DENSITY: &str = "Density";
    pub const LGBTQ: &str = "LGBTQ";
    pub const CITY_POLITICS: &str = "CityPolitics";
    pub const MAYOR: &str = "Mayor";
    pub const NEAREST_VA: &str = "NearestVA";
    pub const DISTANCE_TO_VA: &str = "DistanceToVA";
    pub const HUMIDITY_SUMMER: &str = "HumiditySummer";
    pub const MILITARY_HUB: &str = "MilitaryHub";
    pub const DESCRIPTION: &str = "Description";
    pub const STATE_PARTY: &str = "StateParty";
    pub const GOVERNOR: &str = "Governor";
    pub const SALES_TAX: &str = "Sales Tax";
    pub const INCOME: &str = "Income";
    pub const MARIJUANA: &str = "Marijuana";
    pub const SUN: &str = "Sun";
    pub const CLIMATE: &str = "Climate";
    pub const VETERANS_BENEFITS: &str = "Veterans Benefits";
    pub const SNOW: &str = "Snow";
    pub const RAIN: &str = "Rain";
    pub const GAS: &str = "Gas";
    pub const COL: &str = "COL";
    pub const TECH_HUB: &str = "TechHub";
    pub const TECH: &str = "Tech";
    pub const VA: &str = "VA";
    pub const TCI: &str = "TCI";
    pub const ALW: &str = "ALW";
    pub const AHS: &str = "AHS";
    pub const ELECTION_2016: &str = "2016Election";
    pub const PRESIDENT_PERCENT_2016: &str = "2016PresidentPercent";
    // The source file spells this one with a space; its sibling columns have none.
    pub const ELECTION_2024: &str = "2024 Election";
    pub const PRESIDENT_PERCENT_2024: &str = "2024PresidentPercent";
    pub const ELECTION_CHANGE: &str = "ElectionChange";
}

const LGBTQ_UNRATED: &str = "?";

/// Issue for a row with fewer cells than the header, if any. Such rows are not transformed.
pub fn check_row_shape(record: &RawRecord, header_len: usize) -> Option<Issue> {
    (record.values.len() < header_len).then(|| Issue::ColumnCountMismatch {
        line: record.line,
        expected: header_len,
        found: record.values.len(),
    })
}

/// Build one destination from a full-width row, joined against `gun_laws` by state code.
///
/// Returns the record together with any data-quality issues found in it. The record is always
/// produced; issues only describe defaulted values.
pub fn build_destination(row: &Row<'_>, gun_laws: &GunLawTable) -> (DestinationRecord, Vec<Issue>) {
    let state_code = row.get(columns::STATE).to_string();
    let city = correct_city(row.get(columns::CITY)).to_string();
    let state = state_name(&state_code).to_string();

    let population = parse_number(row.get(columns::POPULATION));
    let density = parse_number(row.get(columns::DENSITY));
    let lgbtq_raw = row.get(columns::LGBTQ);

    let mut issues = Vec::new();
    if population == 0.0 {
        issues.push(Issue::MissingPopulation {
            city: city.clone(),
            state_code: state_code.clone(),
        });
    }
    if density == 0.0 {
        issues.push(Issue::MissingDensity {
            city: city.clone(),
            state_code: state_code.clone(),
        });
    }
    if lgbtq_raw == LGBTQ_UNRATED {
        issues.push(Issue::UnratedLgbtq {
            city: city.clone(),
            state_code: state_code.clone(),
        });
    }

    let fallback = GunLawRecord::default();
    let gun_law = gun_laws.get(&state_code).unwrap_or(&fallback);

    let sunny_days = parse_number(row.get(columns::SUN));
    let cost_of_living = parse_number(row.get(columns::COL));
    let veteran_benefits = match sanitize_text(row.get(columns::VETERANS_BENEFITS)) {
        text if text.is_empty() => DEFAULT_VETERAN_BENEFIT.to_string(),
        text => text,
    };
    let tech = match row.get(columns::TECH_HUB) {
        "" => row.get(columns::TECH),
        value => value,
    };

    let record = DestinationRecord {
        id: generate_id(&city, &state),
        county: row.get(columns::COUNTY).to_string(),
        state_party: parse_party(row.get(columns::STATE_PARTY)),
        governor_party: parse_party(row.get(columns::GOVERNOR)),
        mayor_party: parse_mayor_party(row.get(columns::MAYOR)),
        city_political_lean: normalize_city_political_lean(row.get(columns::CITY_POLITICS)),
        population,
        density,
        sales_tax: parse_number(row.get(columns::SALES_TAX)),
        income_tax: parse_number(row.get(columns::INCOME)),
        marijuana_status: parse_marijuana(row.get(columns::MARIJUANA)),
        firearm_laws: determine_firearm_laws(&gun_law.giffords_grade),
        giffords_grade: gun_law.giffords_grade.clone(),
        magazine_limit: gun_law.magazine_limit.clone(),
        ghost_gun_ban: gun_law.ghost_gun_ban,
        assault_weapon_ban: gun_law.assault_weapon_ban,
        veteran_benefits,
        climate: synthesize_climate(row.get(columns::CLIMATE), sunny_days),
        snowfall: parse_number(row.get(columns::SNOW)),
        rainfall: parse_number(row.get(columns::RAIN)),
        gas_price: parse_number(row.get(columns::GAS)),
        cost_of_living,
        cost_of_living_label: cost_of_living_label_or_typical(cost_of_living),
        sunny_days,
        lgbtq_score: parse_number(lgbtq_raw),
        tech_hub: parse_boolean(tech),
        military_hub: parse_boolean(row.get(columns::MILITARY_HUB)),
        va_support: parse_boolean(row.get(columns::VA)),
        nearest_va: normalize_availability(row.get(columns::NEAREST_VA)),
        distance_to_va: normalize_availability(row.get(columns::DISTANCE_TO_VA)),
        humidity_summer: parse_number(row.get(columns::HUMIDITY_SUMMER)),
        description: sanitize_text(row.get(columns::DESCRIPTION)),
        tci_score: parse_number(row.get(columns::TCI)),
        alw_score: parse_number(row.get(columns::ALW)),
        ahs_score: parse_number(row.get(columns::AHS)),
        election_2016_winner: row.get(columns::ELECTION_2016).to_string(),
        election_2016_percent: parse_number(row.get(columns::PRESIDENT_PERCENT_2016)),
        election_2024_winner: row.get(columns::ELECTION_2024).to_string(),
        election_2024_percent: parse_number(row.get(columns::PRESIDENT_PERCENT_2024)),
        election_change: row.get(columns::ELECTION_CHANGE).to_string(),
        state_code,
        city,
        state,
    };

    (record, issues)
}

/// Transform every data row of `table`, in order.
///
/// Short rows are skipped with a [`Issue::ColumnCountMismatch`]; every other row yields a record.
pub fn transform_table(table: &LocationTable, gun_laws: &GunLawTable) -> ImportReport {
    let header_len = table.headers.len();
    let mut report = ImportReport::default();

    for record in &table.records {
        if let Some(issue) = check_row_shape(record, header_len) {
            report.issues.push(issue);
            continue;
        }
        let (destination, issues) = build_destination(&table.row(record), gun_laws);
        report.destinations.push(destination);
        report.issues.extend(issues);
    }

    report
}
