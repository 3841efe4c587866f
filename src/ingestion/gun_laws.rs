//! Gun-law side table loader.
//!
//! Canonical layout, read positionally after an unconditionally skipped header row:
//!
//! ```text
//! stateCode,magazineLimit,giffordsGrade,ghostGunBan,assaultWeaponBan
//! ```
//!
//! Rows with fewer than four columns are dropped without an issue. This table is a reference
//! lookup rather than primary data, so it is not held to the locations table's column check.

use std::collections::HashMap;
use std::path::Path;

use crate::error::ImportResult;
use crate::types::{DEFAULT_MAGAZINE_LIMIT, GunLawRecord, UNKNOWN_GRADE};

use super::tokenizer::{nonblank_lines, split_plain};

const MIN_COLUMNS: usize = 4;

/// State code → gun-law facts.
pub type GunLawTable = HashMap<String, GunLawRecord>;

/// Parse gun-law table text. A repeated state code keeps its last row.
pub fn parse_gun_laws(content: &str) -> GunLawTable {
    let mut table = GunLawTable::new();

    for line in nonblank_lines(content).skip(1) {
        let values = split_plain(line.text);
        if values.len() < MIN_COLUMNS {
            continue;
        }

        let cell = |idx: usize| values.get(idx).map(String::as_str).unwrap_or("");
        let record = GunLawRecord {
            magazine_limit: non_empty_or(cell(1), DEFAULT_MAGAZINE_LIMIT),
            giffords_grade: non_empty_or(cell(2), UNKNOWN_GRADE),
            ghost_gun_ban: is_yes_marker(cell(3)),
            assault_weapon_ban: is_yes_marker(cell(4)),
        };
        table.insert(cell(0).to_string(), record);
    }

    table
}

/// Read and parse the gun-law table at `path`. A missing file is fatal.
pub fn load_gun_laws_from_path(path: impl AsRef<Path>) -> ImportResult<GunLawTable> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_gun_laws(&content))
}

fn non_empty_or(value: &str, default: &str) -> String {
    let chosen = if value.is_empty() { default } else { value };
    chosen.to_string()
}

fn is_yes_marker(value: &str) -> bool {
    value.eq_ignore_ascii_case("y")
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "State,Magazine,Gifford,Ghost,Assault\n";

    #[test]
    fn parses_rows_by_position() {
        let table = parse_gun_laws(&format!("{HEADER}CA,10 rounds,A,Y,y\nTX,,F,n,N\n"));
        assert_eq!(table.len(), 2);

        let ca = &table["CA"];
        assert_eq!(ca.magazine_limit, "10 rounds");
        assert_eq!(ca.giffords_grade, "A");
        assert!(ca.ghost_gun_ban);
        assert!(ca.assault_weapon_ban);

        let tx = &table["TX"];
        assert_eq!(tx.magazine_limit, DEFAULT_MAGAZINE_LIMIT);
        assert!(!tx.ghost_gun_ban);
        assert!(!tx.assault_weapon_ban);
    }

    #[test]
    fn header_is_skipped_even_when_it_looks_like_data() {
        let table = parse_gun_laws("CA,10 rounds,A,Y,Y\nNY,10 rounds,A,Y,Y\n");
        assert!(!table.contains_key("CA"));
        assert!(table.contains_key("NY"));
    }

    #[test]
    fn short_rows_are_dropped_silently() {
        let table = parse_gun_laws(&format!("{HEADER}CA,10,A\nOR,,B-,Y\n"));
        assert!(!table.contains_key("CA"));
        // Four columns is enough; the missing assault flag reads as false.
        let or = &table["OR"];
        assert_eq!(or.giffords_grade, "B-");
        assert!(or.ghost_gun_ban);
        assert!(!or.assault_weapon_ban);
    }

    #[test]
    fn blank_grade_defaults_to_unknown() {
        let table = parse_gun_laws(&format!("{HEADER}WY,,,N,N\n"));
        assert_eq!(table["WY"].giffords_grade, UNKNOWN_GRADE);
    }

    #[test]
    fn byte_order_mark_does_not_shift_the_header() {
        let table = parse_gun_laws(&format!("\u{feff}{HEADER}TX,,B,Y,N\n"));
        assert_eq!(table.len(), 1);
        assert_eq!(table["TX"].giffords_grade, "B");
    }

    #[test]
    fn last_row_wins_for_duplicate_states() {
        let table = parse_gun_laws(&format!("{HEADER}TX,,F,N,N\nTX,,C,Y,N\n"));
        assert_eq!(table.len(), 1);
        assert_eq!(table["TX"].giffords_grade, "C");
        assert!(table["TX"].ghost_gun_ban);
    }

    #[test]
    fn yes_marker_is_exactly_y() {
        let table = parse_gun_laws(&format!("{HEADER}NV,,C,yes,true\n"));
        assert!(!table["NV"].ghost_gun_ban);
        assert!(!table["NV"].assault_weapon_ban);
    }
}
