//! Turning raw location rows into [`crate::types::DestinationRecord`]s.
//!
//! - [`normalize`]: total per-field parsers and derivations
//! - [`states`]: state code → full name
//! - [`destination`]: the per-row transform, joined with gun-law facts, plus issue checks
//!
//! ## Example
//!
//! ```rust
//! use destination_import::ingestion::{parse_gun_laws, LocationTable};
//! use destination_import::processing::transform_table;
//! use destination_import::types::FirearmLaws;
//!
//! let gun_laws = parse_gun_laws("State,Mag,Grade,Ghost,Assault\nTX,,B,Y,N\n");
//! let table = LocationTable::parse("State,City,Population,Density\nTX,Austin,974000,3000\n").unwrap();
//!
//! let report = transform_table(&table, &gun_laws);
//! assert_eq!(report.destinations[0].id, "austin-texas");
//! assert_eq!(report.destinations[0].firearm_laws, FirearmLaws::Restrictive);
//! assert!(report.issues.is_empty());
//! ```

pub mod destination;
pub mod normalize;
pub mod states;

pub use destination::{build_destination, check_row_shape, transform_table};
pub use normalize::{
    correct_city, cost_of_living_label, determine_firearm_laws, generate_id, parse_boolean,
    parse_marijuana, parse_mayor_party, parse_number, parse_party, sanitize_text,
    synthesize_climate,
};
pub use states::state_name;
