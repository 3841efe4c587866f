//! `destination-import` turns the relocation explorer's two source spreadsheets into the
//! destination records every destination store loads.
//!
//! The pipeline is a single synchronous pass:
//!
//! 1. [`ingestion::gun_laws`] reads the gun-law side table into a state-code lookup.
//! 2. [`ingestion::tokenizer`] reads the quoted locations CSV, with rows addressed by header name.
//! 3. [`processing`] normalizes each row into a typed [`types::DestinationRecord`], joining the
//!    gun-law facts by state code and collecting [`types::Issue`]s for defaulted data.
//! 4. [`emit`] writes the JSON array and renders the console summary.
//!
//! The primary entrypoint is [`pipeline::run_import`].
//!
//! ## Row handling
//!
//! - A row with fewer cells than the header is skipped and reported by line number.
//! - A row with a blank population, a blank density, or a `?` LGBTQ score is kept with `0` in
//!   that field and reported.
//! - Every other unreadable value (numbers, party codes, marijuana status, Giffords grade,
//!   unknown state code) falls back to a default silently.
//!
//! ## Example
//!
//! ```no_run
//! use destination_import::emit::format_summary;
//! use destination_import::pipeline::{run_import, ImportOptions};
//!
//! # fn main() -> Result<(), destination_import::ImportError> {
//! let report = run_import(
//!     "Locations.csv",
//!     "Gunlaws.csv",
//!     "src/data/destinations.json",
//!     &ImportOptions::default(),
//! )?;
//! print!("{}", format_summary(&report));
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod emit;
pub mod error;
pub mod ingestion;
pub mod pipeline;
pub mod processing;
pub mod types;

pub use error::{ImportError, ImportResult};
