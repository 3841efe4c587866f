//! Reading the two source tables.
//!
//! - [`tokenizer`]: the quoted-CSV dialect of the locations table, with header-name row access
//! - [`gun_laws`]: the positional gun-law side table, keyed by state code
//! - [`observability`]: observer hooks for issues, warnings, success and failure

pub mod gun_laws;
pub mod observability;
pub mod tokenizer;

pub use gun_laws::{GunLawTable, load_gun_laws_from_path, parse_gun_laws};
pub use observability::{
    CompositeObserver, FileObserver, ImportContext, ImportObserver, ImportSeverity, ImportStats,
    TracingObserver,
};
pub use tokenizer::{HeaderIndex, LocationTable, RawRecord, Row, split_line, tokenize_line};
