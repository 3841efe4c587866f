use clap::{ArgAction, Parser, ValueHint};
use std::path::PathBuf;
use std::sync::Arc;

use crate::ingestion::{CompositeObserver, FileObserver, ImportObserver, TracingObserver};
use crate::pipeline::{ImportOptions, ImportRequest};

/// Build the destinations JSON from the locations and gun-law spreadsheets
#[derive(Parser, Debug)]
#[command(name = "destination-import", version, about)]
pub struct Cli {
    /// Locations CSV (quoted fields, columns addressed by header name)
    #[arg(long, env = "DESTINATION_LOCATIONS_CSV", value_hint = ValueHint::FilePath)]
    pub locations: PathBuf,

    /// Gun-law CSV: stateCode,magazineLimit,giffordsGrade,ghostGunBan,assaultWeaponBan
    #[arg(long, env = "DESTINATION_GUN_LAWS_CSV", value_hint = ValueHint::FilePath)]
    pub gun_laws: PathBuf,

    /// Output JSON file (replaced atomically)
    #[arg(
        short,
        long,
        env = "DESTINATION_OUTPUT_JSON",
        default_value = "src/data/destinations.json",
        value_hint = ValueHint::FilePath
    )]
    pub output: PathBuf,

    /// Also append import events to this file
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Default `tracing` filter for the chosen verbosity; `RUST_LOG` overrides it.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }

    pub fn to_request(&self) -> ImportRequest {
        let mut observers: Vec<Arc<dyn ImportObserver>> = vec![Arc::new(TracingObserver)];
        if let Some(path) = &self.log_file {
            observers.push(Arc::new(FileObserver::new(path)));
        }

        ImportRequest {
            locations: self.locations.clone(),
            gun_laws: self.gun_laws.clone(),
            output: self.output.clone(),
            options: ImportOptions {
                observer: Some(Arc::new(CompositeObserver::new(observers))),
                ..Default::default()
            },
        }
    }
}
