//! Import entrypoint: gun-law table → locations table → transform → JSON output.
//!
//! Most callers should use [`run_import`] (or build an [`ImportRequest`]). It reads both inputs,
//! transforms every row, writes the output once after the full pass, and reports
//! success/failure/issues to an optional [`ImportObserver`].

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::emit::write_destinations;
use crate::error::ImportResult;
use crate::ingestion::gun_laws::load_gun_laws_from_path;
use crate::ingestion::observability::{
    ImportContext, ImportObserver, ImportSeverity, ImportStats,
};
use crate::ingestion::tokenizer::LocationTable;
use crate::processing::transform_table;
use crate::types::ImportReport;

/// Options controlling an import run.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct ImportOptions {
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn ImportObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: ImportSeverity,
}

impl fmt::Debug for ImportOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImportOptions")
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            observer: None,
            alert_at_or_above: ImportSeverity::Critical,
        }
    }
}

/// Run one import.
///
/// Fatal errors (missing input, empty locations file, unwritable output) are returned before the
/// output file is touched. Row-level problems never fail the run; they come back in
/// [`ImportReport::issues`].
///
/// When an observer is configured, this function reports:
///
/// - `on_quote_warning` for each locations line with an unbalanced quote
/// - `on_issue` for each data-quality issue, in input order
/// - `on_success` once the output is written
/// - `on_failure` on failure, and `on_alert` when the severity is >= `options.alert_at_or_above`
///
/// ```no_run
/// use std::sync::Arc;
///
/// use destination_import::ingestion::TracingObserver;
/// use destination_import::pipeline::{run_import, ImportOptions};
///
/// # fn main() -> Result<(), destination_import::ImportError> {
/// let opts = ImportOptions {
///     observer: Some(Arc::new(TracingObserver)),
///     ..Default::default()
/// };
/// let report = run_import("Locations.csv", "Gunlaws.csv", "destinations.json", &opts)?;
/// println!("destinations={}", report.destinations.len());
/// # Ok(())
/// # }
/// ```
pub fn run_import(
    locations: impl AsRef<Path>,
    gun_laws: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &ImportOptions,
) -> ImportResult<ImportReport> {
    let ctx = ImportContext {
        locations: locations.as_ref().to_path_buf(),
        gun_laws: gun_laws.as_ref().to_path_buf(),
        output: output.as_ref().to_path_buf(),
    };
    let observer = options.observer.as_deref();

    let result = import_and_write(&ctx, observer);

    if let Some(obs) = observer {
        match &result {
            Ok((report, gun_law_states)) => obs.on_success(
                &ctx,
                ImportStats {
                    destinations: report.destinations.len(),
                    issues: report.issues.len(),
                    gun_law_states: *gun_law_states,
                },
            ),
            Err(e) => {
                let sev = ImportSeverity::for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result.map(|(report, _)| report)
}

fn import_and_write(
    ctx: &ImportContext,
    observer: Option<&dyn ImportObserver>,
) -> ImportResult<(ImportReport, usize)> {
    let gun_laws = load_gun_laws_from_path(&ctx.gun_laws)?;
    let table = LocationTable::from_path(&ctx.locations)?;

    if let Some(obs) = observer {
        for record in table.records.iter().filter(|r| r.unbalanced_quotes) {
            obs.on_quote_warning(ctx, record.line);
        }
    }

    let report = transform_table(&table, &gun_laws);

    if let Some(obs) = observer {
        for issue in &report.issues {
            obs.on_issue(ctx, issue);
        }
    }

    write_destinations(&ctx.output, &report.destinations)?;
    Ok((report, gun_laws.len()))
}

/// Owned import request, for callers that assemble configuration before running it.
#[derive(Clone)]
pub struct ImportRequest {
    /// Locations CSV.
    pub locations: PathBuf,
    /// Gun-law CSV.
    pub gun_laws: PathBuf,
    /// Destination JSON output.
    pub output: PathBuf,
    pub options: ImportOptions,
}

impl fmt::Debug for ImportRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImportRequest")
            .field("locations", &self.locations)
            .field("gun_laws", &self.gun_laws)
            .field("output", &self.output)
            .field("options", &self.options)
            .finish()
    }
}

impl ImportRequest {
    /// Execute the request by calling [`run_import`].
    pub fn run(&self) -> ImportResult<ImportReport> {
        run_import(&self.locations, &self.gun_laws, &self.output, &self.options)
    }
}
