//! Output: the destinations JSON document and the console summary.

use std::fmt::Write as _;
use std::io::Write as _;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::ImportResult;
use crate::types::{DestinationRecord, ImportReport};

/// Pretty-printed (2-space) JSON array with a trailing newline.
pub fn to_json(records: &[DestinationRecord]) -> ImportResult<String> {
    let mut out = serde_json::to_string_pretty(records)?;
    out.push('\n');
    Ok(out)
}

/// Write `records` to `path` in one step.
///
/// The document goes to a temp file beside `path` and is renamed over it, so a failure leaves any
/// previous output intact.
pub fn write_destinations(path: impl AsRef<Path>, records: &[DestinationRecord]) -> ImportResult<()> {
    let path = path.as_ref();
    let json = to_json(records)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(json.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;
    Ok(())
}

/// Plain-text run summary: total count, then the issue list or a no-issues line.
pub fn format_summary(report: &ImportReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Import Summary ===");
    let _ = writeln!(out, "Total destinations: {}", report.destination_count());
    let _ = writeln!(out);
    let _ = writeln!(out, "=== Issues Found ===");
    if report.has_issues() {
        for issue in &report.issues {
            let _ = writeln!(out, "- {issue}");
        }
    } else {
        let _ = writeln!(out, "- No issues found");
    }
    out
}
