use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::ImportError;
use crate::types::Issue;

/// Severity of a failed import, used for alerting thresholds.
///
/// Non-fatal conditions (issues, quote warnings) have their own callbacks and carry no severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ImportSeverity {
    /// Error-level event (the import failed).
    Error,
    /// Critical error (typically I/O failures on inputs or output).
    Critical,
}

impl ImportSeverity {
    /// Severity of a fatal import error.
    pub fn for_error(error: &ImportError) -> Self {
        match error {
            ImportError::Io(_) | ImportError::Persist(_) => Self::Critical,
            ImportError::EmptyInput { .. } | ImportError::Json(_) => Self::Error,
        }
    }
}

/// Context about an import run.
#[derive(Debug, Clone)]
pub struct ImportContext {
    pub locations: PathBuf,
    pub gun_laws: PathBuf,
    pub output: PathBuf,
}

/// Counts reported on a successful import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportStats {
    /// Records written.
    pub destinations: usize,
    /// Data-quality issues found.
    pub issues: usize,
    /// States in the gun-law table.
    pub gun_law_states: usize,
}

/// Observer interface for import outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait ImportObserver: Send + Sync {
    /// Called once per data-quality issue, in input order.
    fn on_issue(&self, _ctx: &ImportContext, _issue: &Issue) {}

    /// Called when a locations line ends with its quote flag still set.
    fn on_quote_warning(&self, _ctx: &ImportContext, _line: usize) {}

    /// Called when the import succeeds and the output is in place.
    fn on_success(&self, _ctx: &ImportContext, _stats: ImportStats) {}

    /// Called when the import fails.
    fn on_failure(&self, _ctx: &ImportContext, _severity: ImportSeverity, _error: &ImportError) {}

    /// Called when an import failure meets an alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &ImportContext, severity: ImportSeverity, error: &ImportError) {
        self.on_failure(ctx, severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn ImportObserver>>,
}

impl CompositeObserver {
    pub fn new(observers: Vec<Arc<dyn ImportObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl ImportObserver for CompositeObserver {
    fn on_issue(&self, ctx: &ImportContext, issue: &Issue) {
        for o in &self.observers {
            o.on_issue(ctx, issue);
        }
    }

    fn on_quote_warning(&self, ctx: &ImportContext, line: usize) {
        for o in &self.observers {
            o.on_quote_warning(ctx, line);
        }
    }

    fn on_success(&self, ctx: &ImportContext, stats: ImportStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &ImportContext, severity: ImportSeverity, error: &ImportError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &ImportContext, severity: ImportSeverity, error: &ImportError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Emits import events as `tracing` events.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl ImportObserver for TracingObserver {
    fn on_issue(&self, ctx: &ImportContext, issue: &Issue) {
        tracing::debug!(locations = %ctx.locations.display(), line = ?issue.line(), "{issue}");
    }

    fn on_quote_warning(&self, ctx: &ImportContext, line: usize) {
        tracing::warn!(
            locations = %ctx.locations.display(),
            line,
            "unbalanced quote; rest of line read as one field"
        );
    }

    fn on_success(&self, ctx: &ImportContext, stats: ImportStats) {
        tracing::info!(
            output = %ctx.output.display(),
            destinations = stats.destinations,
            issues = stats.issues,
            gun_law_states = stats.gun_law_states,
            "import finished"
        );
    }

    fn on_failure(&self, ctx: &ImportContext, severity: ImportSeverity, error: &ImportError) {
        tracing::error!(
            ?severity,
            locations = %ctx.locations.display(),
            gun_laws = %ctx.gun_laws.display(),
            %error,
            "import failed"
        );
    }

    fn on_alert(&self, ctx: &ImportContext, severity: ImportSeverity, error: &ImportError) {
        tracing::error!(
            alert = true,
            ?severity,
            locations = %ctx.locations.display(),
            gun_laws = %ctx.gun_laws.display(),
            %error,
            "import failed"
        );
    }
}

/// Appends import events to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl ImportObserver for FileObserver {
    fn on_issue(&self, ctx: &ImportContext, issue: &Issue) {
        self.append_line(&format!(
            "{} issue locations={} {issue}",
            unix_ts(),
            ctx.locations.display()
        ));
    }

    fn on_quote_warning(&self, ctx: &ImportContext, line: usize) {
        self.append_line(&format!(
            "{} warn unbalanced_quote locations={} line={line}",
            unix_ts(),
            ctx.locations.display()
        ));
    }

    fn on_success(&self, ctx: &ImportContext, stats: ImportStats) {
        self.append_line(&format!(
            "{} ok output={} destinations={} issues={}",
            unix_ts(),
            ctx.output.display(),
            stats.destinations,
            stats.issues
        ));
    }

    fn on_failure(&self, ctx: &ImportContext, severity: ImportSeverity, error: &ImportError) {
        self.append_line(&format!(
            "{} fail severity={:?} locations={} err={}",
            unix_ts(),
            severity,
            ctx.locations.display(),
            error
        ));
    }

    fn on_alert(&self, ctx: &ImportContext, severity: ImportSeverity, error: &ImportError) {
        self.append_line(&format!(
            "{} ALERT severity={:?} locations={} err={}",
            unix_ts(),
            severity,
            ctx.locations.display(),
            error
        ));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
