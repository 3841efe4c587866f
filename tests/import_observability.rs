use std::sync::{Arc, Mutex};

use destination_import::ImportError;
use destination_import::ingestion::{
    CompositeObserver, FileObserver, ImportContext, ImportObserver, ImportSeverity, ImportStats,
};
use destination_import::pipeline::{ImportOptions, run_import};
use destination_import::types::Issue;

#[derive(Default)]
struct RecordingObserver {
    issues: Mutex<Vec<String>>,
    quote_lines: Mutex<Vec<usize>>,
    successes: Mutex<Vec<ImportStats>>,
    failures: Mutex<Vec<ImportSeverity>>,
    alerts: Mutex<Vec<ImportSeverity>>,
}

impl ImportObserver for RecordingObserver {
    fn on_issue(&self, _ctx: &ImportContext, issue: &Issue) {
        self.issues.lock().unwrap().push(issue.to_string());
    }

    fn on_quote_warning(&self, _ctx: &ImportContext, line: usize) {
        self.quote_lines.lock().unwrap().push(line);
    }

    fn on_success(&self, _ctx: &ImportContext, stats: ImportStats) {
        self.successes.lock().unwrap().push(stats);
    }

    fn on_failure(&self, _ctx: &ImportContext, severity: ImportSeverity, _error: &ImportError) {
        self.failures.lock().unwrap().push(severity);
    }

    fn on_alert(&self, _ctx: &ImportContext, severity: ImportSeverity, _error: &ImportError) {
        self.alerts.lock().unwrap().push(severity);
    }
}

fn options(obs: Arc<RecordingObserver>) -> ImportOptions {
    ImportOptions {
        observer: Some(obs),
        alert_at_or_above: ImportSeverity::Critical,
    }
}

#[test]
fn observer_sees_issues_then_success() {
    let dir = tempfile::tempdir().unwrap();
    let obs = Arc::new(RecordingObserver::default());

    run_import(
        "tests/fixtures/locations.csv",
        "tests/fixtures/gunlaws.csv",
        dir.path().join("out.json"),
        &options(obs.clone()),
    )
    .unwrap();

    assert_eq!(
        *obs.issues.lock().unwrap(),
        vec!["Round Rock, TX: missing population value".to_string()]
    );
    assert_eq!(
        *obs.successes.lock().unwrap(),
        vec![ImportStats { destinations: 2, issues: 1, gun_law_states: 2 }]
    );
    assert!(obs.failures.lock().unwrap().is_empty());
    assert!(obs.quote_lines.lock().unwrap().is_empty());
}

#[test]
fn unbalanced_quote_is_reported_but_row_still_parses() {
    let dir = tempfile::tempdir().unwrap();
    let locations = dir.path().join("locations.csv");
    std::fs::write(
        &locations,
        "State,City,Population,Density\nTX,Austin,974447,3100\nTX,\"Waco,1,2\n",
    )
    .unwrap();
    let obs = Arc::new(RecordingObserver::default());

    let report = run_import(
        &locations,
        "tests/fixtures/gunlaws.csv",
        dir.path().join("out.json"),
        &options(obs.clone()),
    )
    .unwrap();

    assert_eq!(*obs.quote_lines.lock().unwrap(), vec![3]);
    // The open quote swallows the rest of the line, so the row comes up short.
    assert_eq!(report.destinations.len(), 1);
    assert_eq!(
        report.issues,
        vec![Issue::ColumnCountMismatch { line: 3, expected: 4, found: 2 }]
    );
}

#[test]
fn missing_input_is_critical_and_alerts() {
    let dir = tempfile::tempdir().unwrap();
    let obs = Arc::new(RecordingObserver::default());

    let _ = run_import(
        "tests/fixtures/does_not_exist.csv",
        "tests/fixtures/gunlaws.csv",
        dir.path().join("out.json"),
        &options(obs.clone()),
    )
    .unwrap_err();

    assert_eq!(*obs.failures.lock().unwrap(), vec![ImportSeverity::Critical]);
    assert_eq!(*obs.alerts.lock().unwrap(), vec![ImportSeverity::Critical]);
    assert!(obs.successes.lock().unwrap().is_empty());
}

#[test]
fn empty_input_fails_without_alert() {
    let dir = tempfile::tempdir().unwrap();
    let locations = dir.path().join("locations.csv");
    std::fs::write(&locations, "").unwrap();
    let obs = Arc::new(RecordingObserver::default());

    let _ = run_import(
        &locations,
        "tests/fixtures/gunlaws.csv",
        dir.path().join("out.json"),
        &options(obs.clone()),
    )
    .unwrap_err();

    assert_eq!(*obs.failures.lock().unwrap(), vec![ImportSeverity::Error]);
    assert!(obs.alerts.lock().unwrap().is_empty());
}

#[test]
fn composite_fans_out_to_file_log() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("import.log");
    let recorder = Arc::new(RecordingObserver::default());
    let composite = CompositeObserver::new(vec![
        recorder.clone(),
        Arc::new(FileObserver::new(&log)),
    ]);

    run_import(
        "tests/fixtures/locations.csv",
        "tests/fixtures/gunlaws.csv",
        dir.path().join("out.json"),
        &ImportOptions {
            observer: Some(Arc::new(composite)),
            ..Default::default()
        },
    )
    .unwrap();

    assert_eq!(recorder.successes.lock().unwrap().len(), 1);
    let lines: Vec<String> = std::fs::read_to_string(&log)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("Round Rock, TX: missing population value"));
    assert!(lines[1].contains(" ok "));
    assert!(lines[1].ends_with("destinations=2 issues=1"));
}
