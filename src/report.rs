//! Run reports
//!
//! Aggregates the copier's results, plus the entries the planner found
//! already present, into counts the host can act on.

use std::fmt;
use std::path::PathBuf;

use miette::Diagnostic;
use serde::Serialize;

use crate::bundle::EntryKind;
use crate::planner::Placement;
use crate::task::{MaterializationResult, MaterializationTask, Outcome};

/// A task that failed, with its diagnostic
#[derive(Debug, Clone, Serialize)]
pub struct FailedEntry {
    pub logical_path: String,
    pub destination: PathBuf,
    pub reason: String,
    pub code: Option<String>,
}

/// One line of the per-entry listing
#[derive(Debug, Clone, Serialize)]
pub struct ReportEntry {
    pub logical_path: String,
    pub kind: EntryKind,
    pub outcome: &'static str,
}

/// Summary of a materialization run
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub total: usize,
    pub copied: usize,
    pub skipped: usize,
    pub failed: usize,
    /// Tasks never executed because the run was cancelled or timed out
    pub interrupted: usize,
    pub failures: Vec<FailedEntry>,
    pub entries: Vec<ReportEntry>,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a report from a plan's present entries and the copier's results
    ///
    /// `order` is the plan's placement sequence; entries are listed in that
    /// pre-order. `planned` is the number of tasks handed to the copier;
    /// anything without a result counts as interrupted.
    pub fn from_run(
        present: &[MaterializationTask],
        order: &[Placement],
        results: &[MaterializationResult],
        planned: usize,
    ) -> Self {
        let mut report = Self::new();
        let mut present_iter = present.iter();
        let mut result_iter = results.iter();
        for placement in order {
            match placement {
                Placement::Present => {
                    if let Some(task) = present_iter.next() {
                        report.record_present(task);
                    }
                }
                Placement::Task => {
                    if let Some(result) = result_iter.next() {
                        report.record(result);
                    }
                }
            }
        }
        report.interrupted = planned.saturating_sub(results.len());
        report.total += report.interrupted;
        report
    }

    /// Account for one executed task
    pub fn record(&mut self, result: &MaterializationResult) {
        self.total += 1;
        match &result.outcome {
            Outcome::Copied => self.copied += 1,
            Outcome::Skipped => self.skipped += 1,
            Outcome::Failed(err) => {
                self.failed += 1;
                self.failures.push(FailedEntry {
                    logical_path: result.task.source_path.clone(),
                    destination: result.task.destination_path.clone(),
                    reason: err.to_string(),
                    code: err.code().map(|c| c.to_string()),
                });
            }
        }
        self.entries.push(ReportEntry {
            logical_path: result.task.source_path.clone(),
            kind: result.task.kind,
            outcome: result.outcome.label(),
        });
    }

    /// Account for an entry the planner found already materialized
    pub fn record_present(&mut self, task: &MaterializationTask) {
        self.total += 1;
        self.skipped += 1;
        self.entries.push(ReportEntry {
            logical_path: task.source_path.clone(),
            kind: task.kind,
            outcome: Outcome::Skipped.label(),
        });
    }

    /// No failures and no interruption
    pub fn is_success(&self) -> bool {
        self.failed == 0 && self.interrupted == 0
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} entries: {} copied, {} skipped, {} failed",
            self.total, self.copied, self.skipped, self.failed
        )?;
        if self.interrupted > 0 {
            write!(f, ", {} interrupted", self.interrupted)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::LogicalPath;
    use crate::error;
    use std::path::Path;

    fn task(path: &str, kind: EntryKind) -> MaterializationTask {
        MaterializationTask::new(&LogicalPath::parse(path).unwrap(), Path::new("/mnt"), kind)
    }

    #[test]
    fn test_counts_and_failures() {
        let results = vec![
            MaterializationResult::new(task("data", EntryKind::Directory), Outcome::Copied),
            MaterializationResult::new(
                task("data/a.txt", EntryKind::File),
                Outcome::Failed(error::fs::destination_conflict(Path::new("/mnt/data/a.txt"))),
            ),
        ];
        let present = vec![task("data/b.txt", EntryKind::File)];
        let order = [Placement::Task, Placement::Task, Placement::Present];

        let report = RunReport::from_run(&present, &order, &results, 2);

        assert_eq!(report.total, 3);
        assert_eq!(report.copied, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.failed, 1);
        assert!(!report.is_success());
        assert_eq!(report.failures[0].logical_path, "data/a.txt");
        assert_eq!(
            report.failures[0].code.as_deref(),
            Some("assetmount::fs::destination_conflict")
        );
    }

    #[test]
    fn test_missing_results_are_interrupted() {
        let results = vec![MaterializationResult::new(
            task("data", EntryKind::Directory),
            Outcome::Copied,
        )];

        let order = [Placement::Task; 4];

        let report = RunReport::from_run(&[], &order, &results, 4);

        assert_eq!(report.interrupted, 3);
        assert_eq!(report.total, 4);
        assert!(!report.is_success());
        assert_eq!(
            report.to_string(),
            "4 entries: 1 copied, 0 skipped, 0 failed, 3 interrupted"
        );
    }

    #[test]
    fn test_entries_follow_plan_order() {
        let present = vec![
            task("data", EntryKind::Directory),
            task("data/sub", EntryKind::Directory),
        ];
        let results = vec![
            MaterializationResult::new(task("data/a.txt", EntryKind::File), Outcome::Copied),
            MaterializationResult::new(task("data/sub/b.txt", EntryKind::File), Outcome::Copied),
        ];
        let order = [
            Placement::Present,
            Placement::Task,
            Placement::Present,
            Placement::Task,
        ];

        let report = RunReport::from_run(&present, &order, &results, 2);

        let paths: Vec<_> = report.entries.iter().map(|e| e.logical_path.as_str()).collect();
        assert_eq!(paths, vec!["data", "data/a.txt", "data/sub", "data/sub/b.txt"]);
    }

    #[test]
    fn test_serializes_to_json() {
        let mut report = RunReport::new();
        report.record_present(&task("data", EntryKind::Directory));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["skipped"], 1);
        assert_eq!(json["entries"][0]["kind"], "directory");
        assert_eq!(json["entries"][0]["outcome"], "skipped");
    }
}
