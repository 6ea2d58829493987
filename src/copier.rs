//! Incremental copier
//!
//! Executes planned tasks in order. Each task yields its own outcome; a
//! failing task never stops the run. Files are streamed into a temporary file
//! next to their destination and moved into place without clobbering, so a
//! destination path only ever holds a complete file.

use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::bundle::{BundleReader, EntryKind, LogicalPath};
use crate::cancel::CancelToken;
use crate::error::{self, Result};
use crate::progress::ProgressReporter;
use crate::task::{MaterializationResult, MaterializationTask, Outcome};

/// Executes materialization tasks against a mount root
pub struct Copier<'a> {
    bundle: &'a dyn BundleReader,
    mount_root: PathBuf,
    cancel: Option<CancelToken>,
    deadline: Option<Instant>,
}

impl<'a> Copier<'a> {
    pub fn new(bundle: &'a dyn BundleReader, mount_root: impl Into<PathBuf>) -> Self {
        Self {
            bundle,
            mount_root: mount_root.into(),
            cancel: None,
            deadline: None,
        }
    }

    /// Stop before the next task once `token` is cancelled
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Stop before the next task once `deadline` has passed
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Execute tasks in the given order
    ///
    /// Returns one result per executed task. When the run is interrupted the
    /// remaining tasks are not executed and have no result.
    pub fn execute(&self, tasks: Vec<MaterializationTask>) -> Vec<MaterializationResult> {
        self.run(tasks, None)
    }

    /// Execute tasks, reporting each result to `progress`
    pub fn execute_with_progress(
        &self,
        tasks: Vec<MaterializationTask>,
        progress: &mut dyn ProgressReporter,
    ) -> Vec<MaterializationResult> {
        self.run(tasks, Some(progress))
    }

    fn run(
        &self,
        tasks: Vec<MaterializationTask>,
        mut progress: Option<&mut dyn ProgressReporter>,
    ) -> Vec<MaterializationResult> {
        let total = tasks.len();
        if let Some(p) = progress.as_deref_mut() {
            p.start(total as u64);
        }

        let mut results = Vec::with_capacity(total);
        for task in tasks {
            if self.interrupted() {
                log::warn!(
                    "run interrupted, {} of {} tasks not executed",
                    total - results.len(),
                    total
                );
                if let Some(p) = progress.as_deref_mut() {
                    p.abandon();
                }
                return results;
            }

            let outcome = self.run_task(&task);
            if let Outcome::Failed(ref err) = outcome {
                log::warn!("failed: {}: {}", task.source_path, err);
            }

            let result = MaterializationResult::new(task, outcome);
            if let Some(p) = progress.as_deref_mut() {
                p.on_result(&result);
            }
            results.push(result);
        }

        if let Some(p) = progress.as_deref_mut() {
            p.finish();
        }
        results
    }

    fn interrupted(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelToken::is_cancelled)
            || self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    fn run_task(&self, task: &MaterializationTask) -> Outcome {
        let path = match self.checked_path(task) {
            Ok(path) => path,
            Err(e) => return Outcome::Failed(e),
        };

        let result = match task.kind {
            EntryKind::Directory => create_dir(&task.destination_path),
            EntryKind::File => {
                log::debug!(
                    "copy: {} -> {}",
                    task.source_path,
                    task.destination_path.display()
                );
                copy_file(self.bundle, &path, &task.destination_path)
            }
        };

        match result {
            Ok(true) => Outcome::Copied,
            Ok(false) => Outcome::Skipped,
            Err(e) => Outcome::Failed(e),
        }
    }

    /// Re-validate the task before any write
    ///
    /// The source path must be a valid logical path and the destination must
    /// be exactly that path under the mount root.
    fn checked_path(&self, task: &MaterializationTask) -> Result<LogicalPath> {
        let path = LogicalPath::parse(&task.source_path)?;
        if path.is_root() || path.to_fs_path(&self.mount_root) != task.destination_path {
            return Err(error::path::traversal_rejected(
                task.destination_path.display().to_string(),
            ));
        }
        Ok(path)
    }
}

/// Create a single directory; `Ok(false)` if it already exists
pub(crate) fn create_dir(dest: &Path) -> Result<bool> {
    log::debug!("mkdir: {}", dest.display());
    match fs::create_dir(dest) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            if dest.is_dir() {
                Ok(false)
            } else {
                Err(error::fs::destination_conflict(dest))
            }
        }
        Err(e) => Err(error::fs::dir_create_failed(dest, &e)),
    }
}

/// Stream a bundle file to `dest`; `Ok(false)` if `dest` already exists
///
/// The parent directory of `dest` must exist. Data goes to a temporary file
/// in that directory first, which is removed again if anything fails.
pub(crate) fn copy_file(bundle: &dyn BundleReader, path: &LogicalPath, dest: &Path) -> Result<bool> {
    if dest.symlink_metadata().is_ok() {
        return Ok(false);
    }

    let parent = dest
        .parent()
        .ok_or_else(|| error::fs::io_error(format!("no parent directory for {}", dest.display())))?;

    let mut source = bundle.open(path)?;
    let mut staged = tempfile::Builder::new()
        .prefix(".assetmount-")
        .suffix(".part")
        .tempfile_in(parent)
        .map_err(|e| error::fs::write_failed(dest, &e))?;

    io::copy(&mut source, staged.as_file_mut()).map_err(|e| error::fs::write_failed(dest, &e))?;
    drop(source);

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(staged.path(), fs::Permissions::from_mode(0o644))
            .map_err(|e| error::fs::write_failed(dest, &e))?;
    }

    match staged.persist_noclobber(dest) {
        Ok(_) => Ok(true),
        Err(e) if e.error.kind() == ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(error::fs::write_failed(dest, &e.error)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::MemoryBundle;
    use crate::error::AssetError;
    use crate::planner;
    use std::io::Read;
    use tempfile::TempDir;

    fn scenario_bundle() -> MemoryBundle {
        MemoryBundle::from_files([("data/a.txt", "hi"), ("data/sub/b.txt", "yo")]).unwrap()
    }

    fn labels(results: &[MaterializationResult]) -> Vec<&'static str> {
        results.iter().map(|r| r.outcome.label()).collect()
    }

    #[test]
    fn test_execute_scenario() {
        let temp = TempDir::new().unwrap();
        let bundle = scenario_bundle();
        let plan = planner::plan(&bundle, "data", temp.path()).unwrap();

        let results = Copier::new(&bundle, temp.path()).execute(plan.tasks);

        assert_eq!(labels(&results), vec!["copied"; 4]);
        assert_eq!(
            fs::read_to_string(temp.path().join("data/a.txt")).unwrap(),
            "hi"
        );
        assert_eq!(
            fs::read_to_string(temp.path().join("data/sub/b.txt")).unwrap(),
            "yo"
        );
    }

    #[test]
    fn test_reexecuting_same_tasks_skips() {
        let temp = TempDir::new().unwrap();
        let bundle = scenario_bundle();
        let plan = planner::plan(&bundle, "data", temp.path()).unwrap();
        let copier = Copier::new(&bundle, temp.path());

        copier.execute(plan.tasks.clone());
        let results = copier.execute(plan.tasks);

        assert_eq!(labels(&results), vec!["skipped"; 4]);
    }

    #[test]
    fn test_existing_file_is_not_overwritten() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("data")).unwrap();
        fs::write(temp.path().join("data/a.txt"), "local edit").unwrap();
        let bundle = scenario_bundle();
        let task = MaterializationTask::new(
            &LogicalPath::parse("data/a.txt").unwrap(),
            temp.path(),
            EntryKind::File,
        );

        let results = Copier::new(&bundle, temp.path()).execute(vec![task]);

        assert_eq!(labels(&results), vec!["skipped"]);
        assert_eq!(
            fs::read_to_string(temp.path().join("data/a.txt")).unwrap(),
            "local edit"
        );
    }

    #[test]
    fn test_directory_over_file_is_conflict() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("data"), "not a dir").unwrap();
        let bundle = scenario_bundle();
        let task = MaterializationTask::new(
            &LogicalPath::parse("data").unwrap(),
            temp.path(),
            EntryKind::Directory,
        );

        let results = Copier::new(&bundle, temp.path()).execute(vec![task]);

        assert!(matches!(
            results[0].outcome,
            Outcome::Failed(AssetError::DestinationConflict { .. })
        ));
    }

    #[test]
    fn test_failure_does_not_stop_run() {
        let temp = TempDir::new().unwrap();
        let bundle = MemoryBundle::from_files([
            ("data/a.txt", "a"),
            ("data/k/x.txt", "x"),
            ("data/c.txt", "c"),
        ])
        .unwrap();
        fs::create_dir(temp.path().join("data")).unwrap();
        fs::create_dir(temp.path().join("data/k")).unwrap();
        let plan = planner::plan(&bundle, "data", temp.path()).unwrap();
        // Occupy the directory with a file after planning
        fs::remove_dir(temp.path().join("data/k")).unwrap();
        fs::write(temp.path().join("data/k"), "blocker").unwrap();

        let results = Copier::new(&bundle, temp.path()).execute(plan.tasks);

        let failed: Vec<_> = results
            .iter()
            .filter(|r| r.outcome.is_failed())
            .map(|r| r.task.source_path.as_str())
            .collect();
        assert_eq!(failed, vec!["data/k/x.txt"]);
        assert_eq!(fs::read_to_string(temp.path().join("data/c.txt")).unwrap(), "c");
    }

    #[test]
    fn test_missing_parent_fails_without_creating_it() {
        let temp = TempDir::new().unwrap();
        let bundle = scenario_bundle();
        let task = MaterializationTask::new(
            &LogicalPath::parse("data/sub/b.txt").unwrap(),
            temp.path(),
            EntryKind::File,
        );

        let results = Copier::new(&bundle, temp.path()).execute(vec![task]);

        assert!(results[0].outcome.is_failed());
        assert!(!temp.path().join("data").exists());
    }

    #[test]
    fn test_traversal_task_is_rejected_before_write() {
        let temp = TempDir::new().unwrap();
        let mount = temp.path().join("mount");
        fs::create_dir(&mount).unwrap();
        let bundle = scenario_bundle();
        let tasks = vec![
            MaterializationTask::unchecked("../escape.txt".to_string(), &mount, EntryKind::File),
            MaterializationTask::unchecked("../escape".to_string(), &mount, EntryKind::Directory),
        ];

        let results = Copier::new(&bundle, &mount).execute(tasks);

        for result in &results {
            assert!(matches!(
                result.outcome,
                Outcome::Failed(AssetError::TraversalRejected { .. })
            ));
        }
        assert!(!temp.path().join("escape.txt").exists());
        assert!(!temp.path().join("escape").exists());
    }

    #[test]
    fn test_destination_outside_mount_is_rejected() {
        let temp = TempDir::new().unwrap();
        let bundle = scenario_bundle();
        let task = MaterializationTask {
            source_path: "data".to_string(),
            destination_path: temp.path().join("elsewhere"),
            kind: EntryKind::Directory,
        };

        let results = Copier::new(&bundle, temp.path().join("mount")).execute(vec![task]);

        assert!(matches!(
            results[0].outcome,
            Outcome::Failed(AssetError::TraversalRejected { .. })
        ));
        assert!(!temp.path().join("elsewhere").exists());
    }

    #[test]
    fn test_cancelled_token_stops_before_first_task() {
        let temp = TempDir::new().unwrap();
        let bundle = scenario_bundle();
        let plan = planner::plan(&bundle, "data", temp.path()).unwrap();
        let token = CancelToken::new();
        token.cancel();

        let results = Copier::new(&bundle, temp.path())
            .with_cancel_token(token)
            .execute(plan.tasks);

        assert!(results.is_empty());
        assert!(!temp.path().join("data").exists());
    }

    #[test]
    fn test_past_deadline_stops_run() {
        let temp = TempDir::new().unwrap();
        let bundle = scenario_bundle();
        let plan = planner::plan(&bundle, "data", temp.path()).unwrap();

        let results = Copier::new(&bundle, temp.path())
            .with_deadline(Instant::now())
            .execute(plan.tasks);

        assert!(results.is_empty());
    }

    /// Bundle whose file stream fails after a few bytes
    struct FlakyBundle;

    struct FailingReader {
        sent: bool,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.sent {
                return Err(io::Error::other("archive truncated"));
            }
            self.sent = true;
            buf[..3].copy_from_slice(b"abc");
            Ok(3)
        }
    }

    impl BundleReader for FlakyBundle {
        fn open(&self, _path: &LogicalPath) -> Result<Box<dyn Read + '_>> {
            Ok(Box::new(FailingReader { sent: false }))
        }

        fn list(&self, path: &LogicalPath) -> Result<Vec<String>> {
            Err(error::bundle::not_a_directory(path.as_str()))
        }

        fn kind(&self, _path: &LogicalPath) -> Result<Option<EntryKind>> {
            Ok(Some(EntryKind::File))
        }

        fn describe(&self) -> String {
            "FlakyBundle".to_string()
        }
    }

    #[test]
    fn test_partial_write_leaves_no_file_behind() {
        let temp = TempDir::new().unwrap();
        let task = MaterializationTask::new(
            &LogicalPath::parse("big.bin").unwrap(),
            temp.path(),
            EntryKind::File,
        );

        let results = Copier::new(&FlakyBundle, temp.path()).execute(vec![task]);

        assert!(results[0].outcome.is_failed());
        assert!(!temp.path().join("big.bin").exists());
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
    }
}
