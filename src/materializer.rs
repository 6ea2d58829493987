//! Materialize entry point
//!
//! Plans a bundle subtree against a mount root, runs the copier over the plan
//! and folds everything into a [`RunReport`]. Planning errors come back as
//! `Err`; per-entry failures live in the report.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::bundle::BundleReader;
use crate::cancel::CancelToken;
use crate::copier::Copier;
use crate::error::{self, Result};
use crate::exclude::Exclusions;
use crate::planner::{Plan, Planner};
use crate::progress::ProgressReporter;
use crate::report::RunReport;

/// Configurable materialization run
pub struct Materializer<'a> {
    bundle: &'a dyn BundleReader,
    mount_root: PathBuf,
    exclusions: Exclusions,
    cancel: Option<CancelToken>,
    timeout: Option<Duration>,
}

impl<'a> Materializer<'a> {
    pub fn new(bundle: &'a dyn BundleReader, mount_root: impl Into<PathBuf>) -> Self {
        Self {
            bundle,
            mount_root: mount_root.into(),
            exclusions: Exclusions::default(),
            cancel: None,
            timeout: None,
        }
    }

    pub fn with_exclusions(mut self, exclusions: Exclusions) -> Self {
        self.exclusions = exclusions;
        self
    }

    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Stop executing tasks once `timeout` has elapsed from the start of a run
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn mount_root(&self) -> &Path {
        &self.mount_root
    }

    /// Compute the plan without writing anything
    pub fn plan(&self, subtree_root: &str) -> Result<Plan> {
        Planner::new(self.bundle)
            .with_exclusions(self.exclusions.clone())
            .plan(subtree_root, &self.mount_root)
    }

    /// Plan and execute
    pub fn run(&self, subtree_root: &str) -> Result<RunReport> {
        self.execute(subtree_root, None)
    }

    /// Plan and execute, reporting each result to `progress`
    pub fn run_with_progress(
        &self,
        subtree_root: &str,
        progress: &mut dyn ProgressReporter,
    ) -> Result<RunReport> {
        self.execute(subtree_root, Some(progress))
    }

    fn execute(
        &self,
        subtree_root: &str,
        progress: Option<&mut dyn ProgressReporter>,
    ) -> Result<RunReport> {
        let started = Instant::now();

        let plan = self.plan(subtree_root)?;
        let planned = plan.tasks.len();

        fs::create_dir_all(&self.mount_root)
            .map_err(|e| error::fs::dir_create_failed(&self.mount_root, &e))?;

        let mut copier = Copier::new(self.bundle, &self.mount_root);
        if let Some(token) = &self.cancel {
            copier = copier.with_cancel_token(token.clone());
        }
        if let Some(timeout) = self.timeout {
            copier = copier.with_deadline(started + timeout);
        }

        let results = match progress {
            Some(progress) => copier.execute_with_progress(plan.tasks, progress),
            None => copier.execute(plan.tasks),
        };

        let report = RunReport::from_run(&plan.present, &plan.order, &results, planned);
        log::info!(
            "materialized '{}' from {} into {}: {}",
            subtree_root,
            self.bundle.describe(),
            self.mount_root.display(),
            report
        );
        Ok(report)
    }
}

/// Materialize `subtree_root` of `bundle` under `mount_root`
///
/// Missing directories and files are created; anything already present is
/// left untouched and reported as skipped.
pub fn materialize(
    bundle: &dyn BundleReader,
    subtree_root: &str,
    mount_root: &Path,
) -> Result<RunReport> {
    Materializer::new(bundle, mount_root).run(subtree_root)
}
