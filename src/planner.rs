//! Materialization planning
//!
//! Walks a bundle subtree and works out which directories and files are
//! missing under the mount root. The walk uses an explicit stack, so bundle
//! depth never translates into call-stack depth, and it is pre-order: a
//! directory's task always precedes the tasks of its children. Children are
//! visited in exactly the order [`BundleReader::list`] returns them.

use std::path::Path;

use crate::bundle::{BundleReader, EntryKind, LogicalPath};
use crate::error::{self, Result};
use crate::exclude::Exclusions;
use crate::task::MaterializationTask;

/// Planner output
#[derive(Debug, Default)]
pub struct Plan {
    /// Tasks to execute, in pre-order
    pub tasks: Vec<MaterializationTask>,

    /// Entries already present under the mount root, in pre-order
    pub present: Vec<MaterializationTask>,

    /// Pre-order of the whole walk: which list each entry went to
    pub order: Vec<Placement>,
}

/// Where the planner put an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Task,
    Present,
}

impl Plan {
    /// Number of bundle entries covered by the plan
    pub fn total(&self) -> usize {
        self.tasks.len() + self.present.len()
    }

    /// True when nothing needs to be written
    pub fn is_up_to_date(&self) -> bool {
        self.tasks.is_empty()
    }

    fn push_task(&mut self, task: MaterializationTask) {
        self.tasks.push(task);
        self.order.push(Placement::Task);
    }

    fn push_present(&mut self, task: MaterializationTask) {
        self.present.push(task);
        self.order.push(Placement::Present);
    }
}

enum Pending {
    Entry(LogicalPath, EntryKind),
    /// Listed by its parent but unknown to `kind`
    Unlisted(LogicalPath),
    Malformed(String),
}

/// Computes the minimal set of tasks for a bundle subtree
pub struct Planner<'a> {
    bundle: &'a dyn BundleReader,
    exclusions: Exclusions,
}

impl<'a> Planner<'a> {
    pub fn new(bundle: &'a dyn BundleReader) -> Self {
        Self {
            bundle,
            exclusions: Exclusions::default(),
        }
    }

    /// Leave out entries (and their subtrees) matching these globs
    pub fn with_exclusions(mut self, exclusions: Exclusions) -> Self {
        self.exclusions = exclusions;
        self
    }

    /// Plan the materialization of `subtree_root` into `mount_root`
    ///
    /// `subtree_root` of `""` plans the whole bundle; the root itself never
    /// gets a task. A subtree root missing from the bundle is `EntryNotFound`.
    /// Any listing failure aborts the plan: an incomplete plan is never
    /// returned.
    pub fn plan(&self, subtree_root: &str, mount_root: &Path) -> Result<Plan> {
        let root = LogicalPath::parse(subtree_root)?;
        let root_kind = self
            .bundle
            .kind(&root)?
            .ok_or_else(|| error::bundle::entry_not_found(root.as_str()))?;

        let mut plan = Plan::default();
        let mut stack = vec![Pending::Entry(root, root_kind)];

        while let Some(pending) = stack.pop() {
            let (path, kind) = match pending {
                Pending::Entry(path, kind) => (path, kind),
                Pending::Malformed(raw) => {
                    log::warn!("bundle entry with invalid path: {raw}");
                    plan.push_task(MaterializationTask::unchecked(
                        raw,
                        mount_root,
                        EntryKind::File,
                    ));
                    continue;
                }
                Pending::Unlisted(path) => {
                    log::warn!("bundle lists {path} but has no such entry");
                    plan.push_task(MaterializationTask::new(&path, mount_root, EntryKind::File));
                    continue;
                }
            };

            if self.exclusions.is_excluded(&path) {
                log::debug!("exclude: {path}");
                continue;
            }

            if !path.is_root() {
                let task = MaterializationTask::new(&path, mount_root, kind);
                if is_materialized(&task) {
                    plan.push_present(task);
                } else {
                    plan.push_task(task);
                }
            }

            if kind.is_dir() {
                let children = self.children(&path)?;
                stack.extend(children.into_iter().rev());
            }
        }

        log::debug!(
            "plan for '{}' from {}: {} to do, {} present",
            subtree_root,
            self.bundle.describe(),
            plan.tasks.len(),
            plan.present.len()
        );

        Ok(plan)
    }

    fn children(&self, dir: &LogicalPath) -> Result<Vec<Pending>> {
        let names = self.bundle.list(dir)?;
        let mut children = Vec::with_capacity(names.len());

        for name in names {
            match dir.join(&name) {
                Ok(child) => match self.bundle.kind(&child)? {
                    Some(kind) => children.push(Pending::Entry(child, kind)),
                    None => children.push(Pending::Unlisted(child)),
                },
                Err(_) if dir.is_root() => children.push(Pending::Malformed(name)),
                Err(_) => children.push(Pending::Malformed(format!("{dir}/{name}"))),
            }
        }

        Ok(children)
    }
}

/// A directory is only materialized as a directory; any existing file counts
///
/// A directory entry whose destination holds a file stays a task, so the
/// copier reports the conflict.
fn is_materialized(task: &MaterializationTask) -> bool {
    match task.kind {
        EntryKind::Directory => task.destination_path.is_dir(),
        EntryKind::File => task.destination_path.symlink_metadata().is_ok(),
    }
}

/// Plan with default settings
pub fn plan(bundle: &dyn BundleReader, subtree_root: &str, mount_root: &Path) -> Result<Plan> {
    Planner::new(bundle).plan(subtree_root, mount_root)
}
