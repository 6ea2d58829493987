//! Materialization tasks and their results
//!
//! A [`MaterializationTask`] is created by the planner and consumed exactly
//! once by the copier, which turns it into a [`MaterializationResult`].

use std::fmt;
use std::path::{Path, PathBuf};

use crate::bundle::{EntryKind, LogicalPath};
use crate::error::AssetError;

/// One planned copy or mkdir
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializationTask {
    /// Logical path inside the bundle, as reported by the bundle
    ///
    /// Kept raw so that a malformed name reaches the copier and is rejected
    /// there instead of silently disappearing from the run.
    pub source_path: String,

    /// `mount_root` joined with the logical path
    pub destination_path: PathBuf,

    pub kind: EntryKind,
}

impl MaterializationTask {
    /// Build a task for a validated logical path
    pub fn new(path: &LogicalPath, mount_root: &Path, kind: EntryKind) -> Self {
        Self {
            source_path: path.as_str().to_string(),
            destination_path: path.to_fs_path(mount_root),
            kind,
        }
    }

    /// Build a task for a raw name that did not validate
    ///
    /// The destination is the naive join; the copier re-validates the source
    /// path before touching it.
    pub(crate) fn unchecked(raw_path: String, mount_root: &Path, kind: EntryKind) -> Self {
        let destination_path = mount_root.join(&raw_path);
        Self {
            source_path: raw_path,
            destination_path,
            kind,
        }
    }
}

impl fmt::Display for MaterializationTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            EntryKind::Directory => write!(f, "mkdir {}", self.source_path),
            EntryKind::File => write!(f, "copy {}", self.source_path),
        }
    }
}

/// What happened to a task
#[derive(Debug)]
pub enum Outcome {
    Copied,
    Skipped,
    Failed(AssetError),
}

impl Outcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Copied => "copied",
            Outcome::Skipped => "skipped",
            Outcome::Failed(_) => "failed",
        }
    }
}

/// A task paired with its outcome
#[derive(Debug)]
pub struct MaterializationResult {
    pub task: MaterializationTask,
    pub outcome: Outcome,
}

impl MaterializationResult {
    pub fn new(task: MaterializationTask, outcome: Outcome) -> Self {
        Self { task, outcome }
    }
}
