//! Mount root verification
//!
//! Compares a materialized tree against its bundle by BLAKE3 content hash.

use std::collections::HashSet;
use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;

use crate::bundle::{BundleReader, EntryKind, LogicalPath};
use crate::error::{self, Result};
use crate::exclude::Exclusions;
use crate::hash;

/// How a mounted entry compares to the bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VerifyStatus {
    Match,
    Modified,
    Missing,
    Extra,
}

impl VerifyStatus {
    pub fn label(self) -> &'static str {
        match self {
            VerifyStatus::Match => "match",
            VerifyStatus::Modified => "modified",
            VerifyStatus::Missing => "missing",
            VerifyStatus::Extra => "extra",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VerifyEntry {
    pub logical_path: String,
    pub kind: EntryKind,
    pub status: VerifyStatus,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct VerifyReport {
    pub entries: Vec<VerifyEntry>,
}

impl VerifyReport {
    pub fn count(&self, status: VerifyStatus) -> usize {
        self.entries.iter().filter(|e| e.status == status).count()
    }

    /// Every bundle entry matches and nothing extra is mounted
    pub fn is_clean(&self) -> bool {
        self.entries.iter().all(|e| e.status == VerifyStatus::Match)
    }

    /// Entries that are not a match
    pub fn problems(&self) -> impl Iterator<Item = &VerifyEntry> {
        self.entries
            .iter()
            .filter(|e| e.status != VerifyStatus::Match)
    }
}

impl fmt::Display for VerifyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} entries: {} match, {} modified, {} missing, {} extra",
            self.entries.len(),
            self.count(VerifyStatus::Match),
            self.count(VerifyStatus::Modified),
            self.count(VerifyStatus::Missing),
            self.count(VerifyStatus::Extra)
        )
    }
}

/// Verifies a mount root against a bundle subtree
pub struct Verifier<'a> {
    bundle: &'a dyn BundleReader,
    mount_root: PathBuf,
    exclusions: Exclusions,
}

impl<'a> Verifier<'a> {
    pub fn new(bundle: &'a dyn BundleReader, mount_root: impl Into<PathBuf>) -> Self {
        Self {
            bundle,
            mount_root: mount_root.into(),
            exclusions: Exclusions::default(),
        }
    }

    /// Excluded entries are neither expected nor reported as extra
    pub fn with_exclusions(mut self, exclusions: Exclusions) -> Self {
        self.exclusions = exclusions;
        self
    }

    pub fn verify(&self, subtree_root: &str) -> Result<VerifyReport> {
        let root = LogicalPath::parse(subtree_root)?;
        let root_kind = self
            .bundle
            .kind(&root)?
            .ok_or_else(|| error::bundle::entry_not_found(root.as_str()))?;

        let mut report = VerifyReport::default();
        let mut seen = HashSet::new();
        let mut stack = vec![(root.clone(), root_kind)];

        while let Some((path, kind)) = stack.pop() {
            if self.exclusions.is_excluded(&path) {
                continue;
            }

            if !path.is_root() {
                let status = self.compare(&path, kind)?;
                report.entries.push(VerifyEntry {
                    logical_path: path.as_str().to_string(),
                    kind,
                    status,
                });
            }

            if kind.is_dir() {
                let names = self.bundle.list(&path)?;
                let mut children = Vec::with_capacity(names.len());
                for name in names {
                    let Ok(child) = path.join(&name) else {
                        log::warn!("skipping bundle entry with invalid name: {path}/{name}");
                        continue;
                    };
                    match self.bundle.kind(&child)? {
                        Some(child_kind) => children.push((child, child_kind)),
                        None => log::warn!("bundle lists {child} but has no such entry"),
                    }
                }
                stack.extend(children.into_iter().rev());
            }

            seen.insert(path.as_str().to_string());
        }

        if root_kind.is_dir() {
            self.find_extra(&root, &seen, &mut report)?;
        }

        log::debug!("verify '{subtree_root}': {report}");
        Ok(report)
    }

    fn compare(&self, path: &LogicalPath, kind: EntryKind) -> Result<VerifyStatus> {
        let local = path.to_fs_path(&self.mount_root);
        let Ok(meta) = local.symlink_metadata() else {
            return Ok(VerifyStatus::Missing);
        };

        let status = match kind {
            EntryKind::Directory if local.is_dir() => VerifyStatus::Match,
            EntryKind::File if meta.is_file() || local.is_file() => {
                let local_hash = hash::hash_file(&local)?;
                let reader = self.bundle.open(path)?;
                let bundle_hash = hash::hash_reader(reader)
                    .map_err(|e| error::bundle::open_failed(path.as_str(), e.to_string()))?;
                if local_hash == bundle_hash {
                    VerifyStatus::Match
                } else {
                    VerifyStatus::Modified
                }
            }
            _ => VerifyStatus::Modified,
        };
        Ok(status)
    }

    /// Walk the mounted subtree for entries the bundle does not have
    fn find_extra(
        &self,
        root: &LogicalPath,
        seen: &HashSet<String>,
        report: &mut VerifyReport,
    ) -> Result<()> {
        let local_root = root.to_fs_path(&self.mount_root);
        if !local_root.is_dir() {
            return Ok(());
        }

        let mut walker = WalkDir::new(&local_root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter();

        while let Some(entry) = walker.next() {
            let entry = entry.map_err(|e| {
                error::fs::io_error(format!("failed to walk {}: {e}", local_root.display()))
            })?;
            let Some(logical) = self.logical_path_of(entry.path()) else {
                continue;
            };
            if seen.contains(logical.as_str()) {
                continue;
            }

            let is_dir = entry.file_type().is_dir();
            if is_dir {
                walker.skip_current_dir();
            }
            if self.exclusions.is_excluded(&logical) {
                continue;
            }

            report.entries.push(VerifyEntry {
                logical_path: logical.as_str().to_string(),
                kind: if is_dir {
                    EntryKind::Directory
                } else {
                    EntryKind::File
                },
                status: VerifyStatus::Extra,
            });
        }
        Ok(())
    }

    fn logical_path_of(&self, local: &Path) -> Option<LogicalPath> {
        let relative = local.strip_prefix(&self.mount_root).ok()?;
        let segments: Vec<String> = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        LogicalPath::parse(&segments.join("/")).ok()
    }
}

/// Verify `subtree_root` of `bundle` against `mount_root`
pub fn verify(
    bundle: &dyn BundleReader,
    subtree_root: &str,
    mount_root: &Path,
) -> Result<VerifyReport> {
    Verifier::new(bundle, mount_root).verify(subtree_root)
}
