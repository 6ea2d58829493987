//! Virtual path resolution
//!
//! Maps a logical asset path to whatever currently backs it: a materialized
//! local file when there is one, the live bundle entry otherwise. With lazy
//! materialization on, bundle entries are written under the mount root on
//! first access and the local path is returned instead.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::bundle::{BundleReader, EntryKind, LogicalPath};
use crate::copier;
use crate::error::{self, Result};

/// What a logical path resolved to
pub enum Resolved<'a> {
    /// A file or directory under the mount root
    Local(PathBuf),
    /// A stream straight from the bundle
    Bundle(Box<dyn Read + 'a>),
}

impl Resolved<'_> {
    pub fn is_local(&self) -> bool {
        matches!(self, Resolved::Local(_))
    }

    pub fn local_path(&self) -> Option<&Path> {
        match self {
            Resolved::Local(path) => Some(path),
            Resolved::Bundle(_) => None,
        }
    }
}

/// Resolves logical paths against a mount root and its bundle
pub struct Resolver<'a> {
    bundle: &'a dyn BundleReader,
    mount_root: PathBuf,
    lazy: bool,
}

impl<'a> Resolver<'a> {
    pub fn new(bundle: &'a dyn BundleReader, mount_root: impl Into<PathBuf>) -> Self {
        Self {
            bundle,
            mount_root: mount_root.into(),
            lazy: false,
        }
    }

    /// Materialize bundle entries on first access
    pub fn lazy(mut self, lazy: bool) -> Self {
        self.lazy = lazy;
        self
    }

    /// Resolve a logical path
    ///
    /// A materialized local entry always wins. A bundle directory with no
    /// local counterpart is `IsADirectory` unless lazy materialization is on.
    pub fn resolve(&self, raw: &str) -> Result<Resolved<'a>> {
        let bundle: &'a dyn BundleReader = self.bundle;
        let path = LogicalPath::parse(raw)?;
        let local = path.to_fs_path(&self.mount_root);
        if local.symlink_metadata().is_ok() {
            return Ok(Resolved::Local(local));
        }

        let kind = bundle
            .kind(&path)?
            .ok_or_else(|| error::bundle::entry_not_found(path.as_str()))?;

        match (kind, self.lazy) {
            (EntryKind::Directory, false) => Err(error::bundle::is_a_directory(path.as_str())),
            (EntryKind::File, false) => Ok(Resolved::Bundle(bundle.open(&path)?)),
            (EntryKind::Directory, true) => {
                self.ensure_dirs(&path)?;
                Ok(Resolved::Local(local))
            }
            (EntryKind::File, true) => {
                if let Some(parent) = path.parent() {
                    self.ensure_dirs(&parent)?;
                }
                log::debug!("lazy copy: {} -> {}", path, local.display());
                copier::copy_file(bundle, &path, &local)?;
                Ok(Resolved::Local(local))
            }
        }
    }

    /// Read the whole content of a file entry
    pub fn read(&self, raw: &str) -> Result<Vec<u8>> {
        match self.resolve(raw)? {
            Resolved::Local(local) => {
                if local.is_dir() {
                    return Err(error::bundle::is_a_directory(raw));
                }
                fs::read(&local).map_err(|e| error::fs::read_failed(&local, &e))
            }
            Resolved::Bundle(mut reader) => {
                let mut buf = Vec::new();
                reader
                    .read_to_end(&mut buf)
                    .map_err(|e| error::bundle::open_failed(raw, e.to_string()))?;
                Ok(buf)
            }
        }
    }

    /// Create `dir` and each of its ancestors under the mount root
    fn ensure_dirs(&self, dir: &LogicalPath) -> Result<()> {
        fs::create_dir_all(&self.mount_root)
            .map_err(|e| error::fs::dir_create_failed(&self.mount_root, &e))?;

        let mut current = LogicalPath::root();
        for segment in dir.segments() {
            current = current.join(segment)?;
            copier::create_dir(&current.to_fs_path(&self.mount_root))?;
        }
        Ok(())
    }
}
