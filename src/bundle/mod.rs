//! Read-only asset bundles
//!
//! A bundle is a packaged tree of files addressed by [`LogicalPath`].
//! Every backend implements [`BundleReader`]:
//! - [`DirBundle`]: a directory on disk
//! - [`MemoryBundle`]: files held in memory
//! - [`ArchiveBundle`]: a tar archive, plain or zstd-compressed
//!
//! [`open_bundle`] picks the backend for a path.

pub mod archive;
pub mod dir;
mod index;
pub mod memory;
pub mod path;

use std::io::Read;
use std::path::Path;

use serde::Serialize;

use crate::error::{self, Result};

pub use archive::{ArchiveBundle, Compression};
pub use dir::DirBundle;
pub use memory::MemoryBundle;
pub use path::LogicalPath;

/// Kind of a bundle entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

impl EntryKind {
    pub fn is_dir(self) -> bool {
        self == EntryKind::Directory
    }

    pub fn label(self) -> &'static str {
        match self {
            EntryKind::File => "file",
            EntryKind::Directory => "dir",
        }
    }
}

/// A single entry of a bundle, produced per query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleEntry {
    pub logical_path: LogicalPath,
    pub kind: EntryKind,
}

/// Read-only access to a packaged bundle
///
/// `kind` answers existence explicitly: `Ok(None)` means the path is not in
/// the bundle, while `Err` is a genuine read failure and must never be taken
/// as "this is a directory".
pub trait BundleReader: Send + Sync {
    /// Open a file entry for reading
    ///
    /// Fails with `EntryNotFound` for missing paths and `IsADirectory` for
    /// directory entries.
    fn open(&self, path: &LogicalPath) -> Result<Box<dyn Read + '_>>;

    /// List the child names of a directory entry, in the backend's order
    ///
    /// Fails with `EntryNotFound` or `NotADirectory`.
    fn list(&self, path: &LogicalPath) -> Result<Vec<String>>;

    /// Look up the kind of an entry
    fn kind(&self, path: &LogicalPath) -> Result<Option<EntryKind>>;

    /// Human readable name for logs
    fn describe(&self) -> String;

    /// Look up an entry, failing with `EntryNotFound` when absent
    fn entry(&self, path: &LogicalPath) -> Result<BundleEntry> {
        match self.kind(path)? {
            Some(kind) => Ok(BundleEntry {
                logical_path: path.clone(),
                kind,
            }),
            None => Err(error::bundle::entry_not_found(path.as_str())),
        }
    }

    /// Read a whole file entry into memory
    fn read_all(&self, path: &LogicalPath) -> Result<Vec<u8>> {
        let mut reader = self.open(path)?;
        let mut buf = Vec::new();
        reader
            .read_to_end(&mut buf)
            .map_err(|e| error::bundle::open_failed(path.as_str(), e.to_string()))?;
        Ok(buf)
    }
}

/// Open the bundle at `path`, choosing the backend from what is on disk
///
/// Directories become a [`DirBundle`]; `.tar` files a plain [`ArchiveBundle`];
/// `.tar.zst` and `.tzst` files a zstd-compressed one.
pub fn open_bundle(path: &Path) -> Result<Box<dyn BundleReader>> {
    if !path.exists() {
        return Err(error::bundle::not_found(path.display().to_string()));
    }

    if path.is_dir() {
        return Ok(Box::new(DirBundle::new(path)));
    }

    match Compression::from_path(path) {
        Some(compression) => Ok(Box::new(ArchiveBundle::open(path, compression)?)),
        None => Err(error::bundle::unsupported(path.display().to_string())),
    }
}
