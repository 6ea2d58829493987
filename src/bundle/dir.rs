//! Bundle backed by a directory tree on disk

use std::fs::{self, File};
use std::io::{BufReader, ErrorKind, Read};
use std::path::{Path, PathBuf};

use super::{BundleReader, EntryKind, LogicalPath};
use crate::error::{self, Result};

/// A bundle rooted at a directory
///
/// Symlinks are followed. `list` sorts names byte-wise so enumeration does not
/// depend on the host filesystem's directory order.
#[derive(Debug, Clone)]
pub struct DirBundle {
    root: PathBuf,
}

impl DirBundle {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &LogicalPath) -> PathBuf {
        path.to_fs_path(&self.root)
    }
}

impl BundleReader for DirBundle {
    fn open(&self, path: &LogicalPath) -> Result<Box<dyn Read + '_>> {
        match self.kind(path)? {
            Some(EntryKind::File) => {}
            Some(EntryKind::Directory) => {
                return Err(error::bundle::is_a_directory(path.as_str()));
            }
            None => return Err(error::bundle::entry_not_found(path.as_str())),
        }

        let abs = self.resolve(path);
        let file = File::open(&abs).map_err(|e| error::fs::read_failed(&abs, &e))?;
        Ok(Box::new(BufReader::new(file)))
    }

    fn list(&self, path: &LogicalPath) -> Result<Vec<String>> {
        match self.kind(path)? {
            Some(EntryKind::Directory) => {}
            Some(EntryKind::File) => return Err(error::bundle::not_a_directory(path.as_str())),
            None => return Err(error::bundle::entry_not_found(path.as_str())),
        }

        let abs = self.resolve(path);
        let mut names = Vec::new();
        for entry in fs::read_dir(&abs).map_err(|e| error::fs::read_failed(&abs, &e))? {
            let entry = entry.map_err(|e| error::fs::read_failed(&abs, &e))?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }

    fn kind(&self, path: &LogicalPath) -> Result<Option<EntryKind>> {
        let abs = self.resolve(path);
        match fs::metadata(&abs) {
            Ok(meta) if meta.is_dir() => Ok(Some(EntryKind::Directory)),
            Ok(meta) if meta.is_file() => Ok(Some(EntryKind::File)),
            // Sockets, devices and the like are not bundle entries
            Ok(_) => Ok(None),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(error::fs::read_failed(&abs, &e)),
        }
    }

    fn describe(&self) -> String {
        format!("DirBundle({})", self.root.display())
    }
}
