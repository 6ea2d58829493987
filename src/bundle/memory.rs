//! Bundle held entirely in memory

use std::io::{Cursor, Read};

use super::index::EntryIndex;
use super::{BundleReader, EntryKind, LogicalPath};
use crate::error::Result;

/// An in-memory bundle built from `(path, bytes)` pairs
///
/// Parent directories are implied by file paths. `list` returns children in
/// insertion order.
#[derive(Debug)]
pub struct MemoryBundle {
    name: String,
    index: EntryIndex<Vec<u8>>,
}

impl MemoryBundle {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            index: EntryIndex::new(),
        }
    }

    /// Build a bundle from file entries
    pub fn from_files<P, B, I>(files: I) -> Result<Self>
    where
        P: AsRef<str>,
        B: Into<Vec<u8>>,
        I: IntoIterator<Item = (P, B)>,
    {
        let mut bundle = Self::new("memory");
        for (path, bytes) in files {
            bundle.add_file(path.as_ref(), bytes)?;
        }
        Ok(bundle)
    }

    /// Add (or replace) a file
    pub fn add_file(&mut self, path: &str, bytes: impl Into<Vec<u8>>) -> Result<()> {
        let path = LogicalPath::parse(path)?;
        self.index.insert_file(&path, bytes.into())
    }

    /// Add an empty directory
    pub fn add_dir(&mut self, path: &str) -> Result<()> {
        let path = LogicalPath::parse(path)?;
        self.index.insert_dir(&path)
    }

    /// Number of entries (files and directories)
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl BundleReader for MemoryBundle {
    fn open(&self, path: &LogicalPath) -> Result<Box<dyn Read + '_>> {
        let bytes = self.index.file(path)?;
        Ok(Box::new(Cursor::new(bytes.as_slice())))
    }

    fn list(&self, path: &LogicalPath) -> Result<Vec<String>> {
        Ok(self.index.children(path)?.to_vec())
    }

    fn kind(&self, path: &LogicalPath) -> Result<Option<EntryKind>> {
        Ok(self.index.kind(path))
    }

    fn describe(&self) -> String {
        format!("MemoryBundle({})", self.name)
    }
}
