//! Bundle backed by a tar archive, plain or zstd-compressed
//!
//! The archive is scanned once at open to build an entry index that records
//! where each file's data starts in the tar stream. For a plain tar `open`
//! seeks straight to it. A zstd stream can not be seeked, so `open` starts a
//! fresh decoder and discards decoded bytes up to the offset. No file data is
//! held in memory.

use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use super::index::EntryIndex;
use super::{BundleReader, EntryKind, LogicalPath};
use crate::error::{self, Result};

/// Container compression of an archive bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    None,
    Zstd,
}

impl Compression {
    /// Detect the compression from a file name (`.tar`, `.tar.zst`, `.tzst`)
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?.to_ascii_lowercase();
        if name.ends_with(".tar.zst") || name.ends_with(".tzst") {
            Some(Compression::Zstd)
        } else if name.ends_with(".tar") {
            Some(Compression::None)
        } else {
            None
        }
    }
}

/// Location of a file's data in the (decompressed) tar stream
#[derive(Debug, Clone, Copy)]
struct Payload {
    offset: u64,
    len: u64,
}

/// A tar archive opened as a bundle
#[derive(Debug)]
pub struct ArchiveBundle {
    path: PathBuf,
    compression: Compression,
    index: EntryIndex<Payload>,
}

impl ArchiveBundle {
    /// Open and index the archive at `path`
    ///
    /// Entries whose path would escape the archive root make the whole
    /// archive invalid (`ArchiveCorrupt`). Symlinks, hard links and special
    /// files are ignored.
    pub fn open(path: &Path, compression: Compression) -> Result<Self> {
        let file = File::open(path)
            .map_err(|e| error::bundle::open_failed(path.display().to_string(), e.to_string()))?;

        let index = match compression {
            Compression::None => index_archive(path, BufReader::new(file))?,
            Compression::Zstd => {
                let decoder = zstd::stream::read::Decoder::new(file).map_err(|e| {
                    error::bundle::open_failed(path.display().to_string(), e.to_string())
                })?;
                index_archive(path, decoder)?
            }
        };

        log::debug!(
            "indexed {} entries from {} ({:?})",
            index.len(),
            path.display(),
            compression
        );

        Ok(Self {
            path: path.to_path_buf(),
            compression,
            index,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn compression(&self) -> Compression {
        self.compression
    }
}

fn index_archive<R: Read>(path: &Path, reader: R) -> Result<EntryIndex<Payload>> {
    let corrupt =
        |reason: String| error::bundle::archive_corrupt(path.display().to_string(), reason);

    let mut archive = tar::Archive::new(reader);
    let mut index = EntryIndex::new();

    for entry in archive.entries().map_err(|e| corrupt(e.to_string()))? {
        let entry = entry.map_err(|e| corrupt(e.to_string()))?;
        let raw = entry
            .path()
            .map_err(|e| corrupt(e.to_string()))?
            .to_string_lossy()
            .into_owned();
        let logical =
            LogicalPath::parse(&raw).map_err(|e| corrupt(format!("entry '{raw}': {e}")))?;
        let entry_type = entry.header().entry_type();

        if entry_type.is_dir() {
            if !logical.is_root() {
                index
                    .insert_dir(&logical)
                    .map_err(|e| corrupt(e.to_string()))?;
            }
        } else if entry_type.is_file() {
            let payload = Payload {
                offset: entry.raw_file_position(),
                len: entry.size(),
            };
            index
                .insert_file(&logical, payload)
                .map_err(|e| corrupt(e.to_string()))?;
        } else {
            log::debug!("skipping archive entry {raw}: {entry_type:?}");
        }
    }

    Ok(index)
}

impl BundleReader for ArchiveBundle {
    fn open(&self, path: &LogicalPath) -> Result<Box<dyn Read + '_>> {
        let Payload { offset, len } = *self.index.file(path)?;
        let read_failed = |e: io::Error| error::fs::read_failed(&self.path, &e);
        let mut file = File::open(&self.path).map_err(read_failed)?;

        match self.compression {
            Compression::None => {
                file.seek(SeekFrom::Start(offset)).map_err(read_failed)?;
                Ok(Box::new(BufReader::new(file.take(len))))
            }
            Compression::Zstd => {
                let mut decoder = zstd::stream::read::Decoder::new(file).map_err(read_failed)?;
                let skipped =
                    io::copy(&mut (&mut decoder).take(offset), &mut io::sink()).map_err(read_failed)?;
                if skipped < offset {
                    return Err(error::bundle::archive_corrupt(
                        self.path.display().to_string(),
                        format!("stream ends before entry '{path}'"),
                    ));
                }
                Ok(Box::new(decoder.take(len)))
            }
        }
    }

    fn list(&self, path: &LogicalPath) -> Result<Vec<String>> {
        Ok(self.index.children(path)?.to_vec())
    }

    fn kind(&self, path: &LogicalPath) -> Result<Option<EntryKind>> {
        Ok(self.index.kind(path))
    }

    fn describe(&self) -> String {
        format!("ArchiveBundle({})", self.path.display())
    }
}
