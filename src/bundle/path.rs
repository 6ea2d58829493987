//! Logical bundle paths
//!
//! Bundle entries are addressed by slash-separated paths relative to the
//! bundle root. A [`LogicalPath`] is always normalized (no empty or `.`
//! segments) and never contains `..`, so joining it onto a mount root can
//! not escape that root.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{self, Result};

/// A validated, normalized logical path inside a bundle
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct LogicalPath(String);

impl LogicalPath {
    /// The bundle root (empty path)
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Parse and normalize a logical path
    ///
    /// Rejects `..` segments with `TraversalRejected`, and segments
    /// containing a backslash or NUL with `InvalidPath`.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut segments = Vec::new();
        for segment in raw.split('/') {
            match segment {
                "" | "." => {}
                ".." => return Err(error::path::traversal_rejected(raw)),
                s if s.contains('\\') => {
                    return Err(error::path::invalid(raw, "backslash in segment"));
                }
                s if s.contains('\0') => {
                    return Err(error::path::invalid(raw, "NUL byte in segment"));
                }
                s => segments.push(s),
            }
        }
        Ok(Self(segments.join("/")))
    }

    /// Join a child name (or relative path) onto this path
    pub fn join(&self, name: &str) -> Result<Self> {
        let child = Self::parse(name)?;
        if child.is_root() {
            return Err(error::path::invalid(name, "empty child name"));
        }
        if self.is_root() {
            return Ok(child);
        }
        Ok(Self(format!("{}/{}", self.0, child.0)))
    }

    /// Parent path, `None` for the root
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        match self.0.rfind('/') {
            Some(idx) => Some(Self(self.0[..idx].to_string())),
            None => Some(Self::root()),
        }
    }

    /// Last segment, `None` for the root
    pub fn file_name(&self) -> Option<&str> {
        if self.is_root() {
            return None;
        }
        self.0.rsplit('/').next()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate over the path segments
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }

    /// Whether `self` is `other` or lies below it
    pub fn starts_with(&self, other: &LogicalPath) -> bool {
        other.is_root()
            || self.0 == other.0
            || (self.0.starts_with(&other.0) && self.0.as_bytes().get(other.0.len()) == Some(&b'/'))
    }

    /// Map this path onto a filesystem root, one segment at a time
    pub fn to_fs_path(&self, root: &Path) -> PathBuf {
        let mut path = root.to_path_buf();
        for segment in self.segments() {
            path.push(segment);
        }
        path
    }
}

impl fmt::Display for LogicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LogicalPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AssetError;

    #[test]
    fn test_parse_normalizes_segments() {
        let path = LogicalPath::parse("./data//sub/./b.txt").unwrap();
        assert_eq!(path.as_str(), "data/sub/b.txt");
    }

    #[test]
    fn test_parse_leading_slash_stays_relative() {
        let path = LogicalPath::parse("/data/a.txt").unwrap();
        assert_eq!(path.as_str(), "data/a.txt");
        assert_eq!(
            path.to_fs_path(Path::new("/mnt")),
            PathBuf::from("/mnt/data/a.txt")
        );
    }

    #[test]
    fn test_parse_rejects_parent_segments() {
        for raw in ["..", "../x", "data/../../x", "data/.."] {
            let err = LogicalPath::parse(raw).unwrap_err();
            assert!(
                matches!(err, AssetError::TraversalRejected { .. }),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_rejects_backslash() {
        let err = LogicalPath::parse("data\\..\\x").unwrap_err();
        assert!(matches!(err, AssetError::InvalidPath { .. }));
    }

    #[test]
    fn test_root() {
        let root = LogicalPath::parse("").unwrap();
        assert!(root.is_root());
        assert_eq!(root, LogicalPath::root());
        assert_eq!(root.parent(), None);
        assert_eq!(root.file_name(), None);
    }

    #[test]
    fn test_join_and_parent() {
        let data = LogicalPath::parse("data").unwrap();
        let file = data.join("sub/b.txt").unwrap();
        assert_eq!(file.as_str(), "data/sub/b.txt");
        assert_eq!(file.file_name(), Some("b.txt"));
        assert_eq!(file.parent().unwrap().as_str(), "data/sub");
        assert_eq!(data.parent(), Some(LogicalPath::root()));
        assert_eq!(LogicalPath::root().join("a").unwrap().as_str(), "a");
    }

    #[test]
    fn test_join_rejects_escape_and_empty() {
        let data = LogicalPath::parse("data").unwrap();
        assert!(data.join("..").is_err());
        assert!(data.join("").is_err());
    }

    #[test]
    fn test_starts_with() {
        let data = LogicalPath::parse("data").unwrap();
        assert!(LogicalPath::parse("data/a").unwrap().starts_with(&data));
        assert!(data.starts_with(&data));
        assert!(!LogicalPath::parse("database").unwrap().starts_with(&data));
        assert!(data.starts_with(&LogicalPath::root()));
    }
}
