//! In-memory entry index shared by the memory and archive backends

use std::collections::HashMap;

use super::{EntryKind, LogicalPath};
use crate::error::{self, Result};

#[derive(Debug)]
enum Node<T> {
    Dir(Vec<String>),
    File(T),
}

/// Tree of entries keyed by logical path
///
/// Parent directories are created implicitly when a file is inserted.
/// Children keep their insertion order.
#[derive(Debug)]
pub(crate) struct EntryIndex<T> {
    nodes: HashMap<LogicalPath, Node<T>>,
}

impl<T> EntryIndex<T> {
    pub fn new() -> Self {
        let mut nodes = HashMap::new();
        nodes.insert(LogicalPath::root(), Node::Dir(Vec::new()));
        Self { nodes }
    }

    /// Insert a directory (and its missing parents)
    pub fn insert_dir(&mut self, path: &LogicalPath) -> Result<()> {
        match self.nodes.get(path) {
            Some(Node::Dir(_)) => Ok(()),
            Some(Node::File(_)) => Err(error::bundle::not_a_directory(path.as_str())),
            None => {
                self.link_to_parent(path)?;
                self.nodes.insert(path.clone(), Node::Dir(Vec::new()));
                Ok(())
            }
        }
    }

    /// Insert a file; a later insert for the same path replaces the payload
    pub fn insert_file(&mut self, path: &LogicalPath, payload: T) -> Result<()> {
        if path.is_root() {
            return Err(error::bundle::is_a_directory(path.as_str()));
        }
        match self.nodes.get_mut(path) {
            Some(Node::Dir(_)) => Err(error::bundle::is_a_directory(path.as_str())),
            Some(Node::File(existing)) => {
                *existing = payload;
                Ok(())
            }
            None => {
                self.link_to_parent(path)?;
                self.nodes.insert(path.clone(), Node::File(payload));
                Ok(())
            }
        }
    }

    fn link_to_parent(&mut self, path: &LogicalPath) -> Result<()> {
        let (Some(parent), Some(name)) = (path.parent(), path.file_name()) else {
            return Ok(());
        };
        let name = name.to_string();
        self.insert_dir(&parent)?;
        if let Some(Node::Dir(children)) = self.nodes.get_mut(&parent) {
            children.push(name);
        }
        Ok(())
    }

    pub fn kind(&self, path: &LogicalPath) -> Option<EntryKind> {
        self.nodes.get(path).map(|node| match node {
            Node::Dir(_) => EntryKind::Directory,
            Node::File(_) => EntryKind::File,
        })
    }

    pub fn children(&self, path: &LogicalPath) -> Result<&[String]> {
        match self.nodes.get(path) {
            Some(Node::Dir(children)) => Ok(children),
            Some(Node::File(_)) => Err(error::bundle::not_a_directory(path.as_str())),
            None => Err(error::bundle::entry_not_found(path.as_str())),
        }
    }

    pub fn file(&self, path: &LogicalPath) -> Result<&T> {
        match self.nodes.get(path) {
            Some(Node::File(payload)) => Ok(payload),
            Some(Node::Dir(_)) => Err(error::bundle::is_a_directory(path.as_str())),
            None => Err(error::bundle::entry_not_found(path.as_str())),
        }
    }

    /// Number of entries, excluding the root
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AssetError;

    fn lp(s: &str) -> LogicalPath {
        LogicalPath::parse(s).unwrap()
    }

    #[test]
    fn test_insert_file_creates_parents_in_order() {
        let mut index = EntryIndex::new();
        index.insert_file(&lp("data/z.txt"), 1).unwrap();
        index.insert_file(&lp("data/sub/b.txt"), 2).unwrap();
        index.insert_file(&lp("data/a.txt"), 3).unwrap();

        assert_eq!(index.children(&LogicalPath::root()).unwrap(), ["data"]);
        assert_eq!(
            index.children(&lp("data")).unwrap(),
            ["z.txt", "sub", "a.txt"]
        );
        assert_eq!(index.kind(&lp("data/sub")), Some(EntryKind::Directory));
        assert_eq!(*index.file(&lp("data/sub/b.txt")).unwrap(), 2);
        assert_eq!(index.len(), 5);
    }

    #[test]
    fn test_reinsert_replaces_payload_without_duplicating() {
        let mut index = EntryIndex::new();
        index.insert_file(&lp("a.txt"), 1).unwrap();
        index.insert_file(&lp("a.txt"), 2).unwrap();
        index.insert_dir(&lp("d")).unwrap();
        index.insert_dir(&lp("d")).unwrap();

        assert_eq!(index.children(&LogicalPath::root()).unwrap(), ["a.txt", "d"]);
        assert_eq!(*index.file(&lp("a.txt")).unwrap(), 2);
    }

    #[test]
    fn test_file_dir_conflicts() {
        let mut index = EntryIndex::new();
        index.insert_file(&lp("a"), 1).unwrap();
        let err = index.insert_file(&lp("a/b"), 2).unwrap_err();
        assert!(matches!(err, AssetError::NotADirectory { .. }));

        index.insert_dir(&lp("d")).unwrap();
        let err = index.insert_file(&lp("d"), 3).unwrap_err();
        assert!(matches!(err, AssetError::IsADirectory { .. }));
    }

    #[test]
    fn test_lookup_errors() {
        let mut index = EntryIndex::new();
        index.insert_file(&lp("a"), 1).unwrap();
        assert!(matches!(
            index.children(&lp("a")).unwrap_err(),
            AssetError::NotADirectory { .. }
        ));
        assert!(matches!(
            index.file(&lp("missing")).unwrap_err(),
            AssetError::EntryNotFound { .. }
        ));
        assert_eq!(index.kind(&lp("missing")), None);
    }
}
