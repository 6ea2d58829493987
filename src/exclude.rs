//! Glob exclusions for bundle entries

use wax::{CandidatePath, Glob, Pattern};

use crate::bundle::LogicalPath;
use crate::error::{self, Result};

/// A compiled set of glob patterns matched against logical paths
#[derive(Debug, Clone, Default)]
pub struct Exclusions {
    patterns: Vec<String>,
    globs: Vec<Glob<'static>>,
}

impl Exclusions {
    /// Validate and collect patterns; an invalid glob is a config error
    pub fn new<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns: Vec<String> = patterns.into_iter().map(Into::into).collect();
        let globs = patterns
            .iter()
            .map(|pattern| {
                Glob::new(pattern).map(Glob::into_owned).map_err(|e| {
                    error::config::invalid(format!("invalid exclude pattern '{pattern}': {e}"))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns, globs })
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Whether any pattern matches the logical path
    pub fn is_excluded(&self, path: &LogicalPath) -> bool {
        if path.is_root() {
            return false;
        }
        let candidate = CandidatePath::from(path.as_str());
        self.globs
            .iter()
            .any(|glob| glob.matched(&candidate).is_some())
    }
}
