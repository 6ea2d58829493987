//! Effective run settings

use std::path::{Path, PathBuf};
use std::time::Duration;

use super::{ConfigFile, DEFAULT_SUBTREE};
use crate::error::{self, Result};
use crate::exclude::Exclusions;

/// Values given on the command line (or through the environment)
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub bundle: Option<PathBuf>,
    pub subtree: Option<String>,
    pub mount: Option<PathBuf>,
    pub exclude: Vec<String>,
    pub lazy: bool,
    pub timeout_secs: Option<u64>,
}

/// Config file merged with overrides
#[derive(Debug, Clone)]
pub struct Settings {
    pub bundle: PathBuf,
    pub subtree: String,
    mount: Option<PathBuf>,
    pub exclusions: Exclusions,
    pub lazy: bool,
    pub timeout: Option<Duration>,
}

impl Settings {
    /// Merge `file` with `overrides`
    ///
    /// Overrides win for single values; exclude patterns from both are
    /// combined. A bundle is required.
    pub fn resolve(file: Option<ConfigFile>, overrides: Overrides) -> Result<Self> {
        let file = file.unwrap_or_default();

        let bundle = overrides.bundle.or(file.bundle).ok_or_else(|| {
            error::config::invalid(
                "no bundle configured; pass --bundle or set `bundle` in assetmount.yaml",
            )
        })?;

        let mut patterns = file.exclude;
        patterns.extend(overrides.exclude);

        Ok(Self {
            bundle,
            subtree: overrides
                .subtree
                .or(file.subtree)
                .unwrap_or_else(|| DEFAULT_SUBTREE.to_string()),
            mount: overrides.mount.or(file.mount),
            exclusions: Exclusions::new(patterns)?,
            lazy: overrides.lazy || file.lazy,
            timeout: overrides
                .timeout_secs
                .or(file.timeout_secs)
                .map(Duration::from_secs),
        })
    }

    /// Mount root; required by every command that touches the mount
    pub fn mount_root(&self) -> Result<&Path> {
        self.mount.as_deref().ok_or_else(|| {
            error::config::invalid(
                "no mount root configured; pass --mount or set `mount` in assetmount.yaml",
            )
        })
    }
}
