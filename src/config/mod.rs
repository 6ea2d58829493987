//! Configuration file handling for assetmount
//!
//! - `assetmount.yaml` - run settings ([`ConfigFile`])
//! - [`Settings`] - the file merged with command line overrides

pub mod settings;

use std::path::{Path, PathBuf};

use normpath::PathExt;
use serde::{Deserialize, Serialize};

use crate::error::{self, Result};

pub use settings::{Overrides, Settings};

/// Config file name looked up in the current directory
pub const CONFIG_FILE_NAME: &str = "assetmount.yaml";

/// Default bundle subtree
pub const DEFAULT_SUBTREE: &str = "data";

/// Contents of `assetmount.yaml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Bundle directory or archive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle: Option<PathBuf>,

    /// Bundle subtree to materialize
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtree: Option<String>,

    /// Mount root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mount: Option<PathBuf>,

    /// Globs of logical paths to leave out
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,

    /// Materialize on first access when resolving paths
    #[serde(default)]
    pub lazy: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl ConfigFile {
    /// Parse configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document is a config with every key unset
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Serialize configuration to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Load a config file; relative `bundle` and `mount` paths are resolved
    /// against the file's directory
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| error::config::read_failed(path.display().to_string(), e.to_string()))?;
        let mut config = Self::from_yaml(&content).map_err(|e| {
            error::config::parse_failed(path.display().to_string(), e.to_string())
        })?;

        let base = path.parent().unwrap_or(Path::new("."));
        config.bundle = config.bundle.map(|p| resolve_relative(base, &p));
        config.mount = config.mount.map(|p| resolve_relative(base, &p));

        log::debug!("loaded config {}", path.display());
        Ok(config)
    }
}

/// Find the config file to use
///
/// An explicit path must exist. Otherwise `assetmount.yaml` in `cwd`, then
/// `assetmount/config.yaml` in the user config directory; `None` when
/// neither exists.
pub fn discover(explicit: Option<&Path>, cwd: &Path) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(error::config::not_found(path.display().to_string()));
        }
        return Ok(Some(path.to_path_buf()));
    }

    let local = cwd.join(CONFIG_FILE_NAME);
    if local.is_file() {
        return Ok(Some(local));
    }

    Ok(dirs::config_dir()
        .map(|dir| dir.join("assetmount").join("config.yaml"))
        .filter(|path| path.is_file()))
}

/// Join `path` onto `base` unless absolute, normalizing when it exists
pub(crate) fn resolve_relative(base: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };
    joined
        .normalize()
        .map(|np| np.into_path_buf())
        .unwrap_or(joined)
}
