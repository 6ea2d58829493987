//! Command helper utilities

use std::path::Path;

use assetmount::config::{self, ConfigFile, Overrides, Settings};
use assetmount::error::{self, Result};

/// Load the config file (if any) and merge command line overrides into it
pub fn load_settings(config_path: Option<&Path>, overrides: Overrides) -> Result<Settings> {
    let cwd = std::env::current_dir()
        .map_err(|e| error::fs::io_error(format!("Failed to get current directory: {e}")))?;

    let file = match config::discover(config_path, &cwd)? {
        Some(path) => Some(ConfigFile::load(&path)?),
        None => None,
    };

    Settings::resolve(file, overrides)
}
