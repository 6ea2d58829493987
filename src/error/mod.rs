//! Error types and handling for assetmount
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Constructor helpers are grouped by error domain:
//! - [`bundle`]: Bundle and archive errors
//! - [`path`]: Logical path errors
//! - [`fs`]: File system errors
//! - [`config`]: Configuration errors

pub mod bundle;
pub mod config;
pub mod fs;
pub mod path;

#[cfg(test)]
mod tests;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for assetmount operations
#[derive(Error, Diagnostic, Debug)]
pub enum AssetError {
    // Bundle errors
    #[error("Bundle not found: {path}")]
    #[diagnostic(
        code(assetmount::bundle::not_found),
        help("Check the --bundle flag or the `bundle` key of assetmount.yaml")
    )]
    BundleNotFound { path: String },

    #[error("Unsupported bundle format: {path}")]
    #[diagnostic(
        code(assetmount::bundle::unsupported),
        help("Supported bundles: a directory, a .tar archive or a .tar.zst archive")
    )]
    UnsupportedBundle { path: String },

    #[error("Failed to open bundle '{path}': {reason}")]
    #[diagnostic(code(assetmount::bundle::open_failed))]
    BundleOpenFailed { path: String, reason: String },

    #[error("Corrupt archive '{path}': {reason}")]
    #[diagnostic(code(assetmount::bundle::archive_corrupt))]
    ArchiveCorrupt { path: String, reason: String },

    // Entry errors
    #[error("Entry not found in bundle: {path}")]
    #[diagnostic(code(assetmount::entry::not_found))]
    EntryNotFound { path: String },

    #[error("Not a directory: {path}")]
    #[diagnostic(code(assetmount::entry::not_a_directory))]
    NotADirectory { path: String },

    #[error("Is a directory: {path}")]
    #[diagnostic(code(assetmount::entry::is_a_directory))]
    IsADirectory { path: String },

    // Path errors
    #[error("Path escapes the mount root: {path}")]
    #[diagnostic(
        code(assetmount::path::traversal_rejected),
        help("Logical paths may not contain '..' segments")
    )]
    TraversalRejected { path: String },

    #[error("Invalid logical path '{path}': {reason}")]
    #[diagnostic(code(assetmount::path::invalid))]
    InvalidPath { path: String, reason: String },

    // File system errors
    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(assetmount::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(assetmount::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("Failed to create directory: {path}: {reason}")]
    #[diagnostic(code(assetmount::fs::dir_create_failed))]
    DirCreateFailed { path: String, reason: String },

    #[error("Destination occupied by a non-directory: {path}")]
    #[diagnostic(
        code(assetmount::fs::destination_conflict),
        help("Remove the conflicting file and run again")
    )]
    DestinationConflict { path: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(assetmount::fs::io_error))]
    IoError { message: String },

    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(code(assetmount::config::not_found))]
    ConfigNotFound { path: String },

    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(assetmount::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}")]
    #[diagnostic(code(assetmount::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(assetmount::config::invalid))]
    ConfigInvalid { message: String },
}

impl From<std::io::Error> for AssetError {
    fn from(err: std::io::Error) -> Self {
        AssetError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for AssetError {
    fn from(err: serde_yaml::Error) -> Self {
        AssetError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for AssetError {
    fn from(err: serde_json::Error) -> Self {
        AssetError::IoError {
            message: format!("JSON serialization failed: {err}"),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, AssetError>;
