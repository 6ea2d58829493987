//! File system errors

use std::path::Path;

use super::AssetError;

/// Creates a file read error for `path`
pub fn read_failed(path: &Path, err: &std::io::Error) -> AssetError {
    AssetError::FileReadFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

/// Creates a file write error for `path`
pub fn write_failed(path: &Path, err: &std::io::Error) -> AssetError {
    AssetError::FileWriteFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

/// Creates a directory creation error for `path`
pub fn dir_create_failed(path: &Path, err: &std::io::Error) -> AssetError {
    AssetError::DirCreateFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

/// Creates a destination conflict error
pub fn destination_conflict(path: &Path) -> AssetError {
    AssetError::DestinationConflict {
        path: path.display().to_string(),
    }
}

/// Creates an IO error
pub fn io_error(message: impl Into<String>) -> AssetError {
    AssetError::IoError {
        message: message.into(),
    }
}
