//! Bundle and archive errors

use super::AssetError;

/// Creates a bundle not found error
pub fn not_found(path: impl Into<String>) -> AssetError {
    AssetError::BundleNotFound { path: path.into() }
}

/// Creates an unsupported bundle format error
pub fn unsupported(path: impl Into<String>) -> AssetError {
    AssetError::UnsupportedBundle { path: path.into() }
}

/// Creates a bundle open failure
pub fn open_failed(path: impl Into<String>, reason: impl Into<String>) -> AssetError {
    AssetError::BundleOpenFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a corrupt archive error
pub fn archive_corrupt(path: impl Into<String>, reason: impl Into<String>) -> AssetError {
    AssetError::ArchiveCorrupt {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an entry not found error
pub fn entry_not_found(path: impl Into<String>) -> AssetError {
    AssetError::EntryNotFound { path: path.into() }
}

/// Creates a not-a-directory error
pub fn not_a_directory(path: impl Into<String>) -> AssetError {
    AssetError::NotADirectory { path: path.into() }
}

/// Creates an is-a-directory error
pub fn is_a_directory(path: impl Into<String>) -> AssetError {
    AssetError::IsADirectory { path: path.into() }
}
