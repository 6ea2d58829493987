//! Logical path errors

use super::AssetError;

/// Creates a traversal rejected error
pub fn traversal_rejected(path: impl Into<String>) -> AssetError {
    AssetError::TraversalRejected { path: path.into() }
}

/// Creates an invalid path error
pub fn invalid(path: impl Into<String>, reason: impl Into<String>) -> AssetError {
    AssetError::InvalidPath {
        path: path.into(),
        reason: reason.into(),
    }
}
