//! Error type tests
//!
//! Tests for AssetError enum, its constructors and conversions.

#![allow(clippy::expect_used)]

use std::path::Path;

use miette::Diagnostic;

use crate::error::AssetError;
use crate::error::{bundle, config, fs, path};

macro_rules! test_error_contains {
    ($test_name:ident, $err:expr, $($contains:expr),+ $(,)?) => {
        #[test]
        fn $test_name() {
            let err = $err;
            let error_string = err.to_string();
            $(
                assert!(error_string.contains($contains),
                    "Error message should contain '{}', got: {}",
                    $contains,
                    error_string
                );
            )+
        }
    };
}

#[test]
fn test_error_display() {
    let err = AssetError::EntryNotFound {
        path: "data/missing.txt".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Entry not found in bundle: data/missing.txt"
    );
}

#[test]
fn test_error_code() {
    let err = path::traversal_rejected("../etc/passwd");
    assert_eq!(
        err.code().map(|c| c.to_string()),
        Some("assetmount::path::traversal_rejected".to_string())
    );
}

#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: AssetError = io_err.into();
    assert!(matches!(err, AssetError::IoError { .. }));
}

#[test]
fn test_yaml_error_conversion() {
    let parse_result: std::result::Result<serde_yaml::Value, _> =
        serde_yaml::from_str("invalid: yaml: content: [unclosed");
    let err: AssetError = parse_result.expect_err("yaml should not parse").into();
    assert!(matches!(err, AssetError::ConfigParseFailed { .. }));
}

#[test]
fn test_json_error_conversion() {
    let parse_result: std::result::Result<serde_json::Value, _> =
        serde_json::from_str("invalid json content");
    let err: AssetError = parse_result.expect_err("json should not parse").into();
    assert!(matches!(err, AssetError::IoError { .. }));
}

test_error_contains!(
    test_bundle_not_found,
    bundle::not_found("/assets.tar"),
    "Bundle not found",
    "/assets.tar"
);

test_error_contains!(
    test_unsupported_bundle,
    bundle::unsupported("assets.rar"),
    "Unsupported bundle format"
);

test_error_contains!(
    test_archive_corrupt,
    bundle::archive_corrupt("assets.tar", "unexpected EOF"),
    "Corrupt archive",
    "unexpected EOF"
);

test_error_contains!(
    test_not_a_directory,
    bundle::not_a_directory("data/a.txt"),
    "Not a directory"
);

test_error_contains!(
    test_is_a_directory,
    bundle::is_a_directory("data"),
    "Is a directory"
);

test_error_contains!(
    test_invalid_path,
    path::invalid("a\\b", "backslash in segment"),
    "Invalid logical path",
    "backslash"
);

test_error_contains!(
    test_destination_conflict,
    fs::destination_conflict(Path::new("/mnt/data")),
    "non-directory"
);

test_error_contains!(
    test_io_error,
    fs::io_error("disk full"),
    "IO error",
    "disk full"
);

test_error_contains!(
    test_config_not_found,
    config::not_found("assetmount.yaml"),
    "Configuration file not found"
);

test_error_contains!(
    test_config_invalid,
    config::invalid("mount root is required"),
    "Invalid configuration",
    "mount root"
);

#[test]
fn test_fs_constructors_keep_reason() {
    let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let err = fs::write_failed(Path::new("/mnt/a.txt"), &io_err);
    assert!(matches!(err, AssetError::FileWriteFailed { .. }));
    assert!(err.to_string().contains("denied"));

    let err = fs::dir_create_failed(Path::new("/mnt/sub"), &io_err);
    assert!(matches!(err, AssetError::DirCreateFailed { .. }));
}
