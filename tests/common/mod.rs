//! Common test utilities for assetmount integration tests

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// A scratch directory holding bundles, mount roots and config files
pub struct TestWorkspace {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to workspace root
    pub path: PathBuf,
}

impl TestWorkspace {
    /// Create a new test workspace
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Write a file in workspace
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from workspace
    pub fn read_file(&self, path: &str) -> String {
        let file_path = self.path.join(path);
        std::fs::read_to_string(&file_path).expect("Failed to read file")
    }

    /// Check if a file exists in workspace
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Create a directory bundle under `bundles/<name>` holding `files`
    #[allow(dead_code)]
    pub fn create_dir_bundle(&self, name: &str, files: &[(&str, &str)]) -> PathBuf {
        let bundle_path = self.path.join("bundles").join(name);
        std::fs::create_dir_all(&bundle_path).expect("Failed to create bundle directory");
        for (path, content) in files {
            self.write_file(&format!("bundles/{name}/{path}"), content);
        }
        bundle_path
    }

    /// Create a tar archive bundle, zstd-compressed when `name` ends in `.zst`
    #[allow(dead_code)]
    pub fn create_tar_bundle(&self, name: &str, files: &[(&str, &str)]) -> PathBuf {
        let mut builder = tar::Builder::new(Vec::new());
        for (path, content) in files {
            let mut header = tar::Header::new_gnu();
            header.set_size(content.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder
                .append_data(&mut header, path, content.as_bytes())
                .expect("Failed to append archive entry");
        }
        let tar_bytes = builder.into_inner().expect("Failed to finish archive");

        let bytes = if name.ends_with(".zst") {
            zstd::encode_all(tar_bytes.as_slice(), 3).expect("Failed to compress archive")
        } else {
            tar_bytes
        };

        let bundle_path = self.path.join(name);
        std::fs::write(&bundle_path, bytes).expect("Failed to write archive");
        bundle_path
    }

    /// Write `assetmount.yaml` at the workspace root
    #[allow(dead_code)]
    pub fn write_config(&self, yaml: &str) -> PathBuf {
        self.write_file("assetmount.yaml", yaml);
        self.path.join("assetmount.yaml")
    }

    /// The assetmount binary, run from the workspace with a clean environment
    #[allow(dead_code)]
    pub fn cmd(&self) -> Command {
        let mut cmd = assetmount_cmd();
        cmd.current_dir(&self.path)
            .env_remove("ASSETMOUNT_BUNDLE")
            .env_remove("ASSETMOUNT_MOUNT")
            .env_remove("ASSETMOUNT_CONFIG")
            .env_remove("RUST_LOG")
            .env("HOME", &self.path)
            .env("XDG_CONFIG_HOME", self.path.join(".config"));
        cmd
    }

    /// Files below `dir`, relative and sorted
    #[allow(dead_code)]
    pub fn list_files(&self, dir: &str) -> Vec<String> {
        let root = self.path.join(dir);
        let mut files: Vec<String> = walkdir::WalkDir::new(&root)
            .min_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| relative(&root, e.path()))
            .collect();
        files.sort();
        files
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

fn relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
pub fn assetmount_cmd() -> Command {
    Command::cargo_bin("assetmount").unwrap()
}
