//! Command implementations for the assetmount CLI
//!
//! Each command returns the process exit code on success; errors are printed
//! by `main`.

pub mod cat;
pub mod completions;
pub mod helpers;
pub mod list;
pub mod materialize;
pub mod verify;
pub mod version;
