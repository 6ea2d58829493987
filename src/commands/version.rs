//! Version command implementation

use std::process::ExitCode;

use assetmount::error::Result;

/// Run version command
pub fn run() -> Result<ExitCode> {
    println!("assetmount {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Build info:");
    println!("  Rust version: {}", env!("CARGO_PKG_RUST_VERSION"));
    println!("  Profile: {}", build_profile());
    println!("  Bundle formats: directory, tar, tar.zst");

    Ok(ExitCode::SUCCESS)
}

fn build_profile() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    }
}
