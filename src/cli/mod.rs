//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - materialize: Materialize command arguments
//! - list: List command arguments
//! - cat: Cat command arguments
//! - verify: Verify command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub mod cat;
pub mod completions;
pub mod list;
pub mod materialize;
pub mod verify;

pub use cat::CatArgs;
pub use completions::CompletionsArgs;
pub use list::ListArgs;
pub use materialize::MaterializeArgs;
pub use verify::VerifyArgs;

/// assetmount - present a read-only asset bundle as a writable directory tree
#[derive(Parser, Debug)]
#[command(
    name = "assetmount",
    author,
    version,
    color = clap::ColorChoice::Auto,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Incrementally materialize asset bundles into a writable directory",
    long_about = "assetmount copies a subtree of a read-only asset bundle (a directory, a .tar or a \
                  .tar.zst archive) into a mount root, creating only what is missing. Re-runs \
                  are cheap and never overwrite local files.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  assetmount materialize -b assets.tar.zst -m files   \x1b[90m# Copy the data subtree\x1b[0m\n   \
                  assetmount materialize --dry-run                    \x1b[90m# Show what would be copied\x1b[0m\n   \
                  assetmount list data/textures                       \x1b[90m# Browse the bundle\x1b[0m\n   \
                  assetmount cat data/levels/1.json --lazy            \x1b[90m# Read through the mount\x1b[0m\n   \
                  assetmount verify                                   \x1b[90m# Compare mount and bundle\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Configuration file (defaults to ./assetmount.yaml)
    #[arg(long, short = 'c', global = true, env = "ASSETMOUNT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Copy missing bundle entries into the mount root
    Materialize(MaterializeArgs),

    /// List the children of a bundle directory
    List(ListArgs),

    /// Print a file, preferring its materialized copy
    Cat(CatArgs),

    /// Compare the mount root against the bundle
    Verify(VerifyArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Bundle selection shared by commands
#[derive(Args, Debug, Clone, Default)]
pub struct BundleArgs {
    /// Bundle directory or .tar / .tar.zst archive
    #[arg(long, short = 'b', env = "ASSETMOUNT_BUNDLE")]
    pub bundle: Option<PathBuf>,
}

/// Mount root selection shared by commands
#[derive(Args, Debug, Clone, Default)]
pub struct MountArgs {
    /// Mount root directory
    #[arg(long, short = 'm', env = "ASSETMOUNT_MOUNT")]
    pub mount: Option<PathBuf>,
}
