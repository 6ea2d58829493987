use clap::Parser;

use super::{BundleArgs, MountArgs};
use assetmount::config::Overrides;

/// Arguments for the materialize command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Materialize the data subtree of an archive:\n    assetmount materialize -b assets.tar.zst -m files\n\n\
                  Materialize another subtree, skipping sources:\n    assetmount materialize -s levels -x '**/*.psd'\n\n\
                  Show the plan without writing:\n    assetmount materialize --dry-run\n\n\
                  Machine readable report:\n    assetmount materialize --json")]
pub struct MaterializeArgs {
    #[command(flatten)]
    pub bundle: BundleArgs,

    #[command(flatten)]
    pub mount: MountArgs,

    /// Bundle subtree to materialize (default: data)
    #[arg(long, short = 's')]
    pub subtree: Option<String>,

    /// Leave out entries matching this glob (repeatable)
    #[arg(long = "exclude", short = 'x', value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Stop copying after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Print the plan without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl MaterializeArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            bundle: self.bundle.bundle.clone(),
            subtree: self.subtree.clone(),
            mount: self.mount.mount.clone(),
            exclude: self.exclude.clone(),
            timeout_secs: self.timeout,
            ..Default::default()
        }
    }
}
