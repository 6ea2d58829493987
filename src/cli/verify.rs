use clap::Parser;

use super::{BundleArgs, MountArgs};
use assetmount::config::Overrides;

/// Arguments for the verify command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Check the mount against the bundle:\n    assetmount verify\n\n\
                  Machine readable output:\n    assetmount verify --json")]
pub struct VerifyArgs {
    #[command(flatten)]
    pub bundle: BundleArgs,

    #[command(flatten)]
    pub mount: MountArgs,

    /// Bundle subtree to verify (default: data)
    #[arg(long, short = 's')]
    pub subtree: Option<String>,

    /// Ignore entries matching this glob (repeatable)
    #[arg(long = "exclude", short = 'x', value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl VerifyArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            bundle: self.bundle.bundle.clone(),
            subtree: self.subtree.clone(),
            mount: self.mount.mount.clone(),
            exclude: self.exclude.clone(),
            ..Default::default()
        }
    }
}
