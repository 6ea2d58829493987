use clap::Parser;

use super::{BundleArgs, MountArgs};
use assetmount::config::Overrides;

/// Arguments for the cat command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Print a file from the mount or the bundle:\n    assetmount cat data/levels/1.json\n\n\
                  Materialize it on first access:\n    assetmount cat data/levels/1.json --lazy")]
pub struct CatArgs {
    /// Logical file path
    pub path: String,

    #[command(flatten)]
    pub bundle: BundleArgs,

    #[command(flatten)]
    pub mount: MountArgs,

    /// Materialize the file under the mount root before reading it
    #[arg(long)]
    pub lazy: bool,
}

impl CatArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            bundle: self.bundle.bundle.clone(),
            mount: self.mount.mount.clone(),
            lazy: self.lazy,
            ..Default::default()
        }
    }
}
