use clap::Parser;

use super::BundleArgs;
use assetmount::config::Overrides;

/// Arguments for the list command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  List the top level of the bundle:\n    assetmount list\n\n\
                  List a directory:\n    assetmount list data/textures")]
pub struct ListArgs {
    /// Logical directory path (default: bundle root)
    pub path: Option<String>,

    #[command(flatten)]
    pub bundle: BundleArgs,
}

impl ListArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            bundle: self.bundle.bundle.clone(),
            ..Default::default()
        }
    }
}
