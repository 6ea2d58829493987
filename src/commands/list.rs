//! List command implementation
//!
//! Prints the children of a bundle directory with their kinds.

use std::path::PathBuf;
use std::process::ExitCode;

use console::Style;

use assetmount::bundle::{BundleReader, EntryKind, LogicalPath, open_bundle};
use assetmount::error::Result;

use crate::cli::ListArgs;
use crate::commands::helpers::load_settings;

/// Run list command
pub fn run(config: Option<PathBuf>, args: ListArgs) -> Result<ExitCode> {
    let settings = load_settings(config.as_deref(), args.overrides())?;
    let bundle = open_bundle(&settings.bundle)?;
    let path = LogicalPath::parse(args.path.as_deref().unwrap_or(""))?;

    list_entries(bundle.as_ref(), &path)?;
    Ok(ExitCode::SUCCESS)
}

fn list_entries(bundle: &dyn BundleReader, dir: &LogicalPath) -> Result<()> {
    let names = bundle.list(dir)?;
    if names.is_empty() {
        println!("{}", Style::new().dim().apply_to("(empty)"));
        return Ok(());
    }

    for name in names {
        let child = dir.join(&name)?;
        match bundle.kind(&child)? {
            Some(EntryKind::Directory) => {
                println!("dir   {}/", Style::new().bold().cyan().apply_to(&name));
            }
            Some(EntryKind::File) => println!("file  {name}"),
            None => log::warn!("listed entry vanished: {child}"),
        }
    }
    Ok(())
}
