//! Verify command implementation
//!
//! Compares the mount root against the bundle and lists every entry that
//! does not match.

use std::path::PathBuf;
use std::process::ExitCode;

use console::Style;

use assetmount::Verifier;
use assetmount::bundle::open_bundle;
use assetmount::error::Result;
use assetmount::verify::{VerifyReport, VerifyStatus};

use crate::cli::VerifyArgs;
use crate::commands::helpers::load_settings;

/// Run verify command
pub fn run(config: Option<PathBuf>, args: VerifyArgs) -> Result<ExitCode> {
    let settings = load_settings(config.as_deref(), args.overrides())?;
    let bundle = open_bundle(&settings.bundle)?;
    let mount_root = settings.mount_root()?;

    let report = Verifier::new(bundle.as_ref(), mount_root)
        .with_exclusions(settings.exclusions.clone())
        .verify(&settings.subtree)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(if report.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_report(report: &VerifyReport) {
    for entry in report.problems() {
        let style = match entry.status {
            VerifyStatus::Modified => Style::new().yellow(),
            VerifyStatus::Missing => Style::new().red(),
            VerifyStatus::Extra => Style::new().cyan(),
            VerifyStatus::Match => Style::new(),
        };
        let label = format!("{:<9}", entry.status.label());
        println!("  {}{}", style.apply_to(label), entry.logical_path);
    }

    if report.is_clean() {
        println!("{}", Style::new().green().apply_to(report));
    } else {
        println!();
        println!("{}", Style::new().bold().apply_to(report));
    }
}
