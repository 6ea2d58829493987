//! Materialize command implementation
//!
//! Copies the configured bundle subtree into the mount root and prints the
//! run report.

use std::path::PathBuf;
use std::process::ExitCode;

use console::{Style, Term};
use serde::Serialize;

use assetmount::bundle::{EntryKind, open_bundle};
use assetmount::error::Result;
use assetmount::planner::Plan;
use assetmount::progress::{InteractiveProgressReporter, SilentProgressReporter};
use assetmount::report::RunReport;
use assetmount::{MaterializationTask, Materializer};

use crate::cli::MaterializeArgs;
use crate::commands::helpers::load_settings;

#[derive(Serialize)]
struct PlannedEntry<'a> {
    logical_path: &'a str,
    destination: &'a PathBuf,
    kind: EntryKind,
}

#[derive(Serialize)]
struct PlanOutput<'a> {
    tasks: Vec<PlannedEntry<'a>>,
    present: usize,
}

/// Run materialize command
pub fn run(config: Option<PathBuf>, args: MaterializeArgs) -> Result<ExitCode> {
    let settings = load_settings(config.as_deref(), args.overrides())?;
    let bundle = open_bundle(&settings.bundle)?;
    let mount_root = settings.mount_root()?;

    let mut materializer =
        Materializer::new(bundle.as_ref(), mount_root).with_exclusions(settings.exclusions.clone());
    if let Some(timeout) = settings.timeout {
        materializer = materializer.with_timeout(timeout);
    }

    if args.dry_run {
        let plan = materializer.plan(&settings.subtree)?;
        print_plan(&plan, args.json)?;
        return Ok(ExitCode::SUCCESS);
    }

    let report = if args.json || !Term::stderr().is_term() {
        materializer.run_with_progress(&settings.subtree, &mut SilentProgressReporter)?
    } else {
        materializer.run_with_progress(&settings.subtree, &mut InteractiveProgressReporter::new())?
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn planned(task: &MaterializationTask) -> PlannedEntry<'_> {
    PlannedEntry {
        logical_path: &task.source_path,
        destination: &task.destination_path,
        kind: task.kind,
    }
}

fn print_plan(plan: &Plan, json: bool) -> Result<()> {
    if json {
        let output = PlanOutput {
            tasks: plan.tasks.iter().map(planned).collect(),
            present: plan.present.len(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if plan.is_up_to_date() {
        println!(
            "{} ({} entries present)",
            Style::new().green().apply_to("Up to date"),
            plan.present.len()
        );
        return Ok(());
    }

    for task in &plan.tasks {
        println!("  {task}");
    }
    println!();
    println!(
        "{} to create, {} already present",
        Style::new().bold().apply_to(plan.tasks.len()),
        plan.present.len()
    );
    Ok(())
}

fn print_report(report: &RunReport) {
    let style = if report.is_success() {
        Style::new().green()
    } else {
        Style::new().red()
    };
    println!("{}", style.apply_to(report));

    if !report.failures.is_empty() {
        println!();
        println!("{}", Style::new().bold().apply_to("Failed:"));
        for failure in &report.failures {
            println!(
                "  {} {}",
                Style::new().red().apply_to(&failure.logical_path),
                Style::new().dim().apply_to(&failure.reason)
            );
        }
    }

    if report.interrupted > 0 {
        println!();
        println!(
            "{}",
            Style::new()
                .yellow()
                .apply_to("Run stopped early; run again to copy the remaining entries.")
        );
    }
}
