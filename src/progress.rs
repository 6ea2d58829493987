//! Progress reporting for materialization runs
//!
//! The copier reports through the [`ProgressReporter`] trait so the CLI can
//! draw a bar while library callers and `--json` runs stay silent.

use indicatif::{ProgressBar, ProgressStyle};

use crate::task::MaterializationResult;

/// Progress reporter trait for materialization runs
pub trait ProgressReporter {
    /// Called once with the number of tasks about to run
    fn start(&mut self, total_tasks: u64);

    /// Called after each task
    fn on_result(&mut self, result: &MaterializationResult);

    /// Run completed
    fn finish(&mut self);

    /// Run interrupted
    fn abandon(&mut self);
}

/// Interactive progress reporter with an indicatif bar on stderr
pub struct InteractiveProgressReporter {
    pb: Option<ProgressBar>,
}

impl InteractiveProgressReporter {
    pub fn new() -> Self {
        Self { pb: None }
    }
}

impl Default for InteractiveProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for InteractiveProgressReporter {
    fn start(&mut self, total_tasks: u64) {
        let pb = ProgressBar::new(total_tasks);
        if let Ok(style) =
            ProgressStyle::default_bar().template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        self.pb = Some(pb);
    }

    fn on_result(&mut self, result: &MaterializationResult) {
        if let Some(ref pb) = self.pb {
            let path = &result.task.source_path;
            // Truncate long paths for display
            let display_path = if path.len() > 50 {
                let cut = (path.len() - 47..path.len())
                    .find(|&i| path.is_char_boundary(i))
                    .unwrap_or(path.len());
                format!("...{}", &path[cut..])
            } else {
                path.clone()
            };
            pb.set_message(display_path);
            pb.inc(1);
        }
    }

    fn finish(&mut self) {
        if let Some(ref pb) = self.pb {
            pb.finish_and_clear();
        }
    }

    fn abandon(&mut self) {
        if let Some(ref pb) = self.pb {
            pb.abandon();
        }
    }
}

/// Silent progress reporter for `--json` and dry runs
#[derive(Debug, Default)]
pub struct SilentProgressReporter;

impl ProgressReporter for SilentProgressReporter {
    fn start(&mut self, _total_tasks: u64) {}

    fn on_result(&mut self, _result: &MaterializationResult) {}

    fn finish(&mut self) {}

    fn abandon(&mut self) {}
}
