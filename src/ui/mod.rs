//! UI/Progress presentation layer
//!
//! All user-facing output of a run goes through the [`BuildReporter`]
//! trait, so the orchestrator never prints directly:
//! - [`ConsoleReporter`]: colored lines plus a progress bar per application
//! - `SilentReporter`: no output, for tests

pub mod display;

use std::sync::Mutex;

use crate::orchestrator::report::{AppReport, RunSummary, TaskReport};
use crate::progress::BuildProgress;

/// Receives run events as they happen
pub trait BuildReporter: Send + Sync {
    fn mode(&self, production: bool);

    fn app_started(&self, app: &str, tasks: usize);

    /// Called once per task, in completion order
    fn task_finished(&self, app: &str, report: &TaskReport);

    fn app_finished(&self, report: &AppReport);

    fn concatenated(&self, output_file: &str);

    fn summary(&self, summary: &RunSummary);
}

/// Interactive reporter printing to stdout
#[derive(Default)]
pub struct ConsoleReporter {
    progress: Mutex<Option<BuildProgress>>,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self::default()
    }

    fn println(&self, line: &str) {
        match self.progress.lock() {
            Ok(guard) => match guard.as_ref() {
                Some(progress) => progress.println(line),
                None => println!("{line}"),
            },
            Err(_) => println!("{line}"),
        }
    }
}

impl BuildReporter for ConsoleReporter {
    fn mode(&self, production: bool) {
        self.println(&display::mode_line(production));
    }

    fn app_started(&self, app: &str, tasks: usize) {
        self.println(&display::app_header(app));
        if let Ok(mut guard) = self.progress.lock() {
            *guard = Some(BuildProgress::new(app, tasks as u64));
        }
    }

    fn task_finished(&self, _app: &str, report: &TaskReport) {
        self.println(&display::task_line(report));
        if let Ok(guard) = self.progress.lock() {
            if let Some(progress) = guard.as_ref() {
                progress.inc();
            }
        }
    }

    fn app_finished(&self, report: &AppReport) {
        if let Ok(mut guard) = self.progress.lock() {
            if let Some(progress) = guard.take() {
                progress.finish();
            }
        }
        println!("{}", display::done_line(report.elapsed));
    }

    fn concatenated(&self, output_file: &str) {
        self.println(&display::built_line(output_file));
    }

    fn summary(&self, summary: &RunSummary) {
        if let Some(line) = display::summary_line(summary) {
            println!("\n{line}");
        }
    }
}

/// Silent reporter
///
/// No-op implementation that does not display anything.
#[cfg(test)]
#[derive(Default)]
pub struct SilentReporter;

#[cfg(test)]
impl BuildReporter for SilentReporter {
    fn mode(&self, _production: bool) {}

    fn app_started(&self, _app: &str, _tasks: usize) {}

    fn task_finished(&self, _app: &str, _report: &TaskReport) {}

    fn app_finished(&self, _report: &AppReport) {}

    fn concatenated(&self, _output_file: &str) {}

    fn summary(&self, _summary: &RunSummary) {}
}
