//! Per-task outcomes aggregated into a run summary

use std::time::Duration;

/// How one bundle task settled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    Built { elapsed: Duration },
    Failed { cause: String },
    TimedOut { after: Duration },
}

impl TaskOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Built { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskReport {
    pub output_file: String,
    pub outcome: TaskOutcome,
}

/// Settled tasks of one application, in completion order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppReport {
    pub app: String,
    pub tasks: Vec<TaskReport>,
    pub elapsed: Duration,
}

impl AppReport {
    /// Report for an application with nothing to bundle
    pub fn empty(app: impl Into<String>) -> Self {
        Self {
            app: app.into(),
            tasks: Vec::new(),
            elapsed: Duration::ZERO,
        }
    }

    pub fn built(&self) -> usize {
        self.tasks.iter().filter(|t| t.outcome.is_success()).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &TaskReport> {
        self.tasks.iter().filter(|t| !t.outcome.is_success())
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }
}

/// Everything a run did, handed back to the caller to pick an exit code
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Apps in processing order
    pub apps: Vec<AppReport>,
    /// Concatenated output files, in write order
    pub concatenated: Vec<String>,
    /// Fail-fast stopped the run before every app was built
    pub aborted: bool,
}

impl RunSummary {
    pub fn built_count(&self) -> usize {
        self.apps.iter().map(AppReport::built).sum()
    }

    pub fn failed_count(&self) -> usize {
        self.apps.iter().map(|app| app.failures().count()).sum()
    }

    /// A run fails only when tasks failed and failures are fatal (CI)
    pub fn is_failure(&self, ci: bool) -> bool {
        ci && self.failed_count() > 0
    }
}
