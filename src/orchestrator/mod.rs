//! Asset build orchestration
//!
//! A run goes through these steps:
//! 1. make sure `assets/js` and `assets/css` exist
//! 2. concatenate every `concat:` manifest entry of every application,
//!    whatever the mode
//! 3. bundle each application, one application after another, the tasks
//!    of one application concurrently (bounded by `jobs`)
//! 4. touch the completion marker
//!
//! Task failures never abort siblings. They are collected into a
//! [`RunSummary`]; under CI the first application with a failure stops the
//! run. Deciding the exit code is left to the caller.

pub mod concat;
pub mod report;


use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{Semaphore, mpsc};

use crate::bundler::Bundler;
use crate::common::fs::{ensure_dir, touch, write_atomic};
use crate::config::BuildConfig;
use crate::domain::{AssetKind, BuildTarget, BundleTask, InputOptions, OutputOptions};
use crate::error::{Result, config as config_error};
use crate::manifest::Manifest;
use crate::ui::BuildReporter;

pub use report::{AppReport, RunSummary, TaskOutcome, TaskReport};

/// Which applications a run covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildMode {
    All,
    App(String),
}

impl BuildMode {
    pub fn from_app(app: Option<String>) -> Self {
        app.map_or(Self::All, Self::App)
    }
}

pub struct Orchestrator {
    config: BuildConfig,
    bundler: Arc<dyn Bundler>,
    reporter: Arc<dyn BuildReporter>,
}

impl Orchestrator {
    pub fn new(
        config: BuildConfig,
        bundler: Arc<dyn Bundler>,
        reporter: Arc<dyn BuildReporter>,
    ) -> Self {
        Self {
            config,
            bundler,
            reporter,
        }
    }

    /// Full run for `mode`
    pub async fn run(&self, mode: &BuildMode) -> Result<RunSummary> {
        if let BuildMode::App(app) = mode {
            if !self.config.has_app(app) {
                return Err(config_error::unknown_app(app, &self.config.apps));
            }
        }

        self.reporter.mode(self.config.production);
        self.ensure_output_dirs()?;

        let concatenated = self.concatenate_files()?;

        let mut summary = match mode {
            BuildMode::All => self.build_all().await?,
            BuildMode::App(app) => RunSummary {
                apps: vec![self.build_app(app).await?],
                ..RunSummary::default()
            },
        };
        summary.concatenated = concatenated;

        self.touch_completion_marker()?;
        self.reporter.summary(&summary);
        Ok(summary)
    }

    /// Create `assets/js` and `assets/css` when missing
    ///
    /// Returns the directories created by this call.
    pub fn ensure_output_dirs(&self) -> Result<Vec<PathBuf>> {
        let mut created = Vec::new();
        for kind in AssetKind::ALL {
            let dir = self.config.assets_path.join(kind.dir_name());
            if ensure_dir(&dir)? {
                tracing::debug!(dir = %dir.display(), "created asset directory");
                created.push(dir);
            }
        }
        Ok(created)
    }

    /// Concatenation pass over every configured application
    pub fn concatenate_files(&self) -> Result<Vec<String>> {
        let mut written = Vec::new();
        for app in &self.config.apps {
            written.extend(self.concatenate_app(app)?);
        }
        Ok(written)
    }

    /// Concatenation pass over one application's manifest
    fn concatenate_app(&self, app: &str) -> Result<Vec<String>> {
        let layout = self.config.app_layout(app);
        let Some(manifest) = Manifest::load(&layout.manifest_path())? else {
            return Ok(Vec::new());
        };

        let mut written = Vec::new();
        for rule in manifest.concat_rules() {
            let content = concat::concatenate(&layout, rule)?;
            write_atomic(&self.config.asset_path(&rule.output_file), &content)?;
            self.reporter.concatenated(&rule.output_file);
            written.push(rule.output_file.clone());
        }
        Ok(written)
    }

    /// Bundle tasks of `app`, built fresh from its manifest
    pub fn resolve_target(&self, app: &str) -> Result<BuildTarget> {
        let layout = self.config.app_layout(app);
        let Some(manifest) = Manifest::load(&layout.manifest_path())? else {
            tracing::debug!(app = %layout.name, "no manifest, nothing to bundle");
            return Ok(BuildTarget::empty(app));
        };

        let tasks = manifest
            .bundle_entries()
            .map(|entry| BundleTask {
                app: app.to_string(),
                input: InputOptions {
                    entry_points: entry
                        .inputs
                        .iter()
                        .map(|input| layout.resolve_input(input))
                        .collect(),
                    working_dir: layout.app_path.clone(),
                    kind: entry.kind,
                },
                output: OutputOptions {
                    path: self.config.asset_path(&entry.output_file),
                    format: entry.kind.format(),
                },
                output_file: entry.output_file.clone(),
            })
            .collect();

        let target = BuildTarget {
            app: app.to_string(),
            tasks,
        };
        tracing::debug!(
            app = %target.app,
            tasks = target.tasks.len(),
            path = %layout.app_path.display(),
            "resolved bundle tasks"
        );
        Ok(target)
    }

    /// Run every bundle task of `app` concurrently and wait for all of them
    pub async fn build_app(&self, app: &str) -> Result<AppReport> {
        let target = self.resolve_target(app)?;
        if target.is_empty() {
            return Ok(AppReport::empty(app));
        }

        self.reporter.app_started(app, target.tasks.len());
        let start = Instant::now();
        let expected: Vec<String> = target.tasks.iter().map(|t| t.output_file.clone()).collect();

        let semaphore = Arc::new(Semaphore::new(self.config.jobs));
        let (tx, mut rx) = mpsc::unbounded_channel();
        for task in target.tasks {
            let bundler = Arc::clone(&self.bundler);
            let semaphore = Arc::clone(&semaphore);
            let tx = tx.clone();
            let timeout = self.config.timeout;
            tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await.ok();
                let report = run_task(bundler.as_ref(), &task, timeout).await;
                let _ = tx.send(report);
            });
        }
        drop(tx);

        let mut tasks = Vec::with_capacity(expected.len());
        while let Some(report) = rx.recv().await {
            if let TaskOutcome::Failed { cause } = &report.outcome {
                tracing::debug!(app, output = %report.output_file, %cause, "bundle task failed");
            }
            self.reporter.task_finished(app, &report);
            tasks.push(report);
        }

        // A task that panicked dropped its sender without reporting
        for output_file in expected {
            if !tasks.iter().any(|t| t.output_file == output_file) {
                let report = TaskReport {
                    output_file,
                    outcome: TaskOutcome::Failed {
                        cause: "bundler task panicked".to_string(),
                    },
                };
                self.reporter.task_finished(app, &report);
                tasks.push(report);
            }
        }

        let report = AppReport {
            app: app.to_string(),
            tasks,
            elapsed: start.elapsed(),
        };
        self.reporter.app_finished(&report);
        Ok(report)
    }

    /// Build every configured application, one after another
    pub async fn build_all(&self) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        for (index, app) in self.config.apps.iter().enumerate() {
            let report = self.build_app(app).await?;
            let failed = report.has_failures();
            summary.apps.push(report);

            if failed && self.config.ci {
                let skipped = &self.config.apps[index + 1..];
                if !skipped.is_empty() {
                    tracing::debug!(?skipped, "fail fast: skipping remaining applications");
                    summary.aborted = true;
                }
                break;
            }
        }
        Ok(summary)
    }

    /// Create or refresh `sites/.build`
    pub fn touch_completion_marker(&self) -> Result<()> {
        touch(&self.config.marker_path())
    }
}

async fn run_task(bundler: &dyn Bundler, task: &BundleTask, timeout: Option<Duration>) -> TaskReport {
    let start = Instant::now();
    let result = match timeout {
        Some(limit) => match tokio::time::timeout(limit, bundler.bundle(task)).await {
            Ok(result) => result.map_err(|e| TaskOutcome::Failed {
                cause: e.to_string(),
            }),
            Err(_) => Err(TaskOutcome::TimedOut { after: limit }),
        },
        None => bundler.bundle(task).await.map_err(|e| TaskOutcome::Failed {
            cause: e.to_string(),
        }),
    };

    TaskReport {
        output_file: task.output_file.clone(),
        outcome: match result {
            Ok(()) => TaskOutcome::Built {
                elapsed: start.elapsed(),
            },
            Err(outcome) => outcome,
        },
    }
}
