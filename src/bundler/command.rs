//! External bundler process
//!
//! Arguments are a template. Placeholders:
//! - `{output}`: destination path
//! - `{format}`: `iife` or `css`
//! - `{app}`: application name
//! - `{inputs}`: as a whole argument, expands to one argument per entry point
//!
//! Entry points are appended when no argument is `{inputs}`. Without an
//! `{output}` placeholder the bundler is expected to print the bundle, and
//! stdout is written to the destination atomically.

use std::ffi::OsString;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use super::Bundler;
use crate::common::fs::write_atomic;
use crate::config::BundlerSettings;
use crate::domain::BundleTask;
use crate::error::{Result, bundle as bundle_error};

const INPUTS_PLACEHOLDER: &str = "{inputs}";
const OUTPUT_PLACEHOLDER: &str = "{output}";

/// Longest stderr excerpt carried in a failure
const MAX_STDERR_CHARS: usize = 2000;

#[derive(Debug, Clone)]
pub struct CommandBundler {
    program: String,
    args: Vec<String>,
}

/// Arguments for one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub args: Vec<OsString>,
    /// Write stdout to the output path
    pub capture_stdout: bool,
}

impl CommandBundler {
    pub fn new(settings: &BundlerSettings) -> Self {
        Self {
            program: settings.program.clone(),
            args: settings.args.clone(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Expand the argument template for `task`
    pub fn invocation(&self, task: &BundleTask) -> Invocation {
        let output = task.output.path.to_string_lossy();
        let mut args = Vec::with_capacity(self.args.len() + task.input.entry_points.len());
        let mut inputs_placed = false;

        for template in &self.args {
            if template == INPUTS_PLACEHOLDER {
                args.extend(task.input.entry_points.iter().map(|p| p.clone().into_os_string()));
                inputs_placed = true;
                continue;
            }
            let arg = template
                .replace(OUTPUT_PLACEHOLDER, &output)
                .replace("{format}", task.output.format)
                .replace("{app}", &task.app);
            args.push(OsString::from(arg));
        }
        if !inputs_placed {
            args.extend(task.input.entry_points.iter().map(|p| p.clone().into_os_string()));
        }

        Invocation {
            args,
            capture_stdout: !self.args.iter().any(|arg| arg.contains(OUTPUT_PLACEHOLDER)),
        }
    }
}

#[async_trait]
impl Bundler for CommandBundler {
    async fn bundle(&self, task: &BundleTask) -> Result<()> {
        let invocation = self.invocation(task);
        tracing::debug!(
            program = %self.program,
            kind = ?task.input.kind,
            args = ?invocation.args,
            cwd = %task.input.working_dir.display(),
            "running bundler"
        );

        // kill_on_drop: a timed-out task drops this future and the child with it
        let output = Command::new(&self.program)
            .args(&invocation.args)
            .current_dir(&task.input.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| bundle_error::spawn_failed(&self.program, e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim();
            let reason = if stderr.is_empty() {
                format!("{} exited with {}", self.program, output.status)
            } else {
                truncate(stderr, MAX_STDERR_CHARS)
            };
            return Err(bundle_error::failed(&task.output_file, reason));
        }

        if invocation.capture_stdout {
            write_atomic(&task.output.path, &output.stdout)?;
        } else if !output.stdout.is_empty() {
            tracing::debug!(
                output = %task.output_file,
                stdout = %String::from_utf8_lossy(&output.stdout).trim(),
                "bundler output"
            );
        }
        Ok(())
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => format!("{}...", &text[..index]),
        None => text.to_string(),
    }
}
