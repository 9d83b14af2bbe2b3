//! # Scripted bundler
//!
//! Test double for [`Bundler`]. Each output file can be scripted to
//! succeed, fail, hang or take a while; unscripted outputs succeed. The
//! mock records every invocation and the peak number of tasks in flight.
//!
//! ```ignore
//! let bundler = ScriptedBundler::new()
//!     .fail("js/broken.js", "syntax error")
//!     .delay("js/slow.js", Duration::from_millis(50));
//! ```

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use super::Bundler;
use crate::common::fs::write_atomic;
use crate::domain::BundleTask;
use crate::error::{Result, bundle as bundle_error};

#[derive(Debug, Clone)]
enum Script {
    Fail(String),
    Hang,
    Delay(Duration),
}

#[derive(Debug, Default)]
pub struct ScriptedBundler {
    scripts: HashMap<String, Script>,
    calls: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl ScriptedBundler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(mut self, output_file: &str, reason: &str) -> Self {
        self.scripts
            .insert(output_file.to_string(), Script::Fail(reason.to_string()));
        self
    }

    pub fn hang(mut self, output_file: &str) -> Self {
        self.scripts.insert(output_file.to_string(), Script::Hang);
        self
    }

    pub fn delay(mut self, output_file: &str, delay: Duration) -> Self {
        self.scripts
            .insert(output_file.to_string(), Script::Delay(delay));
        self
    }

    /// Output files in invocation order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    /// Most tasks observed running at once
    pub fn peak_concurrency(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

/// Decrements the in-flight counter even when the future is dropped
struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl Bundler for ScriptedBundler {
    async fn bundle(&self, task: &BundleTask) -> Result<()> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(task.output_file.clone());
        }
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        let _guard = InFlight(&self.in_flight);

        // Always yield once so sibling tasks get to start
        tokio::task::yield_now().await;

        match self.scripts.get(&task.output_file) {
            Some(Script::Fail(reason)) => {
                return Err(bundle_error::failed(&task.output_file, reason));
            }
            Some(Script::Hang) => std::future::pending::<()>().await,
            Some(Script::Delay(delay)) => tokio::time::sleep(*delay).await,
            None => {}
        }

        let body = format!("/* bundled {} */\n", task.output_file);
        write_atomic(&task.output.path, body.as_bytes())
    }
}
