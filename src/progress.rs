//! Progress bar display for application builds

use indicatif::{ProgressBar, ProgressStyle};

/// Progress of one application's bundle tasks
///
/// Draws to stderr and hides itself when stderr is not a terminal.
pub struct BuildProgress {
    bar: ProgressBar,
}

impl BuildProgress {
    /// Create a new progress display with total task count
    pub fn new(app: &str, total_tasks: u64) -> Self {
        let bar = ProgressBar::new(total_tasks);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            bar.set_style(style.progress_chars("#>-"));
        }
        bar.set_message(app.to_string());
        Self { bar }
    }

    /// Print a line above the bar without tearing it
    pub fn println(&self, line: &str) {
        self.bar.suspend(|| println!("{line}"));
    }

    /// Increment task progress
    pub fn inc(&self) {
        self.bar.inc(1);
    }

    #[cfg(test)]
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Remove the bar once every task has settled
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
