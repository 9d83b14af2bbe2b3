//! Console line formatting
//!
//! Yellow for headers, green for success, red for failures. Styling is
//! dropped automatically when stdout is not a terminal.

use std::time::Duration;

use console::Style;

use crate::orchestrator::report::{RunSummary, TaskOutcome, TaskReport};

pub fn mode_line(production: bool) -> String {
    let mode = if production {
        "Production"
    } else {
        "Development"
    };
    Style::new()
        .yellow()
        .apply_to(format!("{mode} mode"))
        .to_string()
}

pub fn app_header(app: &str) -> String {
    Style::new()
        .yellow()
        .apply_to(format!("\nBuilding {app} assets...\n"))
        .to_string()
}

pub fn built_line(output_file: &str) -> String {
    format!("{} Built {output_file}", Style::new().green().apply_to("✔"))
}

pub fn task_line(report: &TaskReport) -> String {
    let red = Style::new().red();
    match &report.outcome {
        TaskOutcome::Built { .. } => built_line(&report.output_file),
        TaskOutcome::Failed { cause } => red
            .apply_to(format!("✘ Failed {}: {cause}", report.output_file))
            .to_string(),
        TaskOutcome::TimedOut { after } => red
            .apply_to(format!(
                "✘ Timed out {} after {}",
                report.output_file,
                format_secs(*after)
            ))
            .to_string(),
    }
}

pub fn done_line(elapsed: Duration) -> String {
    Style::new()
        .green()
        .apply_to(format!("✨  Done in {}", format_secs(elapsed)))
        .to_string()
}

pub fn summary_line(summary: &RunSummary) -> Option<String> {
    let failed = summary.failed_count();
    if failed == 0 {
        return None;
    }
    let mut line = format!(
        "{failed} of {} bundle task(s) failed",
        failed + summary.built_count()
    );
    if summary.aborted {
        line.push_str("; remaining applications skipped");
    }
    Some(Style::new().red().bold().apply_to(line).to_string())
}

/// Seconds with millisecond precision, trailing zeros trimmed (`1.5s`)
pub fn format_secs(duration: Duration) -> String {
    let secs = format!("{:.3}", duration.as_secs_f64());
    let secs = secs.trim_end_matches('0').trim_end_matches('.');
    format!("{secs}s")
}
