//! Build command implementation

use std::sync::Arc;

use crate::bundler::CommandBundler;
use crate::cli::Cli;
use crate::config::{BuildConfig, Environment};
use crate::error::{Result, bundle as bundle_error};
use crate::orchestrator::{BuildMode, Orchestrator};
use crate::ui::ConsoleReporter;

/// Run a build as described by the command line
///
/// Task failures only fail the command under CI; elsewhere they are
/// reported and the command succeeds.
pub fn run(cli: &Cli) -> Result<()> {
    let config = BuildConfig::load(&cli.overrides(), Environment::from_env())?;
    let ci = config.ci;
    let mode = BuildMode::from_app(cli.app.clone());

    let bundler = Arc::new(CommandBundler::new(&config.bundler));
    tracing::debug!(program = bundler.program(), "using bundler");
    let orchestrator = Orchestrator::new(config, bundler, Arc::new(ConsoleReporter::new()));

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let summary = runtime.block_on(orchestrator.run(&mode))?;

    if summary.is_failure(ci) {
        return Err(bundle_error::run_failed(summary.failed_count()));
    }
    Ok(())
}
