//! CLI definitions using clap derive API

use clap::Parser;
use clap::builder::{Styles, styling::AnsiColor};
use std::path::PathBuf;

use crate::config::Overrides;

/// asset-build - bundle and concatenate bench assets
///
/// Builds the JS/CSS assets of every application in a bench, or of one
/// application with --app.
#[derive(Parser, Debug)]
#[command(
    name = "asset-build",
    author,
    version,
    color = clap::ColorChoice::Auto,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Bundle and concatenate the static assets of a bench",
    long_about = "Builds the assets listed in each application's public/build.json: \
                  'concat:' entries are concatenated, every other entry is handed to the \
                  bundler. Output goes to sites/assets and sites/.build is touched when done.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  asset-build                          \x1b[90m# Build every app in sites/apps.txt\x1b[0m\n   \
                  asset-build --app erpnext            \x1b[90m# Build only erpnext\x1b[0m\n   \
                  asset-build -j 2 --timeout 120       \x1b[90m# Two tasks at a time, 2 minute limit\x1b[0m\n   \
                  CI=1 asset-build                     \x1b[90m# Stop at the first failing app\x1b[0m\n"
)]
pub struct Cli {
    /// Build only this application
    #[arg(long, short = 'a', value_name = "NAME")]
    pub app: Option<String>,

    /// Bench directory (defaults to current directory)
    #[arg(long, short = 'b', env = "ASSET_BUILD_BENCH", value_name = "DIR")]
    pub bench: Option<PathBuf>,

    /// Maximum bundle tasks running at once per application
    #[arg(long, short = 'j', env = "ASSET_BUILD_JOBS", value_name = "N")]
    pub jobs: Option<usize>,

    /// Give up on a bundle task after this many seconds
    #[arg(long, env = "ASSET_BUILD_TIMEOUT", value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Bundler program
    #[arg(long, env = "ASSET_BUILD_BUNDLER", value_name = "PROGRAM")]
    pub bundler: Option<String>,

    /// Bundler argument template, repeatable ({output}, {format}, {app}, {inputs})
    #[arg(long = "bundler-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub bundler_args: Vec<String>,

    /// Enable verbose output
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            bench: self.bench.clone(),
            jobs: self.jobs,
            timeout_secs: self.timeout,
            bundler: self.bundler.clone(),
            bundler_args: self.bundler_args.clone(),
        }
    }
}
