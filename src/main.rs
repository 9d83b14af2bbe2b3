//! asset-build - static asset builder for benches
//!
//! Concatenates and bundles the JS/CSS assets declared in each application's
//! `public/build.json` into the bench's shared `sites/assets` directory.

use clap::Parser;

mod bundler;
mod cli;
mod commands;
mod common;
mod config;
mod domain;
mod error;
mod logging;
mod manifest;
mod orchestrator;
mod progress;
mod ui;

use cli::Cli;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = commands::build::run(&cli) {
        eprintln!("{:?}", miette::Report::new(e));
        std::process::exit(1);
    }
}
