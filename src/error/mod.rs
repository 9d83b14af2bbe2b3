//! Error types and handling for asset-build
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`config`]: Bench and configuration errors
//! - [`manifest`]: Asset manifest (`build.json`) errors
//! - [`fs`]: File system errors
//! - [`bundle`]: Bundler invocation errors

pub mod bundle;
pub mod config;
pub mod fs;
pub mod manifest;


use miette::Diagnostic;
use thiserror::Error;

/// Main error type for asset-build operations
#[derive(Error, Diagnostic, Debug)]
pub enum BuildError {
    // Configuration errors
    #[error("Bench directory not found: {path}")]
    #[diagnostic(
        code(asset_build::config::bench_not_found),
        help("Pass --bench <dir> or run from a bench root containing 'apps/' and 'sites/'")
    )]
    BenchNotFound { path: String },

    #[error("Unknown application '{app}'")]
    #[diagnostic(
        code(asset_build::config::unknown_app),
        help("Configured applications: {known}")
    )]
    UnknownApp { app: String, known: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(asset_build::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(asset_build::config::invalid))]
    ConfigInvalid { message: String },

    // Manifest errors
    #[error("Failed to parse manifest {path}: {reason}")]
    #[diagnostic(
        code(asset_build::manifest::parse_failed),
        help("The manifest must be a JSON object mapping output files to lists of input files")
    )]
    ManifestParseFailed { path: String, reason: String },

    #[error("Invalid manifest entry '{key}' in {path}: {reason}")]
    #[diagnostic(
        code(asset_build::manifest::invalid_entry),
        help(
            "Keys name a .js or .css output (optionally tagged 'concat:'), values are non-empty lists of paths"
        )
    )]
    InvalidManifestEntry {
        path: String,
        key: String,
        reason: String,
    },

    // File system errors
    #[error("Concatenation input not found: {path} (listed in '{entry}')")]
    #[diagnostic(
        code(asset_build::fs::missing_input),
        help("Check the file exists or remove it from the manifest")
    )]
    MissingInput { path: String, entry: String },

    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(asset_build::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(asset_build::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("Failed to create directory: {path}: {reason}")]
    #[diagnostic(code(asset_build::fs::create_dir_failed))]
    CreateDirFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(asset_build::fs::io_error))]
    IoError { message: String },

    // Bundler errors
    #[error("Failed to start bundler '{program}': {reason}")]
    #[diagnostic(
        code(asset_build::bundle::spawn_failed),
        help("Install the bundler or point --bundler at an executable")
    )]
    BundlerSpawnFailed { program: String, reason: String },

    #[error("Bundler failed for {output}: {reason}")]
    #[diagnostic(code(asset_build::bundle::failed))]
    BundlerFailed { output: String, reason: String },

    #[error("Asset build failed: {failed} task(s) did not complete")]
    #[diagnostic(
        code(asset_build::bundle::run_failed),
        help("Unset CI to log bundler failures and keep going")
    )]
    RunFailed { failed: usize },
}

impl From<std::io::Error> for BuildError {
    fn from(err: std::io::Error) -> Self {
        BuildError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, BuildError>;
