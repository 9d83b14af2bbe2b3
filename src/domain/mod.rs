//! Domain models for asset-build
//!
//! This module contains the plain data describing one build: which
//! application is built, which bundler invocations it needs and which
//! files are simply concatenated.

use std::path::PathBuf;

/// Kind of asset produced by a bundle task, derived from the output extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Js,
    Css,
}

impl AssetKind {
    /// Classify an output file name by its extension
    pub fn from_output(output_file: &str) -> Option<Self> {
        let extension = std::path::Path::new(output_file)
            .extension()
            .and_then(|ext| ext.to_str())?;
        match extension {
            "js" => Some(Self::Js),
            "css" => Some(Self::Css),
            _ => None,
        }
    }

    /// Output format handed to the bundler
    pub fn format(self) -> &'static str {
        match self {
            Self::Js => "iife",
            Self::Css => "css",
        }
    }

    /// Asset subdirectory that must exist before anything is written
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Js => "js",
            Self::Css => "css",
        }
    }

    pub const ALL: [AssetKind; 2] = [AssetKind::Js, AssetKind::Css];
}

/// What the bundler reads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputOptions {
    /// Entry points in manifest order, already resolved to absolute paths
    pub entry_points: Vec<PathBuf>,
    /// Directory the bundler runs in (the application's path)
    pub working_dir: PathBuf,
    pub kind: AssetKind,
}

/// Where and how the bundler writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputOptions {
    pub path: PathBuf,
    pub format: &'static str,
}

/// One bundler invocation producing one output asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleTask {
    pub app: String,
    pub input: InputOptions,
    pub output: OutputOptions,
    /// Output file name relative to the asset directory, used in logs
    pub output_file: String,
}

/// One application and the bundle tasks resolved from its manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildTarget {
    pub app: String,
    pub tasks: Vec<BundleTask>,
}

impl BuildTarget {
    pub fn empty(app: impl Into<String>) -> Self {
        Self {
            app: app.into(),
            tasks: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Ordered concatenation of input files into one output file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConcatRule {
    /// Output file relative to the asset directory (tag already stripped)
    pub output_file: String,
    /// Input paths exactly as listed in the manifest
    pub inputs: Vec<String>,
}
