//! Bundler errors

use super::BuildError;

/// Creates a bundler spawn failed error
pub fn spawn_failed(program: impl Into<String>, reason: impl Into<String>) -> BuildError {
    BuildError::BundlerSpawnFailed {
        program: program.into(),
        reason: reason.into(),
    }
}

/// Creates a bundler failed error
pub fn failed(output: impl Into<String>, reason: impl Into<String>) -> BuildError {
    BuildError::BundlerFailed {
        output: output.into(),
        reason: reason.into(),
    }
}

/// Creates a run failed error from the number of unfinished tasks
pub fn run_failed(failed: usize) -> BuildError {
    BuildError::RunFailed { failed }
}
