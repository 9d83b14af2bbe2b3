//! File system errors

use super::BuildError;

/// Creates a missing concatenation input error
pub fn missing_input(path: impl Into<String>, entry: impl Into<String>) -> BuildError {
    BuildError::MissingInput {
        path: path.into(),
        entry: entry.into(),
    }
}

/// Creates a file read failed error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> BuildError {
    BuildError::FileReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a file write failed error
pub fn write_failed(path: impl Into<String>, reason: impl Into<String>) -> BuildError {
    BuildError::FileWriteFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a directory creation failed error
pub fn create_dir_failed(path: impl Into<String>, reason: impl Into<String>) -> BuildError {
    BuildError::CreateDirFailed {
        path: path.into(),
        reason: reason.into(),
    }
}
