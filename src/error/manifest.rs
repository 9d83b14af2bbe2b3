//! Manifest errors

use super::BuildError;

/// Creates a manifest parse failed error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> BuildError {
    BuildError::ManifestParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an invalid manifest entry error
pub fn invalid_entry(
    path: impl Into<String>,
    key: impl Into<String>,
    reason: impl Into<String>,
) -> BuildError {
    BuildError::InvalidManifestEntry {
        path: path.into(),
        key: key.into(),
        reason: reason.into(),
    }
}
