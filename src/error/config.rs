//! Configuration errors

use super::BuildError;

/// Creates a bench not found error
pub fn bench_not_found(path: impl Into<String>) -> BuildError {
    BuildError::BenchNotFound { path: path.into() }
}

/// Creates an unknown application error listing the configured ones
pub fn unknown_app(app: impl Into<String>, known: &[String]) -> BuildError {
    BuildError::UnknownApp {
        app: app.into(),
        known: if known.is_empty() {
            "(none)".to_string()
        } else {
            known.join(", ")
        },
    }
}

/// Creates a config parse failed error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> BuildError {
    BuildError::ConfigParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an invalid config error
pub fn invalid(message: impl Into<String>) -> BuildError {
    BuildError::ConfigInvalid {
        message: message.into(),
    }
}
