//! Process environment flags

use std::env;

/// Environment flags that change how a run behaves or reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Environment {
    /// Running under continuous integration: bundler failures end the run
    ///
    /// `CI=0` and `CI=false` count as unset, unlike a plain non-empty check.
    pub ci: bool,
    /// `FRAPPE_ENV=production`, only changes the mode message
    pub production: bool,
}

impl Environment {
    pub fn from_env() -> Self {
        Self {
            ci: env::var("CI").is_ok_and(|value| is_truthy(&value)),
            production: env::var("FRAPPE_ENV").is_ok_and(|value| value == "production"),
        }
    }
}

/// Any non-empty value other than `0` or `false` counts as set
pub fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    !(value.is_empty() || value == "0" || value.eq_ignore_ascii_case("false"))
}
