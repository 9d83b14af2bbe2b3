//! Build configuration
//!
//! Everything a run needs is resolved up front into a [`BuildConfig`] and
//! handed to the orchestrator. Sources, lowest precedence first:
//! - built-in defaults
//! - `asset-build.yaml` in the bench root
//! - environment (`ASSET_BUILD_*` via the CLI, `CI`, `FRAPPE_ENV`)
//! - command line flags

pub mod apps;
pub mod env;
pub mod file;

use std::path::PathBuf;
use std::time::Duration;

pub use env::Environment;
pub use file::ConfigFile;

use crate::error::{Result, config as config_error};
use crate::manifest::DEPENDENCY_DIR_PREFIX;

const DEFAULT_BUNDLER: &str = "rollup";
const DEFAULT_BUNDLER_ARGS: [&str; 6] = [
    "--silent",
    "--format",
    "{format}",
    "--file",
    "{output}",
    "{inputs}",
];

/// Bundler program and argument template (see [`crate::bundler::command`])
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundlerSettings {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for BundlerSettings {
    fn default() -> Self {
        Self {
            program: DEFAULT_BUNDLER.to_string(),
            args: DEFAULT_BUNDLER_ARGS.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Values taken from the command line, `None` when not given
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub bench: Option<PathBuf>,
    pub jobs: Option<usize>,
    pub timeout_secs: Option<u64>,
    pub bundler: Option<String>,
    pub bundler_args: Vec<String>,
}

/// Resolved configuration for one run
#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub bench_path: PathBuf,
    pub sites_path: PathBuf,
    pub assets_path: PathBuf,
    /// Applications in build order
    pub apps: Vec<String>,
    pub ci: bool,
    pub production: bool,
    /// Maximum concurrent bundle tasks per application
    pub jobs: usize,
    pub timeout: Option<Duration>,
    pub bundler: BundlerSettings,
}

/// Directory layout of one application inside the bench
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppLayout {
    pub name: String,
    /// `apps/<name>`, holds `node_modules/`
    pub repo_root: PathBuf,
    /// `apps/<name>/<name>`, manifest paths resolve here
    pub app_path: PathBuf,
}

impl AppLayout {
    pub fn manifest_path(&self) -> PathBuf {
        self.app_path.join("public").join("build.json")
    }

    /// Resolve a manifest input path to a file on disk
    pub fn resolve_input(&self, input: &str) -> PathBuf {
        if input.starts_with(DEPENDENCY_DIR_PREFIX) {
            self.repo_root.join(input)
        } else {
            self.app_path.join(input)
        }
    }
}

impl BuildConfig {
    /// Configuration rooted at `bench_path` with defaults everywhere else
    pub fn new(bench_path: impl Into<PathBuf>, apps: Vec<String>) -> Self {
        let bench_path = bench_path.into();
        let sites_path = bench_path.join("sites");
        let assets_path = sites_path.join("assets");
        Self {
            bench_path,
            sites_path,
            assets_path,
            apps,
            ci: false,
            production: false,
            jobs: default_jobs(),
            timeout: None,
            bundler: BundlerSettings::default(),
        }
    }

    /// Resolve the full configuration for a run
    pub fn load(overrides: &Overrides, environment: Environment) -> Result<Self> {
        let bench = match &overrides.bench {
            Some(bench) => bench.clone(),
            None => std::env::current_dir()?,
        };
        let bench_path = dunce::canonicalize(&bench)
            .map_err(|_| config_error::bench_not_found(bench.display().to_string()))?;
        if !bench_path.join("sites").is_dir() {
            return Err(config_error::bench_not_found(
                bench_path.display().to_string(),
            ));
        }

        let file = ConfigFile::load(&bench_path)?;
        let mut config = Self::new(bench_path, Vec::new());
        config.apps = config.resolve_apps(file.apps.clone())?;
        config.ci = environment.ci;
        config.production = environment.production;
        config.apply_file(file);
        config.apply_overrides(overrides);
        config.validate()?;

        tracing::debug!(
            bench = %config.bench_path.display(),
            apps = ?config.apps,
            jobs = config.jobs,
            ci = config.ci,
            "resolved build configuration"
        );
        Ok(config)
    }

    fn resolve_apps(&self, from_file: Option<Vec<String>>) -> Result<Vec<String>> {
        if let Some(apps) = from_file {
            return Ok(apps);
        }
        if let Some(apps) = apps::read_apps_txt(&self.sites_path)? {
            return Ok(apps);
        }
        apps::discover_apps(&self.bench_path.join("apps"))
    }

    fn apply_file(&mut self, file: ConfigFile) {
        if let Some(jobs) = file.jobs {
            self.jobs = jobs;
        }
        if let Some(secs) = file.timeout_secs {
            self.timeout = Some(Duration::from_secs(secs));
        }
        if let Some(bundler) = file.bundler {
            self.bundler = BundlerSettings {
                program: bundler.program,
                args: bundler.args,
            };
        }
    }

    fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(jobs) = overrides.jobs {
            self.jobs = jobs;
        }
        if let Some(secs) = overrides.timeout_secs {
            self.timeout = Some(Duration::from_secs(secs));
        }
        if let Some(program) = &overrides.bundler {
            self.bundler = BundlerSettings {
                program: program.clone(),
                args: overrides.bundler_args.clone(),
            };
        } else if !overrides.bundler_args.is_empty() {
            self.bundler.args.clone_from(&overrides.bundler_args);
        }
    }

    /// Check values that would otherwise fail late in the run
    pub fn validate(&self) -> Result<()> {
        if self.jobs == 0 {
            return Err(config_error::invalid("jobs must be at least 1"));
        }
        if self.timeout.is_some_and(|timeout| timeout.is_zero()) {
            return Err(config_error::invalid("timeout must be at least 1 second"));
        }
        if self.bundler.program.trim().is_empty() {
            return Err(config_error::invalid("bundler program is empty"));
        }
        if let Some(app) = self.apps.iter().find(|app| !is_valid_app_name(app)) {
            return Err(config_error::invalid(format!(
                "invalid application name '{app}'"
            )));
        }
        Ok(())
    }

    pub fn app_layout(&self, app: &str) -> AppLayout {
        let repo_root = self.bench_path.join("apps").join(app);
        let app_path = repo_root.join(app);
        AppLayout {
            name: app.to_string(),
            repo_root,
            app_path,
        }
    }

    /// `sites/.build`, touched after every run
    pub fn marker_path(&self) -> PathBuf {
        self.sites_path.join(".build")
    }

    pub fn asset_path(&self, output_file: &str) -> PathBuf {
        self.assets_path.join(output_file)
    }

    pub fn has_app(&self, app: &str) -> bool {
        self.apps.iter().any(|known| known == app)
    }
}

/// Application names become path components and must stay single segments
fn is_valid_app_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
}

fn default_jobs() -> usize {
    std::thread::available_parallelism().map_or(4, std::num::NonZeroUsize::get)
}
