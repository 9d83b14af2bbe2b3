//! Common test utilities for asset-build integration tests

use std::path::PathBuf;
use std::time::SystemTime;

use assert_cmd::Command;
use tempfile::TempDir;

/// A throwaway bench directory with `apps/` and `sites/`
pub struct TestBench {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to bench root
    pub path: PathBuf,
}

impl TestBench {
    /// Create a new bench with an empty `sites/` directory
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        std::fs::create_dir_all(path.join("sites")).expect("Failed to create sites directory");
        Self { temp, path }
    }

    /// Add an application with the given `public/build.json` and list it in apps.txt
    pub fn add_app(&self, name: &str, manifest: &str) {
        self.write_file(&format!("apps/{name}/{name}/public/build.json"), manifest);
        let apps_txt = self.path.join("sites/apps.txt");
        let mut apps = std::fs::read_to_string(&apps_txt).unwrap_or_default();
        apps.push_str(name);
        apps.push('\n');
        std::fs::write(apps_txt, apps).expect("Failed to write apps.txt");
    }

    /// Write a file in the bench
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from the bench
    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.path.join(path)).expect("Failed to read file")
    }

    /// Check if a file exists in the bench
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Modification time of a bench file
    #[allow(dead_code)]
    pub fn modified(&self, path: &str) -> SystemTime {
        std::fs::metadata(self.path.join(path))
            .and_then(|m| m.modified())
            .expect("Failed to read modification time")
    }

    /// asset-build command rooted at this bench with a clean environment
    #[allow(deprecated)]
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("asset-build").expect("Failed to find asset-build binary");
        cmd.current_dir(&self.path)
            .env_remove("CI")
            .env_remove("FRAPPE_ENV")
            .env_remove("RUST_LOG")
            .env_remove("ASSET_BUILD_BENCH")
            .env_remove("ASSET_BUILD_JOBS")
            .env_remove("ASSET_BUILD_TIMEOUT")
            .env_remove("ASSET_BUILD_BUNDLER");
        cmd
    }
}
