//! Application list discovery

use std::path::Path;

use crate::error::{Result, fs as fs_error};

pub const APPS_TXT: &str = "apps.txt";

/// Parse `apps.txt`: one application per line, blanks and `#` comments skipped
pub fn parse_apps_txt(content: &str) -> Vec<String> {
    let mut apps: Vec<String> = Vec::new();
    for line in content.lines() {
        let name = line.trim();
        if name.is_empty() || name.starts_with('#') {
            continue;
        }
        if !apps.iter().any(|app| app == name) {
            apps.push(name.to_string());
        }
    }
    apps
}

/// Read `sites/apps.txt`, `None` when the file does not exist
pub fn read_apps_txt(sites_path: &Path) -> Result<Option<Vec<String>>> {
    let path = sites_path.join(APPS_TXT);
    match std::fs::read_to_string(&path) {
        Ok(content) => Ok(Some(parse_apps_txt(&content))),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(fs_error::read_failed(
            path.display().to_string(),
            err.to_string(),
        )),
    }
}

/// Every `apps/<name>` whose `<name>/<name>/public/build.json` exists, by name
pub fn discover_apps(apps_dir: &Path) -> Result<Vec<String>> {
    let entries = match std::fs::read_dir(apps_dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => {
            return Err(fs_error::read_failed(
                apps_dir.display().to_string(),
                err.to_string(),
            ));
        }
    };

    let mut apps = Vec::new();
    for entry in entries {
        let entry = entry?;
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        let manifest = entry
            .path()
            .join(&name)
            .join("public")
            .join("build.json");
        if manifest.is_file() {
            apps.push(name);
        }
    }
    apps.sort();
    Ok(apps)
}
