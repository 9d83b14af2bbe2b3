//! Common file system operations with unified error handling

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::time::SystemTime;

use tempfile::NamedTempFile;

use crate::error::{Result, fs as fs_error};

/// Mode of newly written outputs; assets are read by the web server user
#[cfg(unix)]
const DEFAULT_MODE: u32 = 0o644;

/// Write `contents` to `path` so readers see either the old file or the new one
///
/// The data goes to a temporary file in the destination directory, which is
/// then renamed over `path`. Missing parent directories are created.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let display = path.display().to_string();
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    fs::create_dir_all(parent)
        .map_err(|e| fs_error::create_dir_failed(parent.display().to_string(), e.to_string()))?;

    let mut temp =
        NamedTempFile::new_in(parent).map_err(|e| fs_error::write_failed(&display, e.to_string()))?;
    temp.write_all(contents)
        .and_then(|()| temp.flush())
        .map_err(|e| fs_error::write_failed(&display, e.to_string()))?;
    set_output_permissions(temp.as_file(), path)
        .map_err(|e| fs_error::write_failed(&display, e.to_string()))?;
    temp.persist(path)
        .map_err(|e| fs_error::write_failed(&display, e.error.to_string()))?;
    Ok(())
}

/// Give the temporary file the mode of the file it replaces, `0o644` when new
#[cfg(unix)]
fn set_output_permissions(file: &File, path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let permissions = match fs::metadata(path) {
        Ok(metadata) => metadata.permissions(),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            fs::Permissions::from_mode(DEFAULT_MODE)
        }
        Err(err) => return Err(err),
    };
    file.set_permissions(permissions)
}

#[cfg(not(unix))]
fn set_output_permissions(_file: &File, _path: &Path) -> std::io::Result<()> {
    Ok(())
}

/// Create `path` when absent and set its modification time to now
pub fn touch(path: &Path) -> Result<()> {
    let display = path.display().to_string();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| fs_error::write_failed(&display, e.to_string()))?;
    file.set_modified(SystemTime::now())
        .map_err(|e| fs_error::write_failed(&display, e.to_string()))?;
    Ok(())
}

/// Create `path` unless it is already a directory; true when it was created
pub fn ensure_dir(path: &Path) -> Result<bool> {
    if path.is_dir() {
        return Ok(false);
    }
    fs::create_dir_all(path)
        .map_err(|e| fs_error::create_dir_failed(path.display().to_string(), e.to_string()))?;
    Ok(true)
}
