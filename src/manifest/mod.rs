//! Asset manifest (`public/build.json`) parsing
//!
//! A manifest maps output file names to ordered lists of input files:
//!
//! ```json
//! {
//!     "js/desk.min.js": ["public/js/frappe/class.js", "public/js/frappe/desk.js"],
//!     "css/desk.min.css": ["public/css/desk.css"],
//!     "concat:js/libs.min.js": ["node_modules/moment/min/moment.min.js", "public/js/lib/md5.js"]
//! }
//! ```
//!
//! Every key is classified once, at load time, into a [`ManifestEntry`].
//! Keys tagged `concat:` become [`ConcatRule`]s; all other keys must name a
//! `.js` or `.css` output and become [`BundleEntry`]s.


use std::collections::HashSet;
use std::path::{Component, Path};

use serde_json::Value;

use crate::domain::{AssetKind, ConcatRule};
use crate::error::{Result, fs as fs_error, manifest as manifest_error};

/// Key prefix marking an entry for plain concatenation
pub const CONCAT_TAG: &str = "concat:";

/// Input prefix resolved against the application's repository root
pub const DEPENDENCY_DIR_PREFIX: &str = "node_modules/";

/// Manifest entry handed to the bundler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleEntry {
    pub output_file: String,
    pub kind: AssetKind,
    pub inputs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestEntry {
    Bundle(BundleEntry),
    Concat(ConcatRule),
}

impl ManifestEntry {
    pub fn output_file(&self) -> &str {
        match self {
            Self::Bundle(entry) => &entry.output_file,
            Self::Concat(rule) => &rule.output_file,
        }
    }
}

/// Parsed manifest, entries in file order
#[derive(Debug, Clone)]
pub struct Manifest {
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Load a manifest file, `None` when the application has no manifest
    pub fn load(path: &Path) -> Result<Option<Self>> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(fs_error::read_failed(
                    path.display().to_string(),
                    err.to_string(),
                ));
            }
        };
        Self::from_json(&content, path).map(Some)
    }

    /// Parse manifest JSON; `path` is only used in error messages
    pub fn from_json(json: &str, path: &Path) -> Result<Self> {
        let display = path.display().to_string();
        let value: Value = serde_json::from_str(json)
            .map_err(|e| manifest_error::parse_failed(&display, e.to_string()))?;

        let Value::Object(map) = value else {
            return Err(manifest_error::parse_failed(
                &display,
                format!("expected a JSON object, found {}", value_kind(&value)),
            ));
        };

        let mut entries = Vec::with_capacity(map.len());
        let mut outputs = HashSet::new();
        for (key, value) in map {
            let entry = parse_entry(&display, &key, value)?;
            if !outputs.insert(entry.output_file().to_string()) {
                return Err(manifest_error::invalid_entry(
                    &display,
                    &key,
                    format!("output '{}' is produced twice", entry.output_file()),
                ));
            }
            entries.push(entry);
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    pub fn bundle_entries(&self) -> impl Iterator<Item = &BundleEntry> {
        self.entries().iter().filter_map(|entry| match entry {
            ManifestEntry::Bundle(bundle) => Some(bundle),
            ManifestEntry::Concat(_) => None,
        })
    }

    pub fn concat_rules(&self) -> impl Iterator<Item = &ConcatRule> {
        self.entries().iter().filter_map(|entry| match entry {
            ManifestEntry::Concat(rule) => Some(rule),
            ManifestEntry::Bundle(_) => None,
        })
    }
}

fn parse_entry(path: &str, key: &str, value: Value) -> Result<ManifestEntry> {
    let inputs = parse_inputs(path, key, value)?;

    if let Some(output_file) = key.strip_prefix(CONCAT_TAG) {
        validate_output(path, key, output_file)?;
        return Ok(ManifestEntry::Concat(ConcatRule {
            output_file: output_file.to_string(),
            inputs,
        }));
    }

    validate_output(path, key, key)?;
    let kind = AssetKind::from_output(key).ok_or_else(|| {
        manifest_error::invalid_entry(
            path,
            key,
            "bundle outputs must end in .js or .css (use the 'concat:' tag for plain concatenation)",
        )
    })?;

    Ok(ManifestEntry::Bundle(BundleEntry {
        output_file: key.to_string(),
        kind,
        inputs,
    }))
}

fn parse_inputs(path: &str, key: &str, value: Value) -> Result<Vec<String>> {
    let Value::Array(items) = value else {
        return Err(manifest_error::invalid_entry(
            path,
            key,
            format!("expected a list of input files, found {}", value_kind(&value)),
        ));
    };
    if items.is_empty() {
        return Err(manifest_error::invalid_entry(
            path,
            key,
            "input list is empty",
        ));
    }

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::String(input) if !input.trim().is_empty() => Ok(input),
            Value::String(_) => Err(manifest_error::invalid_entry(
                path,
                key,
                format!("input #{} is an empty path", index + 1),
            )),
            other => Err(manifest_error::invalid_entry(
                path,
                key,
                format!(
                    "input #{} must be a string, found {}",
                    index + 1,
                    value_kind(&other)
                ),
            )),
        })
        .collect()
}

/// Outputs land under the shared asset directory and must stay inside it
fn validate_output(path: &str, key: &str, output_file: &str) -> Result<()> {
    if output_file.is_empty() {
        return Err(manifest_error::invalid_entry(
            path,
            key,
            "output file name is empty",
        ));
    }
    let escapes = Path::new(output_file).components().any(|component| {
        matches!(
            component,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    });
    if escapes {
        return Err(manifest_error::invalid_entry(
            path,
            key,
            "output must be a relative path inside the asset directory",
        ));
    }
    Ok(())
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
