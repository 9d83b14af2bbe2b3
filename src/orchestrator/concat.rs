//! Plain ordered concatenation of manifest inputs

use crate::config::AppLayout;
use crate::domain::ConcatRule;
use crate::error::{Result, fs as fs_error};
use crate::manifest::CONCAT_TAG;

const SEPARATOR: &[u8] = b"\n\n";

/// Concatenate every input of `rule` in listed order
///
/// Each input is preceded by a `/* <path> */` header line, inputs are
/// separated by a blank line. Nothing is returned unless every input could
/// be read.
pub fn concatenate(layout: &AppLayout, rule: &ConcatRule) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    for (index, input) in rule.inputs.iter().enumerate() {
        let path = layout.resolve_input(input);
        let content = std::fs::read(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                fs_error::missing_input(
                    path.display().to_string(),
                    format!("{CONCAT_TAG}{}", rule.output_file),
                )
            } else {
                fs_error::read_failed(path.display().to_string(), e.to_string())
            }
        })?;

        if index > 0 {
            out.extend_from_slice(SEPARATOR);
        }
        out.extend_from_slice(format!("/* {input} */\n").as_bytes());
        out.extend_from_slice(&content);
    }
    Ok(out)
}
