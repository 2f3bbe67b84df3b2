/*!
 * UTF-8 checks for text notebooks.
 *
 * Files saved by older editors are often Windows-1252. The parser reads them
 * lossily; this module tells the user which lines will be mangled.
 */

use std::path::Path;

use anyhow::{Context, Result};
use log::{info, warn};
use serde::Serialize;

/// Outcome of checking one buffer
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Utf8Report {
    pub valid: bool,
    /// 1-based numbers of the lines that are not valid UTF-8
    pub invalid_lines: Vec<usize>,
}

/// Check every `\n`-separated line of a buffer
pub fn validate_utf8(bytes: &[u8]) -> Utf8Report {
    let invalid_lines: Vec<usize> = bytes
        .split(|&b| b == b'\n')
        .enumerate()
        .filter(|(_, line)| std::str::from_utf8(line).is_err())
        .map(|(index, _)| index + 1)
        .collect();

    Utf8Report {
        valid: invalid_lines.is_empty(),
        invalid_lines,
    }
}

/// Check a file and log what was found
pub fn validate_file<P: AsRef<Path>>(path: P) -> Result<Utf8Report> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
    let report = validate_utf8(&bytes);

    for line in &report.invalid_lines {
        warn!("{}: line {} is not valid UTF-8", path.display(), line);
    }
    if report.valid {
        info!("{}: valid UTF-8", path.display());
    } else {
        info!(
            "{}: {} invalid line(s)",
            path.display(),
            report.invalid_lines.len()
        );
    }

    Ok(report)
}
