//! Whole-file line readers.
//!
//! Every reader reports a missing file as [`VerifyError::NotFound`] so callers
//! can tell "not produced" apart from "unreadable".

use std::fs;
use std::path::Path;

use crate::error::{VerifyError, VerifyResult};

/// Properties-style key the build writes in front of module lists.
pub const LIBRARIES_KEY: &str = "libraries=";

/// Read a file as raw lines (line terminators stripped, nothing else touched).
pub fn read_lines(path: impl AsRef<Path>) -> VerifyResult<Vec<String>> {
    let path = path.as_ref();
    let body = fs::read_to_string(path).map_err(|e| VerifyError::from_io(path, e))?;
    Ok(body.lines().map(str::to_string).collect())
}

/// Read a list file: one item per line, trimmed, blank lines dropped.
///
/// Occurrences of `libraries=` on the first line are removed.
pub fn read_list_file(path: impl AsRef<Path>) -> VerifyResult<Vec<String>> {
    let lines = read_lines(path)?;
    Ok(lines
        .iter()
        .enumerate()
        .map(|(idx, line)| if idx == 0 { line.replace(LIBRARIES_KEY, "") } else { line.clone() })
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect())
}

/// Read a list whose items are joined by `separator` rather than newlines.
///
/// Lines are concatenated, the first `libraries=` is removed, and blank items dropped.
pub fn read_separated_list(path: impl AsRef<Path>, separator: &str) -> VerifyResult<Vec<String>> {
    let joined = read_list_file(path)?.concat();
    let joined = joined.replacen(LIBRARIES_KEY, "", 1);
    if separator.is_empty() {
        return Ok(if joined.trim().is_empty() { Vec::new() } else { vec![joined] });
    }
    Ok(joined
        .split(separator)
        .filter(|item| !item.trim().is_empty())
        .map(str::to_string)
        .collect())
}
