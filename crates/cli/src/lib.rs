use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub mod commands;
pub mod logging;

/// Canonicalize a path argument if possible, falling back to the given string
/// relative to the current working directory.
pub fn canonicalize_or_current(path: &str) -> Result<PathBuf> {
    let path = Path::new(path);
    if path == Path::new(".") {
        Ok(env::current_dir().context("Failed to get current directory")?)
    } else {
        // Try to canonicalize; if it fails (e.g., path does not exist),
        // join it with the current dir to get an absolute path.
        match path.canonicalize() {
            Ok(p) => Ok(p),
            Err(_) => {
                let cwd = env::current_dir().context("Failed to get current directory")?;
                Ok(cwd.join(path))
            }
        }
    }
}

/// Load the verifier configuration, or the defaults when no file is given.
pub fn load_config(path: Option<&str>) -> Result<jarlink_core::config::VerifierConfig> {
    match path {
        Some(p) => jarlink_core::config::VerifierConfig::load(p)
            .with_context(|| format!("Failed to load config {}", p)),
        None => Ok(jarlink_core::config::VerifierConfig::default()),
    }
}
