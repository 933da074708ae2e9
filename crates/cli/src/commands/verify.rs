use std::path::Path;

use anyhow::{Context, Result};
use jarlink_core::config::VerifierConfig;
use jarlink_core::pairing::verify_workdir;
use jarlink_core::tally::RunLog;

use crate::canonicalize_or_current;
use crate::commands::{print_summary, write_json_report};

/// Run the module and archive stages over every work directory.
///
/// Returns the process exit code: 0 when everything passed, 1 when an archive
/// failed, 2 when only module-level checks failed.
pub fn verify_command(
    workdirs: &[String],
    config: &VerifierConfig,
    json: bool,
    report: Option<&str>,
) -> Result<i32> {
    let mut log = RunLog::new();
    for dir in workdirs {
        let path = canonicalize_or_current(dir)?;
        if !path.is_dir() {
            tracing::warn!("Skipping {}: not a directory", path.display());
            continue;
        }
        verify_workdir(&path, config, &mut log)
            .with_context(|| format!("Failed to verify work directory {}", path.display()))?;
    }

    let summary = log.summary();
    if json {
        let serialized =
            serde_json::to_string_pretty(&summary).context("Failed to serialize run summary")?;
        println!("{}", serialized);
    } else {
        print_summary(&summary);
    }
    if let Some(report) = report {
        write_json_report(Path::new(report), &summary)?;
    }

    Ok(summary.exit_code)
}
