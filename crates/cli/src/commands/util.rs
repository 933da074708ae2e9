use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use jarlink_core::tally::{RunSummary, TallyStats};

/// Render a pass rate; a stage with no verdicts has no rate.
pub fn format_rate(rate: Option<f64>) -> String {
    match rate {
        Some(r) => format!("{:.4}", r),
        None => "n/a".to_string(),
    }
}

fn print_stage(title: &str, stats: &TallyStats) {
    println!("-------------------------------------");
    println!(" {title}");
    println!("-------------------------------------");
    println!("Overall passing rate: {}", format_rate(stats.pass_rate));
    println!("Overall passing count: {}", stats.passing);
    println!("Overall failing count: {}", stats.failing);
    for id in &stats.failing_ids {
        println!("  - FAIL {id}");
    }
}

/// Print the human-readable run summary to stdout.
pub fn print_summary(summary: &RunSummary) {
    for result in summary.results.iter().filter(|r| !r.passed) {
        print!("{result}");
    }
    for error in &summary.errors {
        println!("ERROR: {}: {}", error.archive, error.message);
    }
    print_stage("Archive / Object Level Verify", &summary.archives);
    print_stage("Module Level Verify", &summary.modules);
}

/// Write a JSON report to `path`.
pub fn write_json_report(path: &Path, summary: &RunSummary) -> Result<()> {
    let json = serde_json::to_string_pretty(summary).context("Failed to serialize run summary")?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write report: {}", path.display()))?;
    Ok(())
}
