//! Pass/fail bookkeeping for a verification run.
//!
//! Tallies are owned by whoever drives the run and passed by `&mut` into the
//! pairing layer. They are append-only: an identity gets at most one verdict.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::verify::VerificationResult;

/// Exit status when at least one archive failed verification.
pub const EXIT_ARCHIVE_FAILURE: i32 = 1;

/// Exit status when every archive passed but a module-level check failed.
pub const EXIT_MODULE_FAILURE: i32 = 2;

/// Ordered passing and failing identities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    passing: Vec<String>,
    failing: Vec<String>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `id` already has a verdict.
    pub fn contains(&self, id: &str) -> bool {
        self.passing.iter().any(|p| p == id) || self.failing.iter().any(|f| f == id)
    }

    /// Record a verdict. Returns `false` (and records nothing) when `id` already has one.
    pub fn record(&mut self, id: impl Into<String>, passed: bool) -> bool {
        let id = id.into();
        if self.contains(&id) {
            return false;
        }
        if passed {
            self.passing.push(id);
        } else {
            self.failing.push(id);
        }
        true
    }

    pub fn passing(&self) -> &[String] {
        &self.passing
    }

    pub fn failing(&self) -> &[String] {
        &self.failing
    }

    pub fn total(&self) -> usize {
        self.passing.len() + self.failing.len()
    }

    /// Fraction of passing verdicts, or `None` when nothing was recorded.
    pub fn pass_rate(&self) -> Option<f64> {
        match self.total() {
            0 => None,
            total => Some(self.passing.len() as f64 / total as f64),
        }
    }

    /// An empty tally counts as passing.
    pub fn all_passed(&self) -> bool {
        self.failing.is_empty()
    }

    pub fn stats(&self) -> TallyStats {
        TallyStats {
            passing: self.passing.len(),
            failing: self.failing.len(),
            pass_rate: self.pass_rate(),
            failing_ids: self.failing.clone(),
        }
    }
}

/// A pair that could not be evaluated at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairFailure {
    pub archive: String,
    pub object: Option<String>,
    pub message: String,
}

/// Everything a run accumulates: archive-level and module-level verdicts,
/// per-pair results, and pairs that errored out.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunLog {
    pub archives: Tally,
    pub modules: Tally,
    pub results: Vec<VerificationResult>,
    pub errors: Vec<PairFailure>,
}

impl RunLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished verification. Returns `false` if the archive already had a verdict.
    pub fn record_result(&mut self, result: VerificationResult) -> bool {
        if !self.archives.record(result.artifact_id.clone(), result.passed) {
            return false;
        }
        self.results.push(result);
        true
    }

    /// Record a pair that could not be evaluated; the archive counts as failing.
    pub fn record_error(&mut self, failure: PairFailure) -> bool {
        if !self.archives.record(failure.archive.clone(), false) {
            return false;
        }
        self.errors.push(failure);
        true
    }

    /// Process exit status for this run.
    pub fn exit_code(&self) -> i32 {
        if !self.archives.all_passed() {
            EXIT_ARCHIVE_FAILURE
        } else if !self.modules.all_passed() {
            EXIT_MODULE_FAILURE
        } else {
            0
        }
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            generated_at: Utc::now().to_rfc3339(),
            archives: self.archives.stats(),
            modules: self.modules.stats(),
            results: self.results.clone(),
            errors: self.errors.clone(),
            exit_code: self.exit_code(),
        }
    }
}

/// Counts for one tally, as reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TallyStats {
    pub passing: usize,
    pub failing: usize,
    pub pass_rate: Option<f64>,
    pub failing_ids: Vec<String>,
}

/// Serializable snapshot of a finished run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub generated_at: String,
    pub archives: TallyStats,
    pub modules: TallyStats,
    pub results: Vec<VerificationResult>,
    pub errors: Vec<PairFailure>,
    pub exit_code: i32,
}
