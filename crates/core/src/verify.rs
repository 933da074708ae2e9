//! Structural verification of one (archive, object) pair.
//!
//! The engine compares the class set and the vtables implied by a JAR with the
//! ones declared in the compiled object's symbol dump. Differences are data in
//! the returned [`VerificationResult`], never errors.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::symbols::SymbolUniverse;

/// How vtable entry lists with equal lengths are compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VtableMatch {
    /// Remove from the object entries every value the archive entries contain;
    /// the vtable matches if nothing is left. Uneven duplicate counts can pass.
    #[default]
    Loose,
    /// Exact multiset equality.
    Strict,
}

impl VtableMatch {
    pub fn as_str(&self) -> &'static str {
        match self {
            VtableMatch::Loose => "loose",
            VtableMatch::Strict => "strict",
        }
    }
}

impl fmt::Display for VtableMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VtableMatch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "loose" => Ok(VtableMatch::Loose),
            "strict" => Ok(VtableMatch::Strict),
            other => Err(format!("Invalid vtable match mode '{other}'. Allowed: loose, strict")),
        }
    }
}

/// Outcome of verifying one archive against one compiled object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    /// Identity of the archive (its path as given to the verifier).
    pub artifact_id: String,
    pub passed: bool,
    /// Classes present on only one side; direction is not recorded.
    pub missing_or_extra_classes: BTreeSet<String>,
    /// Archive-side vtable names that are absent, resized or different on the object side.
    pub vtable_mismatches: BTreeSet<String>,
    /// The two class sets have different sizes.
    pub class_count_mismatch: bool,
    /// The two vtable maps have different sizes.
    pub vtable_count_mismatch: bool,
}

impl fmt::Display for VerificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.passed { "PASS" } else { "FAIL" };
        writeln!(f, "{verdict}: {}", self.artifact_id)?;
        if self.class_count_mismatch {
            writeln!(f, "  class count differs between archive and object")?;
        }
        if self.vtable_count_mismatch {
            writeln!(f, "  vtable count differs between archive and object")?;
        }
        if !self.missing_or_extra_classes.is_empty() {
            writeln!(f, "  missing or extra classes ({}):", self.missing_or_extra_classes.len())?;
            for class in &self.missing_or_extra_classes {
                writeln!(f, "    - {class}")?;
            }
        }
        if !self.vtable_mismatches.is_empty() {
            writeln!(f, "  mismatched vtables ({}):", self.vtable_mismatches.len())?;
            for name in &self.vtable_mismatches {
                writeln!(f, "    - {}", name.trim_start())?;
            }
        }
        Ok(())
    }
}

/// Diffs an archive universe against an object universe.
#[derive(Debug, Clone, Copy, Default)]
pub struct VerificationEngine {
    pub vtable_match: VtableMatch,
}

impl VerificationEngine {
    pub fn new(vtable_match: VtableMatch) -> Self {
        Self { vtable_match }
    }

    /// Compare the two universes. Both checks always run so the result lists
    /// every difference, not only the first one.
    pub fn verify(
        &self,
        artifact_id: impl Into<String>,
        archive: &SymbolUniverse,
        object: &SymbolUniverse,
    ) -> VerificationResult {
        let artifact_id = artifact_id.into();

        let class_count_mismatch = archive.class_names.len() != object.class_names.len();
        if class_count_mismatch {
            tracing::info!(
                "Archive and object class counts differ for {}: {} vs {}",
                artifact_id,
                archive.class_names.len(),
                object.class_names.len()
            );
        }
        let missing_or_extra_classes = class_differences(archive, object);

        let vtable_count_mismatch = archive.vtables.len() != object.vtables.len();
        if vtable_count_mismatch {
            tracing::info!(
                "Archive and object vtable counts differ for {}: {} vs {}",
                artifact_id,
                archive.vtables.len(),
                object.vtables.len()
            );
        }
        let vtable_mismatches = self.vtable_differences(archive, object);

        let passed = missing_or_extra_classes.is_empty()
            && vtable_mismatches.is_empty()
            && !class_count_mismatch
            && !vtable_count_mismatch;
        if !passed {
            tracing::error!(
                "Verification of {} failed: {} class and {} vtable differences",
                artifact_id,
                missing_or_extra_classes.len(),
                vtable_mismatches.len()
            );
        }

        VerificationResult {
            artifact_id,
            passed,
            missing_or_extra_classes,
            vtable_mismatches,
            class_count_mismatch,
            vtable_count_mismatch,
        }
    }

    /// Only archive-side names are visited; object-only vtables surface solely
    /// through the count check.
    fn vtable_differences(
        &self,
        archive: &SymbolUniverse,
        object: &SymbolUniverse,
    ) -> BTreeSet<String> {
        let mut mismatches = BTreeSet::new();
        for (name, archive_entries) in &archive.vtables {
            let Some(object_entries) = object.vtables.get(name) else {
                tracing::debug!("Cannot find vtable {} in object", name);
                mismatches.insert(name.clone());
                continue;
            };
            if object_entries.len() != archive_entries.len() {
                tracing::debug!(
                    "Vtable {} has {} entries in archive, {} in object",
                    name,
                    archive_entries.len(),
                    object_entries.len()
                );
                mismatches.insert(name.clone());
                continue;
            }
            if !self.entries_match(archive_entries, object_entries) {
                tracing::debug!("Vtable {} has different content", name);
                mismatches.insert(name.clone());
            }
        }
        mismatches
    }

    fn entries_match(&self, archive_entries: &[String], object_entries: &[String]) -> bool {
        match self.vtable_match {
            VtableMatch::Loose => {
                let mut remaining = object_entries.to_vec();
                remaining.retain(|entry| !archive_entries.contains(entry));
                remaining.is_empty()
            }
            VtableMatch::Strict => {
                let mut a = archive_entries.to_vec();
                let mut b = object_entries.to_vec();
                a.sort();
                b.sort();
                a == b
            }
        }
    }
}

/// Verify with the default (loose) vtable comparison.
pub fn verify(
    artifact_id: impl Into<String>,
    archive: &SymbolUniverse,
    object: &SymbolUniverse,
) -> VerificationResult {
    VerificationEngine::default().verify(artifact_id, archive, object)
}

fn class_differences(archive: &SymbolUniverse, object: &SymbolUniverse) -> BTreeSet<String> {
    let mut differences = BTreeSet::new();
    for class in archive.class_names.difference(&object.class_names) {
        tracing::debug!("Found missing class: {}", class);
        differences.insert(class.clone());
    }
    for class in object.class_names.difference(&archive.class_names) {
        tracing::debug!("Found redundant class: {}", class);
        differences.insert(class.clone());
    }
    differences
}
