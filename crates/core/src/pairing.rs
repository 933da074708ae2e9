//! Module discovery and the two-stage verification run.
//!
//! A work directory holds, per build module, a list of the JARs that went into
//! it (`<module>.lib.list`) and a list of the objects the compiler produced
//! (`<module>.lib.output.list`). The first stage checks that the two lists
//! correspond one to one; the second stage verifies every matched
//! (JAR, object) pair with the [`VerificationEngine`].

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::archive::archive_class_symbols;
use crate::config::VerifierConfig;
use crate::error::{VerifyError, VerifyResult};
use crate::symbols::{read_list_file, read_prefixed_list, read_separated_list, SymbolUniverse};
use crate::tally::{PairFailure, RunLog};
use crate::verify::{VerificationEngine, VerificationResult};

const OBJECT_EXTENSION: &str = ".o";

/// One archive and the object file compiled from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactPair {
    pub archive: PathBuf,
    /// Object path; the symbol dump and vtable list live next to it under fixed suffixes.
    pub object: PathBuf,
}

impl ArtifactPair {
    pub fn new(archive: impl Into<PathBuf>, object: impl Into<PathBuf>) -> Self {
        Self { archive: archive.into(), object: object.into() }
    }

    /// Identity used for tallying; one verdict per archive path.
    pub fn id(&self) -> String {
        self.archive.display().to_string()
    }
}

/// Object file name the compiler emits for a JAR: every `.` of the JAR's file
/// name becomes `-`, then `.o` is appended (`foo-1.0.jar` -> `foo-1-0-jar.o`).
pub fn expected_object_name(jar: impl AsRef<Path>) -> String {
    format!("{}{}", base_name(jar.as_ref()).replace('.', "-"), OBJECT_EXTENSION)
}

fn base_name(path: &Path) -> String {
    path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default()
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut joined: OsString = path.as_os_str().to_owned();
    joined.push(suffix);
    PathBuf::from(joined)
}

/// Build the archive-side and object-side universes for a pair.
///
/// The archive side takes its classes from the JAR itself and its vtables from
/// the `.vtable` list; the object side is the `.W.list` symbol dump.
pub fn load_universes(
    pair: &ArtifactPair,
    config: &VerifierConfig,
) -> VerifyResult<(SymbolUniverse, SymbolUniverse)> {
    let object_list = read_prefixed_list(with_suffix(&pair.object, &config.suffixes.object_list))?;
    let vtable_list = read_prefixed_list(with_suffix(&pair.object, &config.suffixes.vtable_list))?;
    let archive_classes = archive_class_symbols(&pair.archive)?;

    let archive = SymbolUniverse { class_names: archive_classes, vtables: vtable_list.vtables };
    Ok((archive, SymbolUniverse::from(object_list)))
}

/// Verify one pair. IO and parse failures are returned; differences are in the result.
pub fn verify_pair(
    pair: &ArtifactPair,
    config: &VerifierConfig,
) -> VerifyResult<VerificationResult> {
    let (archive, object) = load_universes(pair, config)?;
    Ok(VerificationEngine::new(config.vtable_match).verify(pair.id(), &archive, &object))
}

/// Verify every pair, recording verdicts into `log`.
///
/// Archives that already have a verdict are skipped. A pair that cannot be
/// evaluated is recorded as failing and the run moves on.
pub fn run_verification(pairs: &[ArtifactPair], config: &VerifierConfig, log: &mut RunLog) {
    for pair in pairs {
        let id = pair.id();
        if log.archives.contains(&id) {
            tracing::debug!("Skipping {}: already verified", id);
            continue;
        }
        tracing::info!("Verifying {} and {}", pair.archive.display(), pair.object.display());
        match verify_pair(pair, config) {
            Ok(result) => {
                if result.passed {
                    tracing::info!("Archive verification passed: {}", id);
                }
                log.record_result(result);
            }
            Err(err) => {
                tracing::error!("Cannot verify {}: {}", id, err);
                log.record_error(PairFailure {
                    archive: id,
                    object: Some(pair.object.display().to_string()),
                    message: err.to_string(),
                });
            }
        }
    }
}

/// Module list files found in one work directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleInventory {
    /// Module name to the JAR paths it was built from.
    pub jar_lists: BTreeMap<String, Vec<String>>,
    /// Module name to the object paths produced for it.
    pub object_lists: BTreeMap<String, Vec<String>>,
    /// Loose `.o` files seen in the directory.
    pub object_files: Vec<PathBuf>,
    /// Modules whose JAR or object list could not be read, with the reason.
    pub unreadable: BTreeMap<String, String>,
}

/// Read a module list, honouring the configured separator.
pub fn read_module_list(path: &Path, config: &VerifierConfig) -> VerifyResult<Vec<String>> {
    match config.list_separator.as_deref() {
        Some(separator) => read_separated_list(path, separator),
        None => read_list_file(path),
    }
}

/// Scan `dir` (not recursively) for module list files.
///
/// Entries that name directories are dropped from every list. A list that
/// cannot be read lands in [`ModuleInventory::unreadable`]; only failing to
/// read `dir` itself is an error.
pub fn discover_modules(dir: &Path, config: &VerifierConfig) -> VerifyResult<ModuleInventory> {
    let mut inventory = ModuleInventory::default();
    let entries = fs::read_dir(dir).map_err(|e| VerifyError::from_io(dir, e))?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| VerifyError::from_io(dir, e))?;
        let path = entry.path();
        if path.is_dir() {
            tracing::info!("Not entering the directory: {}", path.display());
            continue;
        }
        paths.push(path);
    }
    paths.sort();

    let suffixes = &config.suffixes;
    for path in paths {
        let name = base_name(&path);
        let object_module = name.strip_suffix(&suffixes.object_output_list);
        let (module, lists) = if let Some(module) = object_module {
            (module, &mut inventory.object_lists)
        } else if let Some(module) = name.strip_suffix(&suffixes.jar_list) {
            (module, &mut inventory.jar_lists)
        } else {
            if name.ends_with(OBJECT_EXTENSION) {
                inventory.object_files.push(path);
            }
            continue;
        };
        match read_module_list(&path, config) {
            Ok(items) => {
                lists.insert(module.to_string(), items);
            }
            Err(err) => {
                tracing::error!("Cannot read module list {}: {}", path.display(), err);
                inventory.unreadable.insert(module.to_string(), err.to_string());
            }
        }
    }

    for list in inventory.jar_lists.values_mut().chain(inventory.object_lists.values_mut()) {
        list.retain(|item| !Path::new(item).is_dir());
    }
    Ok(inventory)
}

/// Outcome of the module-level (first stage) check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleCheck {
    pub module: String,
    pub passed: bool,
    pub problems: Vec<String>,
    /// Matched pairs; only populated when the module passed.
    pub pairs: Vec<ArtifactPair>,
    /// JARs with no object of the expected name.
    pub unmatched_jars: Vec<String>,
}

/// Check that a module's objects correspond one to one with its JARs.
pub fn check_module(module: &str, jars: Option<&[String]>, objects: &[String]) -> ModuleCheck {
    let mut check = ModuleCheck {
        module: module.to_string(),
        passed: false,
        problems: Vec::new(),
        pairs: Vec::new(),
        unmatched_jars: Vec::new(),
    };

    let Some(jars) = jars else {
        check.problems.push("missing JAR list for module".to_string());
        return check;
    };

    let count_mismatch = jars.len() != objects.len();
    if count_mismatch {
        check.problems.push(format!(
            "JAR count {} differs from object count {}",
            jars.len(),
            objects.len()
        ));
    }

    let expected: Vec<String> = jars.iter().map(expected_object_name).collect();
    for object in objects {
        let name = base_name(Path::new(object));
        if !expected.contains(&name) {
            check.problems.push(format!("outstanding object lacking JAR counterpart: {name}"));
        }
    }
    if !check.problems.is_empty() {
        return check;
    }

    check.passed = true;
    for (jar, name) in jars.iter().zip(&expected) {
        match objects.iter().find(|o| &base_name(Path::new(o.as_str())) == name) {
            Some(object) => check.pairs.push(ArtifactPair::new(jar, object)),
            None => check.unmatched_jars.push(jar.clone()),
        }
    }
    check
}

/// Run both stages over one work directory.
pub fn verify_workdir(dir: &Path, config: &VerifierConfig, log: &mut RunLog) -> VerifyResult<()> {
    tracing::info!("Walking in {}", dir.display());
    let inventory = discover_modules(dir, config)?;

    let total_size: u64 = inventory
        .jar_lists
        .values()
        .flatten()
        .filter_map(|jar| fs::metadata(jar).ok())
        .map(|meta| meta.len())
        .sum();
    tracing::info!("Got JAR list count: {}", inventory.jar_lists.len());
    tracing::info!(
        "Total size of all related JARs: {} bytes, or {:.2} MB",
        total_size,
        total_size as f64 / 1024.0 / 1024.0
    );
    tracing::info!("Got object list count: {}", inventory.object_lists.len());
    tracing::debug!("Loose object files: {}", inventory.object_files.len());

    for (module, reason) in &inventory.unreadable {
        tracing::info!("Module {}: unreadable list: {}", module, reason);
        log.modules.record(module.clone(), false);
    }

    for (module, objects) in &inventory.object_lists {
        if log.modules.contains(module) {
            tracing::debug!("Skipping module {}: already checked", module);
            continue;
        }
        let jars = inventory.jar_lists.get(module).map(Vec::as_slice);
        let check = check_module(module, jars, objects);
        for problem in &check.problems {
            tracing::info!("Module {}: {}", module, problem);
        }
        log.modules.record(module.clone(), check.passed);
        if !check.passed {
            continue;
        }

        tracing::info!("Passing module-level check: {}", module);
        for jar in &check.unmatched_jars {
            tracing::error!("No object matches {} in module {}", jar, module);
            log.record_error(PairFailure {
                archive: jar.clone(),
                object: None,
                message: format!(
                    "no object named {} in module {}",
                    expected_object_name(jar),
                    module
                ),
            });
        }
        run_verification(&check.pairs, config, log);
    }
    Ok(())
}
