//! Class listing for JAR archives.

use std::collections::BTreeSet;
use std::fs::File;
use std::path::Path;

use zip::ZipArchive;

use crate::error::{VerifyError, VerifyResult};
use crate::mangle::mangle_class_symbol;

const CLASS_FILE_EXTENSION: &str = ".class";

/// Convert a `.class` entry path to a dotted class name.
///
/// Returns `None` for anything that is not a class file entry.
///
/// ```
/// use jarlink_core::archive::class_name_from_entry;
/// let name = class_name_from_entry("com/example/Foo$Bar.class");
/// assert_eq!(name.as_deref(), Some("com.example.Foo$Bar"));
/// assert_eq!(class_name_from_entry("META-INF/MANIFEST.MF"), None);
/// ```
pub fn class_name_from_entry(entry: &str) -> Option<String> {
    if entry.ends_with('/') || !entry.ends_with(CLASS_FILE_EXTENSION) {
        return None;
    }
    let stem = &entry[..entry.len() - CLASS_FILE_EXTENSION.len()];
    Some(stem.replace('/', "."))
}

/// List the dotted names of every `.class` entry in the archive, in entry order.
///
/// Entry data is never decompressed or decrypted.
pub fn list_archive_class_names(path: impl AsRef<Path>) -> VerifyResult<Vec<String>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| VerifyError::from_io(path, e))?;
    let archive_err = |source| VerifyError::Archive { path: path.to_path_buf(), source };
    let mut archive = ZipArchive::new(file).map_err(archive_err)?;

    let mut names = Vec::new();
    for idx in 0..archive.len() {
        let entry = archive.by_index_raw(idx).map_err(archive_err)?;
        if entry.is_dir() {
            continue;
        }
        if let Some(name) = class_name_from_entry(entry.name()) {
            names.push(name);
        }
    }
    tracing::debug!("{} classes found in {}", names.len(), path.display());
    Ok(names)
}

/// Mangled class symbols for every class in the archive.
pub fn archive_class_symbols(path: impl AsRef<Path>) -> VerifyResult<BTreeSet<String>> {
    Ok(list_archive_class_names(path)?.iter().map(|name| mangle_class_symbol(name)).collect())
}
