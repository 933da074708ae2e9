//! Prefixed-list symbol dumps.
//!
//! The compiler toolchain dumps the symbols of an object file as a small
//! line-oriented text format:
//!
//! ```text
//! :<len>:<ClassName>          declares one class
//! _ZTV<mangled-vtable-name>   begins a vtable block (may be tab-prefixed)
//! \t<entry>                   one virtual-slot target per line
//! ```
//!
//! Any other non-blank line is a comment and ignored. The same format is used
//! for the JAR-side `.vtable` list, so both universes go through one parser.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ParseError, VerifyError, VerifyResult};
use crate::mangle::is_class_symbol;

pub mod reader;
pub mod transform;

pub use reader::{read_lines, read_list_file, read_separated_list};
pub use transform::{transform_dump, transform_dump_file};

/// Marker that starts a vtable block.
pub const VTABLE_MARKER: &str = "_ZTV";

/// Output of [`parse_prefixed_list`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixedList {
    /// Vtable name (the marker line, verbatim) to its ordered slot targets.
    pub vtables: BTreeMap<String, Vec<String>>,
    /// Declared class names in file order.
    pub class_names: Vec<String>,
}

/// Classes and vtables of one side of a verification.
///
/// Built fresh for every verification call and dropped once the diff is computed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolUniverse {
    pub class_names: BTreeSet<String>,
    pub vtables: BTreeMap<String, Vec<String>>,
}

impl SymbolUniverse {
    pub fn new(
        class_names: impl IntoIterator<Item = String>,
        vtables: BTreeMap<String, Vec<String>>,
    ) -> Self {
        Self { class_names: class_names.into_iter().collect(), vtables }
    }
}

impl From<PrefixedList> for SymbolUniverse {
    fn from(list: PrefixedList) -> Self {
        SymbolUniverse::new(list.class_names, list.vtables)
    }
}

/// Parse a prefixed symbol list.
///
/// Fails with [`ParseError::OrphanEntry`] when an indented entry shows up
/// before the first vtable marker. Duplicate vtable names keep the last block.
pub fn parse_prefixed_list<I, S>(lines: I) -> Result<PrefixedList, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = PrefixedList::default();
    let mut current: Option<(String, Vec<String>)> = None;

    for (idx, line) in lines.into_iter().enumerate() {
        let line = line.as_ref();
        if line.trim().is_empty() {
            continue;
        }

        if line.starts_with(VTABLE_MARKER) || line.strip_prefix('\t').is_some_and(is_marker) {
            if let Some((name, entries)) = current.take() {
                flush(&mut out.vtables, name, entries);
            }
            current = Some((line.to_string(), Vec::new()));
        } else if line.starts_with(' ') || line.starts_with('\t') {
            let Some((_, entries)) = current.as_mut() else {
                return Err(ParseError::OrphanEntry { line: idx + 1, text: line.to_string() });
            };
            entries.push(line[1..].to_string());
        } else if line.starts_with(':') {
            let name = declared_class_name(line);
            if !is_class_symbol(name) {
                tracing::debug!("line {}: declared name {:?} is not a class symbol", idx + 1, name);
            }
            out.class_names.push(name.to_string());
        }
    }

    if let Some((name, entries)) = current {
        flush(&mut out.vtables, name, entries);
    }
    Ok(out)
}

/// Read and parse a prefixed list from disk.
pub fn read_prefixed_list(path: impl AsRef<Path>) -> VerifyResult<PrefixedList> {
    let path = path.as_ref();
    let lines = read_lines(path)?;
    let list = parse_prefixed_list(&lines)
        .map_err(|source| VerifyError::Parse { path: path.to_path_buf(), source })?;
    tracing::trace!(
        path = %path.display(),
        classes = list.class_names.len(),
        vtables = list.vtables.len(),
        "parsed prefixed list"
    );
    Ok(list)
}

fn is_marker(rest: &str) -> bool {
    rest.starts_with(VTABLE_MARKER)
}

fn flush(vtables: &mut BTreeMap<String, Vec<String>>, name: String, entries: Vec<String>) {
    if vtables.contains_key(&name) {
        tracing::debug!("vtable {} declared more than once; keeping the last block", name);
    }
    vtables.insert(name, entries);
}

/// Name carried by a `:`-prefixed declaration line.
///
/// `:<digits>:<name>` yields `<name>`; any other shape yields the text after
/// the first two characters.
fn declared_class_name(line: &str) -> &str {
    if let Some((len, name)) = line[1..].split_once(':') {
        if !len.is_empty() && len.bytes().all(|b| b.is_ascii_digit()) {
            return name;
        }
    }
    line.char_indices().nth(2).map(|(i, _)| &line[i..]).unwrap_or("")
}
