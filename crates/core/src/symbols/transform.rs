//! Conversion of raw object dumps into the prefixed-list format.
//!
//! The IR dumper prints every symbol of an object as an indexed record:
//!
//! ```text
//! [12]: _ZTVN3com7example3FooE [0x1000, 24]
//!  SYMOFF: _ZN3com7example3Foo3runEv [0,8]
//!  ENDBLOCK
//! [13]: _ZN3com7example3Foo6class$E [0x2000, 8]
//! ```
//!
//! A `_ZTV` record opens a vtable block whose `SYMOFF` lines become entries
//! until `ENDBLOCK`. Any record naming a `class$E` symbol becomes a `: <sym>`
//! declaration. Everything else is dropped.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::VerifyResult;
use crate::symbols::read_lines;

static VTABLE_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[[0-9]*\]: (_ZTV.*) \[.*\]").expect("vtable start regex")
});
static VTABLE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ ENDBLOCK").expect("vtable end regex"));
static VTABLE_SLOT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ SYMOFF: (_ZN.*) \[[0-9,]*\]").expect("vtable slot regex")
});
static CLASS_RECORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[[0-9]*\]: (_ZN.*class\$E.*) \[.*\]").expect("class record regex")
});

/// Convert dump lines into prefixed-list lines.
///
/// `SYMOFF` lines outside a vtable block are ignored, as are `_ZTV` records
/// inside one (blocks do not nest).
pub fn transform_dump<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = Vec::new();
    let mut in_vtable = false;

    for line in lines {
        let line = line.as_ref();

        if let Some(caps) = CLASS_RECORD.captures(line) {
            out.push(format!(": {}", caps[1].trim()));
        }

        if !in_vtable {
            if let Some(caps) = VTABLE_START.captures(line) {
                in_vtable = true;
                out.push(caps[1].trim().to_string());
            }
        } else if VTABLE_END.is_match(line) {
            in_vtable = false;
        } else if let Some(caps) = VTABLE_SLOT.captures(line) {
            out.push(format!(" {}", caps[1].trim()));
        }
    }

    if in_vtable {
        tracing::debug!("dump ended inside a vtable block");
    }
    out
}

/// Read a dump file and convert it.
pub fn transform_dump_file(path: impl AsRef<Path>) -> VerifyResult<Vec<String>> {
    let path = path.as_ref();
    let out = transform_dump(read_lines(path)?);
    tracing::debug!("{} prefixed-list lines from {}", out.len(), path.display());
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_symbol_stops_before_offset_list() {
        let out = transform_dump([
            "[1]: _ZTVN1AE [0x10, 16]",
            " SYMOFF: _ZN1A1fEv [0,8] extra",
            " ENDBLOCK",
        ]);
        assert_eq!(out, vec!["_ZTVN1AE", " _ZN1A1fEv"]);
    }

    #[test]
    fn class_records_are_taken_inside_vtable_blocks() {
        let out = transform_dump([
            "[1]: _ZTVN1AE [0x10, 16]",
            "[2]: _ZN1A6class$E [0x20, 8]",
            " SYMOFF: _ZN1A1fEv [0,8]",
            " ENDBLOCK",
        ]);
        assert_eq!(out, vec!["_ZTVN1AE", ": _ZN1A6class$E", " _ZN1A1fEv"]);
    }
}
