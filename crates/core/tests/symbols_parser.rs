use std::collections::BTreeMap;

use jarlink_core::symbols::{parse_prefixed_list, read_prefixed_list, SymbolUniverse};
use jarlink_core::{ParseError, VerifyError};
use tempfile::tempdir;

fn vtables(entries: &[(&str, &[&str])]) -> BTreeMap<String, Vec<String>> {
    entries
        .iter()
        .map(|(name, slots)| (name.to_string(), slots.iter().map(|s| s.to_string()).collect()))
        .collect()
}

#[test]
fn class_declarations_keep_file_order() {
    let list = parse_prefixed_list([":0:A", ":0:B"]).expect("parse");
    assert_eq!(list.class_names, vec!["A", "B"]);
    assert!(list.vtables.is_empty());
}

#[test]
fn vtable_blocks_collect_indented_entries() {
    let input = "_ZTV1A\n\tfoo\n\tbar\n_ZTV1B\n\tbaz";
    let list = parse_prefixed_list(input.lines()).expect("parse");
    assert_eq!(list.vtables, vtables(&[("_ZTV1A", &["foo", "bar"]), ("_ZTV1B", &["baz"])]));
    assert!(list.class_names.is_empty());
}

#[test]
fn tab_prefixed_marker_starts_block_and_keeps_full_text_as_name() {
    let list = parse_prefixed_list(["\t_ZTV1A", "\tfoo"]).expect("parse");
    assert_eq!(list.vtables, vtables(&[("\t_ZTV1A", &["foo"])]));
}

#[test]
fn only_one_leading_character_is_stripped_from_entries() {
    let list = parse_prefixed_list(["_ZTV1A", "  spaced", "\t\ttabbed"]).expect("parse");
    assert_eq!(list.vtables["_ZTV1A"], vec![" spaced", "\ttabbed"]);
}

#[test]
fn blank_and_comment_lines_are_ignored() {
    let input = [
        "# symbol dump",
        "",
        "   ",
        ":3:_ZN1A6class$E",
        "_ZTV1A",
        "\tfoo",
        "",
        "trailing comment",
        "\tbar",
    ];
    let list = parse_prefixed_list(input).expect("parse");
    assert_eq!(list.class_names, vec!["_ZN1A6class$E"]);
    assert_eq!(list.vtables["_ZTV1A"], vec!["foo", "bar"]);
}

#[test]
fn declarations_and_vtables_interleave() {
    let input = [":0:A", "_ZTV1A", "\tfoo", ":0:B", "\tbar"];
    let list = parse_prefixed_list(input).expect("parse");
    assert_eq!(list.class_names, vec!["A", "B"]);
    assert_eq!(list.vtables["_ZTV1A"], vec!["foo", "bar"]);
}

#[test]
fn colon_space_declaration_records_text_after_two_chars() {
    let list = parse_prefixed_list([": _ZN3com3Foo6class$E"]).expect("parse");
    assert_eq!(list.class_names, vec!["_ZN3com3Foo6class$E"]);
}

#[test]
fn duplicate_vtable_name_keeps_last_block() {
    let input = ["_ZTV1A", "\tfirst", "_ZTV1A", "\tsecond", "\tthird"];
    let list = parse_prefixed_list(input).expect("parse");
    assert_eq!(list.vtables.len(), 1);
    assert_eq!(list.vtables["_ZTV1A"], vec!["second", "third"]);
}

#[test]
fn empty_vtable_block_is_recorded() {
    let list = parse_prefixed_list(["_ZTV1A", "_ZTV1B", "\tx"]).expect("parse");
    assert_eq!(list.vtables["_ZTV1A"], Vec::<String>::new());
    assert_eq!(list.vtables["_ZTV1B"], vec!["x"]);
}

#[test]
fn entry_before_any_marker_is_a_parse_error() {
    let err = parse_prefixed_list([":0:A", "\torphan", "_ZTV1A"]).unwrap_err();
    assert_eq!(err, ParseError::OrphanEntry { line: 2, text: "\torphan".to_string() });
}

#[test]
fn read_prefixed_list_reports_missing_file() {
    let tmp = tempdir().unwrap();
    let missing = tmp.path().join("absent.o.W.list");
    match read_prefixed_list(&missing) {
        Err(VerifyError::NotFound { path }) => assert_eq!(path, missing),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn read_prefixed_list_wraps_parse_errors_with_path() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("bad.o.W.list");
    std::fs::write(&path, " orphan\n").unwrap();
    let err = read_prefixed_list(&path).unwrap_err();
    assert!(matches!(err, VerifyError::Parse { .. }), "unexpected error: {err}");
    assert!(err.to_string().contains("bad.o.W.list"));
}

#[test]
fn read_prefixed_list_handles_crlf_files() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("dump.o.W.list");
    std::fs::write(&path, ":0:A\r\n_ZTV1A\r\n\tfoo\r\n").unwrap();
    let list = read_prefixed_list(&path).expect("read");
    assert_eq!(list.class_names, vec!["A"]);
    assert_eq!(list.vtables["_ZTV1A"], vec!["foo"]);
}

#[test]
fn universe_from_list_deduplicates_classes() {
    let list = parse_prefixed_list([":0:A", ":0:A", ":0:B"]).expect("parse");
    let universe = SymbolUniverse::from(list);
    assert_eq!(universe.class_names.len(), 2);
}

/// Declarations are recorded even when the name is not shaped like a class symbol.
#[test]
fn non_class_declarations_are_still_recorded() {
    let list = parse_prefixed_list([": _ZN3Foo6class$E", ":3:Bar"]).expect("parse");
    assert_eq!(list.class_names, vec!["_ZN3Foo6class$E", "Bar"]);
}
