use std::fs;

use jarlink::commands::format_rate;
use jarlink::{canonicalize_or_current, load_config};
use jarlink_core::verify::VtableMatch;
use tempfile::tempdir;

#[test]
fn canonicalize_or_current_returns_cwd_for_dot() {
    let original = std::env::current_dir().expect("cwd");
    let tmp = tempdir().expect("tempdir");
    std::env::set_current_dir(tmp.path()).expect("chdir tmp");

    let result = canonicalize_or_current(".").expect("canonicalize").canonicalize().expect("canon");
    let expected = tmp.path().canonicalize().expect("canon tmp");
    assert_eq!(result, expected);

    std::env::set_current_dir(original).expect("restore cwd");
}

#[test]
fn canonicalize_or_current_keeps_missing_paths_absolute() {
    let result = canonicalize_or_current("does/not/exist").expect("joined");
    assert!(result.is_absolute());
    assert!(result.ends_with("does/not/exist"));
}

#[test]
fn load_config_defaults_without_path() {
    let config = load_config(None).expect("defaults");
    assert_eq!(config.vtable_match, VtableMatch::Loose);
    assert_eq!(config.suffixes.object_list, ".W.list");
}

#[test]
fn load_config_reads_yaml_overrides() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("jarlink.yaml");
    fs::write(&path, "vtable_match: strict\nlog_level: debug\n").unwrap();

    let config = load_config(Some(path.to_str().unwrap())).expect("load");
    assert_eq!(config.vtable_match, VtableMatch::Strict);
    assert_eq!(config.log_level.as_deref(), Some("debug"));
    assert_eq!(config.suffixes.vtable_list, ".vtable");
}

#[test]
fn load_config_reports_path_on_failure() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("missing.yaml");
    let err = load_config(Some(path.to_str().unwrap())).unwrap_err();
    assert!(err.to_string().contains("Failed to load config"), "unexpected error: {err}");
}

#[test]
fn format_rate_handles_empty_tallies() {
    assert_eq!(format_rate(None), "n/a");
    assert_eq!(format_rate(Some(0.5)), "0.5000");
    assert_eq!(format_rate(Some(1.0)), "1.0000");
}
