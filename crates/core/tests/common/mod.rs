#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Class file magic; the verifier never looks past the entry name.
pub const CLASS_BYTES: &[u8] = b"\xca\xfe\xba\xbe";

pub fn stored() -> SimpleFileOptions {
    SimpleFileOptions::default().compression_method(CompressionMethod::Stored)
}

/// Write a JAR with the given raw entry paths. Paths ending in `/` become directories.
pub fn write_jar(path: &Path, entries: &[&str]) {
    let mut zip = ZipWriter::new(File::create(path).expect("create jar"));
    for entry in entries {
        if entry.ends_with('/') {
            zip.add_directory(entry.trim_end_matches('/'), stored()).expect("add dir");
        } else {
            zip.start_file(*entry, stored()).expect("start file");
            zip.write_all(CLASS_BYTES).expect("write entry");
        }
    }
    zip.finish().expect("finish jar");
}

/// Write a JAR holding one `.class` entry per dotted class name.
pub fn write_class_jar(path: &Path, classes: &[&str]) {
    let entries: Vec<String> =
        classes.iter().map(|class| format!("{}.class", class.replace('.', "/"))).collect();
    let entries: Vec<&str> = entries.iter().map(String::as_str).collect();
    write_jar(path, &entries);
}
