use std::fs;

use anyhow::{Context, Result};
use jarlink_core::archive::list_archive_class_names;
use jarlink_core::mangle::mangle_class_symbol;
use jarlink_core::symbols::{read_prefixed_list, transform_dump_file};

/// Print the class symbol of every given class name, one per line.
pub fn mangle_command(names: &[String]) -> Result<()> {
    for name in names {
        println!("{}", mangle_class_symbol(name));
    }
    Ok(())
}

/// List the classes in a JAR, optionally as mangled symbols.
pub fn list_classes_command(jar: &str, mangled: bool) -> Result<()> {
    let names = list_archive_class_names(jar)
        .with_context(|| format!("Failed to list classes in {}", jar))?;
    for name in names {
        if mangled {
            println!("{}\t{}", mangle_class_symbol(&name), name);
        } else {
            println!("{}", name);
        }
    }
    Ok(())
}

/// Parse a prefixed symbol list and print what it declares.
pub fn dump_list_command(path: &str, json: bool) -> Result<()> {
    let list =
        read_prefixed_list(path).with_context(|| format!("Failed to read symbol list {}", path))?;

    if json {
        let serialized =
            serde_json::to_string_pretty(&list).context("Failed to serialize symbol list")?;
        println!("{}", serialized);
        return Ok(());
    }

    println!("Classes ({}):", list.class_names.len());
    for class in &list.class_names {
        println!("  - {}", class);
    }
    println!("Vtables ({}):", list.vtables.len());
    for (name, entries) in &list.vtables {
        println!("  {} [{} entries]", name.trim_start(), entries.len());
        for entry in entries {
            println!("    {}", entry);
        }
    }
    Ok(())
}

/// Convert a raw IR dump into a prefixed list, to `output` or stdout.
pub fn transform_command(input: &str, output: Option<&str>) -> Result<()> {
    let lines = transform_dump_file(input)
        .with_context(|| format!("Failed to transform dump {}", input))?;
    let mut body = lines.join("\n");
    if !body.is_empty() {
        body.push('\n');
    }

    match output {
        Some(path) => {
            fs::write(path, body).with_context(|| format!("Failed to write {}", path))?;
            tracing::info!("Wrote {} lines to {}", lines.len(), path);
        }
        None => print!("{}", body),
    }
    Ok(())
}
