use anyhow::Result;
use clap::{Parser, Subcommand};
use jarlink::commands::{
    check_pair_command, dump_list_command, list_classes_command, mangle_command, transform_command,
    verify_command,
};
use jarlink::load_config;
use jarlink::logging::{init_logging, resolve_log_level};
use jarlink_core::verify::VtableMatch;

/// Verifies natively compiled objects against the JARs they were built from.
///
/// The CLI is a thin wrapper around `jarlink-core`; all checks live in the
/// library so they can be tested and reused from build scripts.
#[derive(Parser, Debug)]
#[command(
    name = "jarlink",
    version,
    about = "Cross-check JAR class and vtable structure against compiled objects",
    long_about = None
)]
struct Cli {
    /// Log level: trace, debug, info, warn, error, off, or 0-6.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Log everything (same as `--log-level trace`).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (`.yaml`, `.yml` or `.json`).
    #[arg(long, global = true)]
    config: Option<String>,

    /// How vtable entries are compared: loose or strict.
    #[arg(long, global = true)]
    vtable_match: Option<VtableMatch>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Verify every module found in one or more build work directories.
    ///
    /// Exits 1 if any archive failed, 2 if only module-level checks failed.
    Verify {
        /// Work directories to scan. Defaults to the current directory.
        #[arg(default_value = ".")]
        workdirs: Vec<String>,

        /// Print the run summary as JSON instead of text.
        #[arg(long)]
        json: bool,

        /// Also write the JSON summary to this file.
        #[arg(long)]
        report: Option<String>,
    },

    /// Verify a single JAR against a single object.
    CheckPair {
        /// Path to the JAR.
        #[arg(long)]
        jar: String,

        /// Path to the object; its `.W.list` and `.vtable` files must sit next to it.
        #[arg(long)]
        object: String,

        #[arg(long)]
        json: bool,
    },

    /// Print the class symbol for each fully qualified class name.
    Mangle {
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// List the classes contained in a JAR.
    ListClasses {
        jar: String,

        /// Print each class's symbol next to its name.
        #[arg(long)]
        mangled: bool,
    },

    /// Parse a prefixed symbol list and print its classes and vtables.
    DumpList {
        path: String,

        #[arg(long)]
        json: bool,
    },

    /// Convert a raw IR dump (`.W`) into the prefixed list the verifier reads.
    Transform {
        input: String,

        /// Write here instead of stdout, typically `<object>.W.list`.
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(mode) = cli.vtable_match {
        config.vtable_match = mode;
    }
    let level =
        resolve_log_level(cli.log_level.as_deref(), cli.verbose, config.log_level.as_deref())?;
    init_logging(level);

    let code = match cli.command {
        Command::Verify { workdirs, json, report } => {
            verify_command(&workdirs, &config, json, report.as_deref())?
        }
        Command::CheckPair { jar, object, json } => {
            check_pair_command(&jar, &object, &config, json)?
        }
        Command::Mangle { names } => {
            mangle_command(&names)?;
            0
        }
        Command::ListClasses { jar, mangled } => {
            list_classes_command(&jar, mangled)?;
            0
        }
        Command::DumpList { path, json } => {
            dump_list_command(&path, json)?;
            0
        }
        Command::Transform { input, output } => {
            transform_command(&input, output.as_deref())?;
            0
        }
    };

    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
