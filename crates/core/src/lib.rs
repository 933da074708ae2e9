//! jarlink-core
//!
//! Core library for verifying that a natively compiled object file faithfully
//! represents the classes and virtual-dispatch tables of the JAR it was built from.
//!
//! The crate is organised leaves first:
//! - `mangle`: class name to linkage symbol.
//! - `symbols`: the prefixed-list parser, the raw dump transformer and the line readers.
//! - `archive`: `.class` entry extraction from JAR containers.
//! - `verify`: the structural diff between an archive universe and an object universe.
//! - `tally`: caller-owned pass/fail bookkeeping for a run.
//! - `pairing`: module discovery, JAR-to-object matching and per-pair verification.
//! - `config`: serializable verifier configuration.
//!
//! All substantive logic lives here so it is fully testable and reusable from
//! the CLI or any other frontend.

pub mod archive;
pub mod config;
pub mod error;
pub mod mangle;
pub mod pairing;
pub mod symbols;
pub mod tally;
pub mod verify;

pub use error::{ParseError, VerifyError, VerifyResult};

/// Returns the library version as encoded at compile time.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
