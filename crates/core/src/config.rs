use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{VerifyError, VerifyResult};
use crate::verify::VtableMatch;

/// File name suffixes the build uses for the verifier's inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Suffixes {
    /// Appended to an object path to find its symbol dump.
    pub object_list: String,
    /// Appended to an object path to find the vtables implied by its JAR.
    pub vtable_list: String,
    /// `<module><jar_list>` lists the module's JARs.
    pub jar_list: String,
    /// `<module><object_output_list>` lists the module's compiled objects.
    pub object_output_list: String,
}

impl Default for Suffixes {
    fn default() -> Self {
        Self {
            object_list: ".W.list".to_string(),
            vtable_list: ".vtable".to_string(),
            jar_list: ".lib.list".to_string(),
            object_output_list: ".lib.output.list".to_string(),
        }
    }
}

/// Serializable verifier configuration.
///
/// Every field has a default, so a file only needs the keys it overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    pub suffixes: Suffixes,
    /// When set, module list files hold one line of items joined by this separator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_separator: Option<String>,
    pub vtable_match: VtableMatch,
    /// Log level used when neither the command line nor `RUST_LOG` sets one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl VerifierConfig {
    /// Load a configuration file; the format follows the extension (`yaml`, `yml` or `json`).
    pub fn load(path: impl AsRef<Path>) -> VerifyResult<Self> {
        let path = path.as_ref();
        let body = fs::read_to_string(path).map_err(|e| VerifyError::from_io(path, e))?;
        let config_err =
            |message: String| VerifyError::Config { path: path.to_path_buf(), message };
        match path.extension().and_then(|e| e.to_str()).unwrap_or_default() {
            "yaml" | "yml" => serde_yaml::from_str(&body).map_err(|e| config_err(e.to_string())),
            "json" => serde_json::from_str(&body).map_err(|e| config_err(e.to_string())),
            other => Err(config_err(format!(
                "unsupported config format '{other}'; expected yaml, yml or json"
            ))),
        }
    }
}
