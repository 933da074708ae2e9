use anyhow::{Context, Result};
use jarlink_core::config::VerifierConfig;
use jarlink_core::pairing::{verify_pair, ArtifactPair};

/// Verify a single JAR against a single object. Returns 0 on PASS, 1 on FAIL.
pub fn check_pair_command(
    jar: &str,
    object: &str,
    config: &VerifierConfig,
    json: bool,
) -> Result<i32> {
    let pair = ArtifactPair::new(jar, object);
    let result = verify_pair(&pair, config)
        .with_context(|| format!("Failed to verify {} against {}", jar, object))?;

    if json {
        let serialized =
            serde_json::to_string_pretty(&result).context("Failed to serialize result")?;
        println!("{}", serialized);
    } else {
        print!("{result}");
    }

    Ok(if result.passed { 0 } else { 1 })
}
