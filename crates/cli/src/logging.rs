//! Log level selection and subscriber setup.

use anyhow::{anyhow, Result};
use tracing::level_filters::LevelFilter;

/// Level used when nothing else asks for one.
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::WARN;

/// Parse a level name (`trace`..`error`, `off`) or a number on the 0-6 scale
/// build scripts pass (0 all, 1 trace, 2 debug, 3 info, 4 warn, 5 error, 6 fatal).
pub fn parse_log_level(level: &str) -> Result<LevelFilter> {
    match level.trim().to_ascii_lowercase().as_str() {
        "0" | "all" | "1" | "trace" => Ok(LevelFilter::TRACE),
        "2" | "debug" => Ok(LevelFilter::DEBUG),
        "3" | "info" => Ok(LevelFilter::INFO),
        "4" | "warn" | "warning" => Ok(LevelFilter::WARN),
        // No fatal level in tracing.
        "5" | "error" | "6" | "fatal" => Ok(LevelFilter::ERROR),
        "off" => Ok(LevelFilter::OFF),
        other => Err(anyhow!(
            "Invalid log level '{}'. Allowed: trace, debug, info, warn, error, off or 0-6",
            other
        )),
    }
}

/// Pick the effective level: `--verbose` wins, then `--log-level`, then the
/// config file, then [`DEFAULT_LOG_LEVEL`].
pub fn resolve_log_level(
    cli_level: Option<&str>,
    verbose: bool,
    config_level: Option<&str>,
) -> Result<LevelFilter> {
    if verbose {
        return Ok(LevelFilter::TRACE);
    }
    match cli_level.or(config_level) {
        Some(level) => parse_log_level(level),
        None => Ok(DEFAULT_LOG_LEVEL),
    }
}

/// Install the global subscriber. `RUST_LOG`, when set, overrides `level`.
///
/// Logs go to stderr so stdout stays clean for reports and JSON.
pub fn init_logging(level: LevelFilter) {
    use std::io::IsTerminal;
    use std::sync::OnceLock;
    use tracing_subscriber::{fmt, EnvFilter};

    static INITIALISED: OnceLock<()> = OnceLock::new();

    let _ = INITIALISED.get_or_init(|| {
        let use_ansi = std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal();
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(level.to_string()));
        let subscriber = fmt::fmt()
            .with_env_filter(filter)
            .with_ansi(use_ansi)
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}
