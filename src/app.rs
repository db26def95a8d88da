//! Process-level helpers for the binary: exit codes, log setup and
//! hints printed after a configuration error.

use renew_ip::config::ConfigError;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Exit codes reported by `renew-ip`.
pub mod exit_code {
    use std::process::ExitCode;

    /// Every detected interface was reconciled, or none needed it.
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Bad flags, unreadable or invalid config file, bad filter pattern.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// The run could not start or the address listing was unusable.
    ///
    /// `ExitCode::from` is not `const`, hence a function.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }

    /// At least one interface failed to reconcile.
    pub fn reconcile_failure() -> ExitCode {
        ExitCode::from(3)
    }
}

/// Prints a follow-up hint to stderr for configuration errors users
/// commonly hit.
pub fn print_config_hint(error: &ConfigError) {
    let hint = match error {
        ConfigError::FileRead { .. } => "Run 'renew-ip init' to generate a configuration template.",
        ConfigError::InvalidRegex { .. } => {
            "Interface patterns use Rust regex syntax, e.g. '^eth[0-9]+$'."
        }
        _ => return,
    };
    eprintln!("\n{hint}");
}

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `verbose` selects DEBUG over INFO.
pub fn setup_tracing(verbose: bool) {
    let default_level = if verbose { Level::DEBUG } else { Level::INFO };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env_lossy(),
        )
        .with_target(false)
        .init();
}
