//! RENEW-IP: DHCP dual-lease reconciler
//!
//! Command-line entry point.

use std::path::Path;
use std::process::ExitCode;

use renew_ip::config::{Cli, Command, ValidatedConfig, write_default_config};
use renew_ip::reconcile::ReconcileReport;

mod app;
mod run;

use app::{exit_code, print_config_hint, setup_tracing};
use run::RunError;

#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    if let Some(Command::Init { output }) = &cli.command {
        return init(output);
    }

    let config = match ValidatedConfig::load(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            print_config_hint(&e);
            return exit_code::CONFIG_ERROR;
        }
    };

    // Logging starts only once `verbose` is known
    setup_tracing(config.verbose);
    tracing::info!("{config}");

    reconcile(config)
}

/// Writes the commented configuration template for `renew-ip init`.
fn init(output: &Path) -> ExitCode {
    if let Err(e) = write_default_config(output) {
        eprintln!("Error: {e}");
        return exit_code::CONFIG_ERROR;
    }

    println!("Configuration template written to: {}", output.display());
    exit_code::SUCCESS
}

/// Runs one reconciliation pass on a fresh multi-threaded runtime.
#[cfg(not(tarpaulin_include))]
fn reconcile(config: ValidatedConfig) -> ExitCode {
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!("Failed to start async runtime: {e}");
            return exit_code::runtime_error();
        }
    };

    outcome_code(runtime.block_on(run::execute(config)))
}

/// Maps the result of a run to the process exit code.
fn outcome_code(result: Result<ReconcileReport, RunError>) -> ExitCode {
    match result {
        Ok(report) if report.is_success() => exit_code::SUCCESS,
        Ok(report) => {
            tracing::error!(
                "{} of {} interface(s) could not be reconciled",
                report.failed().count(),
                report.len()
            );
            exit_code::reconcile_failure()
        }
        Err(e) => {
            tracing::error!("Run aborted: {e}");
            exit_code::runtime_error()
        }
    }
}
