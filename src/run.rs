//! Application execution logic.
//!
//! Fetches the address listing, detects dual-address interfaces and
//! reconciles their network files.

use thiserror::Error;

use renew_ip::config::{ListingOrigin, ValidatedConfig};
use renew_ip::detect::DualAddressDetector;
use renew_ip::filter::FilterChain;
use renew_ip::listing::{CommandSource, FileSource, ListingError, ListingSource, parse_listing};
use renew_ip::reconcile::{ReconcileReport, Reconciler};
use renew_ip::store::{ConfigStore, FileConfigStore};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for failures that abort the whole run.
#[derive(Debug, Error)]
pub enum RunError {
    /// The address listing could not be obtained or parsed.
    #[error("Failed to obtain address listing: {0}")]
    Listing(#[from] ListingError),
}

/// Executes one reconciliation run.
///
/// This function:
/// 1. Fetches the address listing (command or file)
/// 2. Parses and filters it
/// 3. Reconciles every interface that holds two addresses
/// 4. Logs a per-interface summary
///
/// # Errors
///
/// Returns an error if the listing cannot be fetched or contains a
/// malformed line. Per-interface failures are reported in the returned
/// [`ReconcileReport`] instead.
pub async fn execute(config: ValidatedConfig) -> Result<ReconcileReport, RunError> {
    if config.dry_run {
        tracing::info!("Dry-run mode enabled - network files will be logged but not written");
    }

    let listing = fetch_listing(&config.listing).await?;

    let reconciler =
        Reconciler::new(FileConfigStore::new(&config.network_dir)).with_dry_run(config.dry_run);

    reconcile_listing(&listing, &config.filter, &reconciler).await
}

/// Fetches the listing from the configured origin.
async fn fetch_listing(origin: &ListingOrigin) -> Result<String, ListingError> {
    match origin {
        ListingOrigin::Command { program, args } => {
            CommandSource::new(program.clone(), args.clone())
                .fetch()
                .await
        }
        ListingOrigin::File(path) => FileSource::new(path).fetch().await,
    }
}

/// Parses, filters and reconciles a listing.
async fn reconcile_listing<S>(
    listing: &str,
    filter: &FilterChain,
    reconciler: &Reconciler<S>,
) -> Result<ReconcileReport, RunError>
where
    S: ConfigStore + 'static,
{
    let records = parse_listing(listing)?;
    tracing::debug!("Listing contains {} address(es)", records.len());

    let mut detector = DualAddressDetector::new(filter.apply(records));
    let report = reconciler.reconcile_all(&mut detector).await;

    for (interface, count) in detector.anomalies() {
        tracing::warn!("{interface} was seen with {count} addresses and needs manual review");
    }

    log_report(&report);
    Ok(report)
}

/// Logs the outcome of every reconciled interface.
fn log_report(report: &ReconcileReport) {
    if report.is_empty() {
        tracing::info!("No interface holds two addresses, nothing to do");
        return;
    }

    for outcome in report.succeeded() {
        let previous = outcome.previous.as_deref().unwrap_or("<none>");
        if outcome.written {
            tracing::info!(
                "{}: {previous} -> {}",
                outcome.interface,
                outcome.routing
            );
        } else {
            tracing::info!(
                "{}: {previous} -> {} (not written)",
                outcome.interface,
                outcome.routing
            );
        }
    }

    for error in report.failed() {
        tracing::error!("Reconciliation failed ({}): {error}", error.kind());
    }

    tracing::info!(
        "Reconciled {} interface(s), {} failed",
        report.len(),
        report.failed().count()
    );
}
