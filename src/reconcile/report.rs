//! Per-interface results of a reconciliation run.

use crate::derive::DerivedRouting;

use super::ReconcileError;

/// Result of a successful reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Interface name.
    pub interface: String,
    /// Address configured before the run, if any.
    pub previous: Option<String>,
    /// Values written (or that would have been written).
    pub routing: DerivedRouting,
    /// Whether the network file was actually written.
    ///
    /// `false` in dry-run mode or when the file was already up to date.
    pub written: bool,
}

/// Collected results of a run, in task launch order.
#[derive(Debug, Default)]
pub struct ReconcileReport {
    results: Vec<Result<Outcome, ReconcileError>>,
}

impl ReconcileReport {
    /// Creates a report from per-task results.
    #[must_use]
    pub const fn new(results: Vec<Result<Outcome, ReconcileError>>) -> Self {
        Self { results }
    }

    /// Returns all results in launch order.
    #[must_use]
    pub fn results(&self) -> &[Result<Outcome, ReconcileError>] {
        &self.results
    }

    /// Returns successful outcomes.
    pub fn succeeded(&self) -> impl Iterator<Item = &Outcome> {
        self.results.iter().filter_map(|r| r.as_ref().ok())
    }

    /// Returns failures.
    pub fn failed(&self) -> impl Iterator<Item = &ReconcileError> {
        self.results.iter().filter_map(|r| r.as_ref().err())
    }

    /// Returns the number of reconciled interfaces (successful or not).
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Returns true if no interface was reconciled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Returns true if every reconciliation succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.results.iter().all(Result::is_ok)
    }

    /// Consumes the report and returns the results.
    #[must_use]
    pub fn into_results(self) -> Vec<Result<Outcome, ReconcileError>> {
        self.results
    }
}
