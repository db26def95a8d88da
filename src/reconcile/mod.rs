//! Reconciliation of dual-address interfaces.
//!
//! For every [`ReconciliationTask`] the [`Reconciler`] reads the interface's
//! network file, picks the address that is not currently configured,
//! derives gateway and table from it, rewrites the file and writes it back.
//! Tasks run concurrently and independently; a failure on one interface
//! never affects another.

mod error;
mod report;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

pub use error::ReconcileError;
pub use report::{Outcome, ReconcileReport};

use std::sync::Arc;

use tokio::task::JoinSet;

use crate::derive::{DerivedRouting, is_known_address, select_new_address};
use crate::detect::ReconciliationTask;
use crate::document::NetworkDocument;
use crate::store::ConfigStore;

/// Drives reconciliation of interfaces against a [`ConfigStore`].
#[derive(Debug)]
pub struct Reconciler<S> {
    store: Arc<S>,
    dry_run: bool,
}

impl<S> Clone for Reconciler<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            dry_run: self.dry_run,
        }
    }
}

impl<S: ConfigStore + 'static> Reconciler<S> {
    /// Creates a reconciler writing through `store`.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self::from_shared(Arc::new(store))
    }

    /// Creates a reconciler from an already shared store.
    #[must_use]
    pub const fn from_shared(store: Arc<S>) -> Self {
        Self {
            store,
            dry_run: false,
        }
    }

    /// Sets dry-run mode: everything is computed and logged, nothing is written.
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Returns true if dry-run mode is enabled.
    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Returns the underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Reconciles a single interface.
    ///
    /// # Errors
    ///
    /// Returns a [`ReconcileError`] if the file cannot be read, the selected
    /// address is malformed, or the rewritten file cannot be written.
    pub async fn reconcile_one(
        &self,
        task: &ReconciliationTask,
    ) -> Result<Outcome, ReconcileError> {
        reconcile(self.store.as_ref(), task, self.dry_run).await
    }

    /// Reconciles all tasks concurrently and waits for every one of them.
    ///
    /// Tasks are spawned as they are pulled from `tasks`, so a lazy source
    /// starts work before it is exhausted. Failures are collected, never
    /// short-circuited. Results are reported in launch order.
    pub async fn reconcile_all<T>(&self, tasks: T) -> ReconcileReport
    where
        T: IntoIterator<Item = ReconciliationTask>,
    {
        let mut join_set = JoinSet::new();
        let mut interfaces = Vec::new();

        for (index, task) in tasks.into_iter().enumerate() {
            tracing::debug!("Launching reconciliation for {task}");
            interfaces.push(task.interface.clone());

            let store = Arc::clone(&self.store);
            let dry_run = self.dry_run;
            join_set.spawn(async move { (index, reconcile(store.as_ref(), &task, dry_run).await) });
        }

        let mut results: Vec<Option<Result<Outcome, ReconcileError>>> =
            interfaces.iter().map(|_| None).collect();

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, result)) => results[index] = Some(result),
                Err(e) => tracing::error!("Reconciliation task did not complete: {e}"),
            }
        }

        let results = results
            .into_iter()
            .zip(interfaces)
            .map(|(result, interface)| {
                result.unwrap_or_else(|| Err(ReconcileError::Panicked { interface }))
            })
            .collect();

        ReconcileReport::new(results)
    }
}

async fn reconcile<S: ConfigStore>(
    store: &S,
    task: &ReconciliationTask,
    dry_run: bool,
) -> Result<Outcome, ReconcileError> {
    let interface = task.interface.as_str();

    let original = store
        .read(interface)
        .await
        .map_err(|source| ReconcileError::Read {
            interface: interface.to_string(),
            source,
        })?;

    let document = NetworkDocument::parse(&original);
    let previous = document.current_address().map(str::to_string);
    let (routing, rewritten) = plan(task, &document)?;
    let rendered = rewritten.render();

    let mut outcome = Outcome {
        interface: interface.to_string(),
        previous,
        routing,
        written: false,
    };

    if rendered == original {
        tracing::debug!("{interface} is already up to date");
        return Ok(outcome);
    }

    if dry_run {
        tracing::info!(
            "Dry-run: would rewrite {interface} ({})\n{rendered}",
            outcome.routing
        );
        return Ok(outcome);
    }

    store
        .write(interface, &rendered)
        .await
        .map_err(|source| ReconcileError::Write {
            interface: interface.to_string(),
            source,
        })?;

    outcome.written = true;
    Ok(outcome)
}

/// Computes the routing and rewritten document for one task.
///
/// Pure: no I/O happens here.
fn plan(
    task: &ReconciliationTask,
    document: &NetworkDocument,
) -> Result<(DerivedRouting, NetworkDocument), ReconcileError> {
    let previous = document.current_address();

    if !is_known_address(previous, &task.first, &task.second) {
        tracing::warn!(
            "{}: configured address {} matches neither {} nor {}, using {}",
            task.interface,
            previous.unwrap_or("<none>"),
            task.first,
            task.second,
            task.second,
        );
    }

    let address = select_new_address(previous, &task.first, &task.second);
    let routing =
        DerivedRouting::from_address(address).map_err(|source| ReconcileError::Derive {
            interface: task.interface.clone(),
            address: address.to_string(),
            source,
        })?;

    let rewritten = document.rewrite(&routing);
    Ok((routing, rewritten))
}
