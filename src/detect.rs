//! Detection of interfaces holding two addresses at once.
//!
//! During DHCP lease renewal an interface briefly carries both the old and
//! the new lease. [`DualAddressDetector`] groups a listing by interface and
//! yields one [`ReconciliationTask`] per interface as soon as its second
//! address is observed.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;

use crate::listing::AddressRecord;

/// Two addresses observed on one interface, in listing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciliationTask {
    /// Interface name.
    pub interface: String,
    /// First address seen for the interface.
    pub first: String,
    /// Second address seen for the interface.
    pub second: String,
}

impl ReconciliationTask {
    /// Creates a new reconciliation task.
    #[must_use]
    pub fn new(
        interface: impl Into<String>,
        first: impl Into<String>,
        second: impl Into<String>,
    ) -> Self {
        Self {
            interface: interface.into(),
            first: first.into(),
            second: second.into(),
        }
    }
}

impl fmt::Display for ReconciliationTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.interface, self.first, self.second)
    }
}

/// Pull-based detector of dual-address interfaces.
///
/// Consumes address records lazily and yields a task the moment an
/// interface reaches its second address. Every record is kept in the
/// per-interface history, so an interface seen three or more times is
/// reported as an anomaly instead of producing another task.
///
/// # Examples
///
/// ```
/// use renew_ip::detect::DualAddressDetector;
/// use renew_ip::listing::AddressRecord;
///
/// let records = vec![
///     AddressRecord::new("eth1", "192.168.11.100/24"),
///     AddressRecord::new("eth2", "192.168.14.100/24"),
///     AddressRecord::new("eth1", "192.168.12.100/24"),
/// ];
///
/// let tasks: Vec<_> = DualAddressDetector::new(records).collect();
///
/// assert_eq!(tasks.len(), 1);
/// assert_eq!(tasks[0].interface, "eth1");
/// assert_eq!(tasks[0].first, "192.168.11.100/24");
/// assert_eq!(tasks[0].second, "192.168.12.100/24");
/// ```
#[derive(Debug)]
pub struct DualAddressDetector<I> {
    records: I,
    history: HashMap<String, Vec<String>>,
    /// Interfaces that went past two addresses, in discovery order.
    anomalies: Vec<String>,
}

impl<I> DualAddressDetector<I>
where
    I: Iterator<Item = AddressRecord>,
{
    /// Creates a detector over the given records.
    pub fn new<R>(records: R) -> Self
    where
        R: IntoIterator<Item = AddressRecord, IntoIter = I>,
    {
        Self {
            records: records.into_iter(),
            history: HashMap::new(),
            anomalies: Vec::new(),
        }
    }

    /// Returns every address recorded so far for `interface`.
    #[must_use]
    pub fn addresses(&self, interface: &str) -> Option<&[String]> {
        self.history.get(interface).map(Vec::as_slice)
    }

    /// Returns interfaces observed with more than two addresses, with the
    /// number of addresses seen so far.
    #[must_use]
    pub fn anomalies(&self) -> Vec<(&str, usize)> {
        self.anomalies
            .iter()
            .map(|name| (name.as_str(), self.history.get(name).map_or(0, Vec::len)))
            .collect()
    }

    fn observe(
        history: &mut HashMap<String, Vec<String>>,
        anomalies: &mut Vec<String>,
        record: AddressRecord,
    ) -> Option<ReconciliationTask> {
        let AddressRecord { interface, address } = record;

        match history.entry(interface) {
            Entry::Vacant(entry) => {
                entry.insert(vec![address]);
                None
            }
            Entry::Occupied(mut entry) => {
                entry.get_mut().push(address);
                let addresses = entry.get();

                if addresses.len() == 2 {
                    tracing::debug!("Interface {} has two addresses", entry.key());
                    return Some(ReconciliationTask::new(
                        entry.key().clone(),
                        addresses[0].clone(),
                        addresses[1].clone(),
                    ));
                }

                tracing::warn!(
                    "Interface {} has {} addresses, only the first two are reconciled",
                    entry.key(),
                    addresses.len()
                );
                if addresses.len() == 3 {
                    anomalies.push(entry.key().clone());
                }
                None
            }
        }
    }
}

impl<I> Iterator for DualAddressDetector<I>
where
    I: Iterator<Item = AddressRecord>,
{
    type Item = ReconciliationTask;

    fn next(&mut self) -> Option<Self::Item> {
        let Self {
            records,
            history,
            anomalies,
        } = self;

        records.find_map(|record| Self::observe(history, anomalies, record))
    }
}

#[cfg(test)]
#[path = "detect_tests.rs"]
mod tests;
