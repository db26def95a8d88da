//! Interface filtering for selective reconciliation.
//!
//! Matchers ([`NameRegexFilter`], [`LoopbackFilter`]) only decide whether a
//! name matches. [`FilterChain`] turns them into a keep/drop decision: a
//! record is dropped when any exclude matches, and kept when no include is
//! configured or at least one include matches.

use regex::Regex;

use crate::listing::AddressRecord;

/// Trait for matching interfaces by name.
///
/// Filters must be `Send + Sync` so a chain can be shared across tasks.
pub trait InterfaceFilter: Send + Sync {
    /// Returns `true` if the interface matches this filter.
    fn matches(&self, interface: &str) -> bool;
}

/// Matches interfaces whose name matches a regex.
///
/// # Examples
///
/// ```
/// use renew_ip::filter::{InterfaceFilter, NameRegexFilter};
///
/// let uplinks = NameRegexFilter::new(r"^eth[0-9]+$").unwrap();
///
/// assert!(uplinks.matches("eth1"));
/// assert!(!uplinks.matches("wlan0"));
/// ```
#[derive(Debug, Clone)]
pub struct NameRegexFilter {
    regex: Regex,
}

impl NameRegexFilter {
    /// Compiles `pattern` into an interface name matcher.
    ///
    /// # Errors
    ///
    /// Fails when `pattern` is not valid regex syntax.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(|regex| Self { regex })
    }

    /// The compiled pattern.
    #[must_use]
    pub const fn pattern(&self) -> &Regex {
        &self.regex
    }
}

impl InterfaceFilter for NameRegexFilter {
    fn matches(&self, interface: &str) -> bool {
        self.regex.is_match(interface)
    }
}

/// Matches the loopback interface (`lo`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopbackFilter;

/// Name of the loopback interface on Linux.
const LOOPBACK: &str = "lo";

impl InterfaceFilter for LoopbackFilter {
    fn matches(&self, interface: &str) -> bool {
        interface == LOOPBACK
    }
}

/// Ordered set of include and exclude matchers.
///
/// Excludes win over includes. An empty include list keeps every
/// interface that no exclude rejects.
///
/// # Examples
///
/// ```
/// use renew_ip::filter::{FilterChain, InterfaceFilter, LoopbackFilter, NameRegexFilter};
///
/// let selection = FilterChain::new()
///     .exclude(LoopbackFilter)
///     .include(NameRegexFilter::new(r"^eth").unwrap());
///
/// assert!(selection.matches("eth1"));
/// assert!(!selection.matches("wlan0"));
/// assert!(!selection.matches("lo"));
/// ```
#[derive(Default)]
pub struct FilterChain {
    includes: Vec<Box<dyn InterfaceFilter>>,
    excludes: Vec<Box<dyn InterfaceFilter>>,
}

impl FilterChain {
    /// Creates a chain that keeps every interface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps interfaces matched by `filter` (any include suffices).
    #[must_use]
    pub fn include<F: InterfaceFilter + 'static>(mut self, filter: F) -> Self {
        self.includes.push(Box::new(filter));
        self
    }

    /// Drops interfaces matched by `filter`.
    #[must_use]
    pub fn exclude<F: InterfaceFilter + 'static>(mut self, filter: F) -> Self {
        self.excludes.push(Box::new(filter));
        self
    }

    /// Number of include matchers.
    #[must_use]
    pub fn include_count(&self) -> usize {
        self.includes.len()
    }

    /// Number of exclude matchers.
    #[must_use]
    pub fn exclude_count(&self) -> usize {
        self.excludes.len()
    }

    /// Number of matchers of either kind.
    #[must_use]
    pub fn len(&self) -> usize {
        self.includes.len() + self.excludes.len()
    }

    /// Whether the chain keeps everything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.includes.is_empty() && self.excludes.is_empty()
    }

    /// Lazily drops records for interfaces this chain rejects.
    pub fn apply<'a, I>(&'a self, records: I) -> impl Iterator<Item = AddressRecord> + 'a
    where
        I: IntoIterator<Item = AddressRecord>,
        I::IntoIter: 'a,
    {
        records.into_iter().filter(move |record| {
            let keep = self.matches(&record.interface);
            if !keep {
                tracing::debug!(
                    "Skipping {} on filtered interface {}",
                    record.address,
                    record.interface
                );
            }
            keep
        })
    }
}

impl InterfaceFilter for FilterChain {
    fn matches(&self, interface: &str) -> bool {
        let excluded = self.excludes.iter().any(|f| f.matches(interface));
        let included =
            self.includes.is_empty() || self.includes.iter().any(|f| f.matches(interface));
        !excluded && included
    }
}

impl std::fmt::Debug for FilterChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterChain")
            .field("includes", &self.include_count())
            .field("excludes", &self.exclude_count())
            .finish()
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
