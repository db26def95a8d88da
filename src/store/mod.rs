//! Storage of per-interface network configuration.
//!
//! This module provides an abstraction over where `.network` files live so
//! the reconciliation logic can be tested without touching `/etc`.

mod file;

pub use file::FileConfigStore;

use std::future::Future;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading or writing a network file.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to read the network file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    Read {
        /// Path of the file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Failed to write the network file.
    #[error("Failed to write config file '{}': {source}", path.display())]
    Write {
        /// Path of the file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Abstraction for reading and writing network files by interface name.
///
/// Implementations should:
/// - Keep keys independent; writing one interface never touches another
/// - Make writes all-or-nothing where the storage allows it
///
/// # Testing
///
/// Use [`mock::MockConfigStore`] in tests to avoid filesystem dependencies.
pub trait ConfigStore: Send + Sync {
    /// Reads the configuration for `interface`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Read`] if the configuration cannot be read.
    fn read(&self, interface: &str) -> impl Future<Output = Result<String, StoreError>> + Send;

    /// Replaces the configuration for `interface` with `content`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] if the configuration cannot be written.
    fn write(
        &self,
        interface: &str,
        content: &str,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// Mock config store for testing.
///
/// Holds files in memory and can be told to fail reads or writes for
/// specific interfaces.
#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;

    /// A mock implementation of [`ConfigStore`] for testing.
    #[derive(Debug, Default)]
    pub struct MockConfigStore {
        files: Mutex<HashMap<String, String>>,
        failing_reads: HashSet<String>,
        failing_writes: HashSet<String>,
        writes: Mutex<Vec<String>>,
    }

    impl MockConfigStore {
        /// Creates an empty store.
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Adds a file for `interface`.
        #[must_use]
        pub fn with_file(self, interface: &str, content: &str) -> Self {
            self.files
                .lock()
                .unwrap()
                .insert(interface.to_string(), content.to_string());
            self
        }

        /// Makes every read of `interface` fail.
        #[must_use]
        pub fn failing_read(mut self, interface: &str) -> Self {
            self.failing_reads.insert(interface.to_string());
            self
        }

        /// Makes every write of `interface` fail.
        #[must_use]
        pub fn failing_write(mut self, interface: &str) -> Self {
            self.failing_writes.insert(interface.to_string());
            self
        }

        /// Returns the current content for `interface`.
        ///
        /// # Panics
        ///
        /// Panics if the internal lock is poisoned (only in test code).
        #[must_use]
        pub fn content(&self, interface: &str) -> Option<String> {
            self.files.lock().unwrap().get(interface).cloned()
        }

        /// Returns the interfaces written so far, in write order.
        ///
        /// # Panics
        ///
        /// Panics if the internal lock is poisoned (only in test code).
        #[must_use]
        pub fn writes(&self) -> Vec<String> {
            self.writes.lock().unwrap().clone()
        }

        fn path(interface: &str) -> PathBuf {
            PathBuf::from(format!("{interface}.network"))
        }
    }

    impl ConfigStore for MockConfigStore {
        async fn read(&self, interface: &str) -> Result<String, StoreError> {
            let content = if self.failing_reads.contains(interface) {
                None
            } else {
                self.content(interface)
            };

            content.ok_or_else(|| StoreError::Read {
                path: Self::path(interface),
                source: io::Error::new(io::ErrorKind::NotFound, "mock read failure"),
            })
        }

        async fn write(&self, interface: &str, content: &str) -> Result<(), StoreError> {
            if self.failing_writes.contains(interface) {
                return Err(StoreError::Write {
                    path: Self::path(interface),
                    source: io::Error::new(io::ErrorKind::PermissionDenied, "mock write failure"),
                });
            }

            self.files
                .lock()
                .unwrap()
                .insert(interface.to_string(), content.to_string());
            self.writes.lock().unwrap().push(interface.to_string());
            Ok(())
        }
    }
}
