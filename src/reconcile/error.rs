//! Error types for reconciliation.

use thiserror::Error;

use crate::derive::DerivationError;
use crate::store::StoreError;

/// Error type for a single interface's reconciliation.
///
/// Every variant is local to one interface; other interfaces are unaffected.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// The interface's network file could not be read.
    #[error("{interface}: {source}")]
    Read {
        /// Interface name
        interface: String,
        /// Underlying store error
        #[source]
        source: StoreError,
    },

    /// The selected address is malformed.
    #[error("{interface}: cannot derive routing from '{address}': {source}")]
    Derive {
        /// Interface name
        interface: String,
        /// The address that was selected
        address: String,
        /// Underlying derivation error
        #[source]
        source: DerivationError,
    },

    /// The rewritten network file could not be written.
    #[error("{interface}: {source}")]
    Write {
        /// Interface name
        interface: String,
        /// Underlying store error
        #[source]
        source: StoreError,
    },

    /// The reconciliation task panicked or was aborted.
    #[error("{interface}: reconciliation task did not complete")]
    Panicked {
        /// Interface name
        interface: String,
    },
}

impl ReconcileError {
    /// Returns the interface this error belongs to.
    #[must_use]
    pub fn interface(&self) -> &str {
        match self {
            Self::Read { interface, .. }
            | Self::Derive { interface, .. }
            | Self::Write { interface, .. }
            | Self::Panicked { interface } => interface,
        }
    }

    /// Returns a short label for the error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Read { .. } => "read",
            Self::Derive { .. } => "derive",
            Self::Write { .. } => "write",
            Self::Panicked { .. } => "panic",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;
    use std::path::PathBuf;

    fn store_error() -> StoreError {
        StoreError::Read {
            path: PathBuf::from("/etc/systemd/network/eth1.network"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        }
    }

    #[test]
    fn read_displays_interface_and_path() {
        let error = ReconcileError::Read {
            interface: "eth1".to_string(),
            source: store_error(),
        };

        let message = error.to_string();
        assert!(message.starts_with("eth1: "));
        assert!(message.contains("eth1.network"));
    }

    #[test]
    fn derive_preserves_source() {
        let error = ReconcileError::Derive {
            interface: "eth1".to_string(),
            address: "bad".to_string(),
            source: DerivationError::OctetCount {
                address: "bad".to_string(),
                count: 1,
            },
        };

        assert!(error.source().unwrap().to_string().contains("expected 4"));
        assert_eq!(error.kind(), "derive");
    }

    #[test]
    fn interface_accessor_covers_all_variants() {
        let errors = [
            ReconcileError::Read {
                interface: "a".to_string(),
                source: store_error(),
            },
            ReconcileError::Write {
                interface: "b".to_string(),
                source: store_error(),
            },
            ReconcileError::Panicked {
                interface: "c".to_string(),
            },
        ];

        let names: Vec<_> = errors.iter().map(ReconcileError::interface).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }
}
