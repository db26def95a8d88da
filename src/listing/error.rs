//! Error types for the listing layer.

use std::path::PathBuf;
use std::process::ExitStatus;
use std::string::FromUtf8Error;

use thiserror::Error;

/// Error type for obtaining and parsing an address listing.
///
/// Every variant is fatal to a run: without a listing there is nothing
/// to reconcile.
#[derive(Debug, Error)]
pub enum ListingError {
    /// The listing command could not be started.
    #[error("Failed to run '{program}': {source}")]
    Spawn {
        /// Program that was executed
        program: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The listing command exited with a non-zero status.
    #[error("'{program}' exited with {status}: {stderr}")]
    CommandFailed {
        /// Program that was executed
        program: String,
        /// Exit status reported by the OS
        status: ExitStatus,
        /// Captured standard error, trimmed
        stderr: String,
    },

    /// The listing command produced output that is not valid UTF-8.
    #[error("'{program}' produced non UTF-8 output: {source}")]
    InvalidOutput {
        /// Program that was executed
        program: String,
        /// Decoding error
        #[source]
        source: FromUtf8Error,
    },

    /// A captured listing file could not be read.
    #[error("Failed to read listing file '{}': {source}", path.display())]
    FileRead {
        /// Path to the listing file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A listing line has fewer columns than the fixed layout requires.
    #[error("Malformed listing line {line_number}: '{line}'")]
    MalformedLine {
        /// 1-based line number within the listing
        line_number: usize,
        /// The offending line, verbatim
        line: String,
    },
}
