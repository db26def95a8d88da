//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for configuration operations.
///
/// Covers errors from parsing, validation, and file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to write configuration file (for init command).
    #[error("Failed to write config file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Invalid regex pattern for interface filtering.
    #[error("Invalid regex pattern '{pattern}': {source}")]
    InvalidRegex {
        /// The invalid pattern
        pattern: String,
        /// Underlying regex error
        #[source]
        source: regex::Error,
    },

    /// The listing command is an empty string.
    #[error("Listing command must not be empty")]
    EmptyCommand,

    /// A path option is an empty string.
    #[error("Path for {field} must not be empty")]
    EmptyPath {
        /// Name of the field
        field: &'static str,
    },
}

/// Well-known field names for `EmptyPath` errors.
pub mod field {
    /// The network directory field.
    pub const NETWORK_DIR: &str = "network_dir";
    /// The listing file field.
    pub const LISTING_FILE: &str = "listing_file";
}
