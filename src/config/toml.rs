//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Address listing configuration
    #[serde(default)]
    pub listing: ListingSection,

    /// Network file location
    #[serde(default)]
    pub network: NetworkSection,

    /// Interface filter configuration
    #[serde(default)]
    pub filter: FilterSection,

    /// Run behaviour
    #[serde(default)]
    pub run: RunSection,
}

/// Address listing section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListingSection {
    /// Program printing one IPv4 address per line
    pub command: Option<String>,

    /// Arguments for the program
    pub args: Option<Vec<String>>,

    /// Captured listing file, used instead of running a command
    pub file: Option<PathBuf>,
}

/// Network file section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkSection {
    /// Directory containing `<interface>.network` files
    pub dir: Option<PathBuf>,
}

/// Interface filter section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterSection {
    /// Regex patterns for interfaces to include
    #[serde(default)]
    pub include: Vec<String>,

    /// Regex patterns for interfaces to exclude
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Run behaviour section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunSection {
    /// Compute and log without writing
    #[serde(default)]
    pub dry_run: bool,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# RENEW-IP Configuration File

[listing]
# Program printing one IPv4 address per line (default: "ip")
# command = "ip"

# Arguments for the program (default: ["-4", "-o", "a"])
# args = ["-4", "-o", "a"]

# Read a captured listing instead of running the command
# file = "/tmp/ip-addr.txt"

[network]
# Directory containing <interface>.network files (default: /etc/systemd/network)
dir = "/etc/systemd/network"

[filter]
# Regex patterns for interfaces to include (empty = all)
# Note: CLI patterns REPLACE these entirely (not merged)
# include = ["^eth", "^wwan"]

# Regex patterns for interfaces to exclude (loopback is always excluded)
# Note: CLI patterns REPLACE these entirely (not merged)
# exclude = ["^docker", "^veth"]

[run]
# Log the rewritten files without writing them
# dry_run = false
"#
    .to_string()
}
