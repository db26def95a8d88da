//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::filter::{FilterChain, LoopbackFilter, NameRegexFilter};

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Where the address listing comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingOrigin {
    /// Run a program and read its standard output.
    Command {
        /// Program to run
        program: String,
        /// Arguments for the program
        args: Vec<String>,
    },
    /// Read a captured listing file.
    File(PathBuf),
}

impl Default for ListingOrigin {
    fn default() -> Self {
        Self::Command {
            program: defaults::LISTING_PROGRAM.to_string(),
            args: default_args(),
        }
    }
}

impl fmt::Display for ListingOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Command { program, args } if args.is_empty() => write!(f, "'{program}'"),
            Self::Command { program, args } => write!(f, "'{program} {}'", args.join(" ")),
            Self::File(path) => write!(f, "file {}", path.display()),
        }
    }
}

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Source of the address listing
    pub listing: ListingOrigin,

    /// Directory containing `<interface>.network` files
    pub network_dir: PathBuf,

    /// Interface filter
    pub filter: FilterChain,

    /// Dry-run mode (log rewritten files without writing)
    pub dry_run: bool,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ listing: {}, network_dir: {}, dry_run: {}, filters: {} }}",
            self.listing,
            self.network_dir.display(),
            self.dry_run,
            self.filter.len(),
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Regex patterns are invalid
    /// - The listing command or a path is empty
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let listing = Self::resolve_listing(cli, toml)?;
        let network_dir = Self::resolve_network_dir(cli, toml)?;
        let filter = Self::build_filter(cli, toml)?;

        // Merge dry_run (true if set anywhere)
        let dry_run = cli.dry_run || toml.is_some_and(|t| t.run.dry_run);

        Ok(Self {
            listing,
            network_dir,
            filter,
            dry_run,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_listing(cli: &Cli, toml: Option<&TomlConfig>) -> Result<ListingOrigin, ConfigError> {
        let section = toml.map(|t| &t.listing);

        if let Some(ref path) = cli.listing_file {
            return listing_file(path);
        }

        // TOML args belong to the TOML command, never to a CLI program
        if let Some(ref program) = cli.listing_command {
            return command(program, Self::resolve_args(cli, None));
        }

        if let Some(path) = section.and_then(|s| s.file.as_ref()) {
            return listing_file(path);
        }

        if let Some(program) = section.and_then(|s| s.command.as_ref()) {
            return command(program, Self::resolve_args(cli, section));
        }

        command(defaults::LISTING_PROGRAM, Self::resolve_args(cli, section))
    }

    fn resolve_args(cli: &Cli, section: Option<&super::toml::ListingSection>) -> Vec<String> {
        // Priority: CLI explicit > TOML > default
        if !cli.listing_args.is_empty() {
            return cli.listing_args.clone();
        }

        section
            .and_then(|s| s.args.clone())
            .unwrap_or_else(default_args)
    }

    fn resolve_network_dir(cli: &Cli, toml: Option<&TomlConfig>) -> Result<PathBuf, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let dir = cli
            .network_dir
            .clone()
            .or_else(|| toml.and_then(|t| t.network.dir.clone()))
            .unwrap_or_else(|| PathBuf::from(defaults::NETWORK_DIR));

        if dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyPath {
                field: field::NETWORK_DIR,
            });
        }

        Ok(dir)
    }

    fn build_filter(cli: &Cli, toml: Option<&TomlConfig>) -> Result<FilterChain, ConfigError> {
        // Always exclude loopback
        let mut filter = FilterChain::new().exclude(LoopbackFilter);

        // CLI patterns replace TOML patterns, per list
        let includes = if cli.include_interfaces.is_empty() {
            toml.map_or(&[][..], |t| t.filter.include.as_slice())
        } else {
            cli.include_interfaces.as_slice()
        };

        let excludes = if cli.exclude_interfaces.is_empty() {
            toml.map_or(&[][..], |t| t.filter.exclude.as_slice())
        } else {
            cli.exclude_interfaces.as_slice()
        };

        for pattern in includes {
            filter = filter.include(regex_filter(pattern)?);
        }

        for pattern in excludes {
            filter = filter.exclude(regex_filter(pattern)?);
        }

        Ok(filter)
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

fn default_args() -> Vec<String> {
    defaults::LISTING_ARGS
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn command(program: &str, args: Vec<String>) -> Result<ListingOrigin, ConfigError> {
    if program.trim().is_empty() {
        return Err(ConfigError::EmptyCommand);
    }

    Ok(ListingOrigin::Command {
        program: program.to_string(),
        args,
    })
}

fn listing_file(path: &Path) -> Result<ListingOrigin, ConfigError> {
    if path.as_os_str().is_empty() {
        return Err(ConfigError::EmptyPath {
            field: field::LISTING_FILE,
        });
    }

    Ok(ListingOrigin::File(path.to_path_buf()))
}

fn regex_filter(pattern: &str) -> Result<NameRegexFilter, ConfigError> {
    NameRegexFilter::new(pattern).map_err(|e| ConfigError::InvalidRegex {
        pattern: pattern.to_string(),
        source: e,
    })
}
