//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// RENEW-IP: DHCP dual-lease reconciler
///
/// Finds interfaces that currently hold two IPv4 leases and rewrites their
/// systemd-networkd files to the lease that is not yet configured.
#[derive(Debug, Parser)]
#[command(name = "renew-ip")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Directory containing `<interface>.network` files
    #[arg(long = "network-dir", value_name = "DIR")]
    pub network_dir: Option<PathBuf>,

    /// Read the address listing from a file instead of running a command
    #[arg(long = "listing-file", value_name = "PATH")]
    pub listing_file: Option<PathBuf>,

    /// Program printing one IPv4 address per line (default: ip)
    #[arg(long = "command", value_name = "PROGRAM")]
    pub listing_command: Option<String>,

    /// Argument for the listing program (can be specified multiple times)
    #[arg(
        long = "command-arg",
        value_name = "ARG",
        allow_hyphen_values = true
    )]
    pub listing_args: Vec<String>,

    /// Regex pattern for interfaces to include (can be specified multiple times)
    #[arg(long = "include-interface", value_name = "PATTERN")]
    pub include_interfaces: Vec<String>,

    /// Regex pattern for interfaces to exclude (can be specified multiple times)
    #[arg(long = "exclude-interface", value_name = "PATTERN")]
    pub exclude_interfaces: Vec<String>,

    /// Path to configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Compute and log the new files without writing them
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

/// Subcommands for renew-ip
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = super::defaults::CONFIG_FILE)]
        output: PathBuf,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }
}
