//! Configuration layer for RENEW-IP.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML config file** - Values from the configuration file
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! The listing origin is resolved as one unit: `--listing-file`, then
//! `--command`, then `listing.file`, then `listing.command`, then `ip -4 -o a`.
//! Command arguments follow the command they belong to: a `--command` program
//! takes `--command-arg` values or the default arguments, never `listing.args`.
//!
//! For filter patterns (`include_interfaces`, `exclude_interfaces`), CLI patterns **replace**
//! TOML patterns entirely (not merged). Include and exclude lists are replaced independently.
//!
//! # Boolean Flag Semantics
//!
//! `--dry-run` uses OR semantics: if set `true` in either CLI or TOML, the result is `true`.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;


pub use cli::{Cli, Command};
pub use error::ConfigError;
pub use toml::{TomlConfig, default_config_template};
pub use validated::{ListingOrigin, ValidatedConfig, write_default_config};
