//! Default values for configuration options.
//!
//! Centralized constants to avoid magic values scattered across the codebase.

/// Program used to list IPv4 addresses.
pub const LISTING_PROGRAM: &str = "ip";

/// Arguments producing one address per line (`ip -4 -o a`).
pub const LISTING_ARGS: &[&str] = &["-4", "-o", "a"];

/// Directory holding systemd-networkd interface files.
pub const NETWORK_DIR: &str = "/etc/systemd/network";

/// Default output path for `init`.
pub const CONFIG_FILE: &str = "renew-ip.toml";
