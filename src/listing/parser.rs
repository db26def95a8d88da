//! Parsing of one-line-per-address listings.
//!
//! The expected layout is the one printed by `ip -4 -o addr`:
//!
//! ```text
//! 2: eth0    inet 192.168.11.100/24 brd 192.168.11.255 scope global dynamic eth0\       valid_lft 75677sec
//! ```
//!
//! Column 1 carries the interface name and column 3 the address with mask.

use super::ListingError;

/// Column holding the interface name.
const INTERFACE_COLUMN: usize = 1;

/// Column holding the address with mask.
const ADDRESS_COLUMN: usize = 3;

/// A single interface/address pair taken from one listing line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AddressRecord {
    /// Interface name (e.g., "eth1").
    pub interface: String,
    /// Address in CIDR notation (e.g., "192.168.11.100/24").
    pub address: String,
}

impl AddressRecord {
    /// Creates a new address record.
    #[must_use]
    pub fn new(interface: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            interface: interface.into(),
            address: address.into(),
        }
    }
}

/// Parses a listing into address records, one per non-blank line.
///
/// Records are returned in listing order. No validation is performed on
/// the extracted values beyond column extraction.
///
/// # Errors
///
/// Returns [`ListingError::MalformedLine`] for the first non-blank line that
/// has fewer than four whitespace-separated columns.
pub fn parse_listing(text: &str) -> Result<Vec<AddressRecord>, ListingError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| parse_line(index + 1, line))
        .collect()
}

fn parse_line(line_number: usize, line: &str) -> Result<AddressRecord, ListingError> {
    let columns: Vec<&str> = line.split_whitespace().take(ADDRESS_COLUMN + 1).collect();

    match (columns.get(INTERFACE_COLUMN), columns.get(ADDRESS_COLUMN)) {
        (Some(interface), Some(address)) => Ok(AddressRecord::new(*interface, *address)),
        _ => Err(ListingError::MalformedLine {
            line_number,
            line: line.to_string(),
        }),
    }
}
