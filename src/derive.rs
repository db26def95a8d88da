//! Routing values derived from an address with mask.
//!
//! All functions here are pure. Addresses are expected in CIDR notation
//! (`A.B.C.D/M`); the mask is carried through untouched and never validated.

use std::fmt;
use std::net::Ipv4Addr;

use thiserror::Error;

/// Offset added to the third octet to obtain the routing table id.
pub const TABLE_BASE: u16 = 100;

/// Last octet of every derived gateway.
pub const GATEWAY_HOST: u8 = 1;

/// Error type for malformed address content.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DerivationError {
    /// The address part does not have exactly four dot-separated octets.
    #[error("Address '{address}' has {count} octets, expected 4")]
    OctetCount {
        /// The address with mask as given
        address: String,
        /// Number of dot-separated parts found
        count: usize,
    },

    /// An octet is not a decimal number in 0..=255.
    #[error("Address '{address}' has invalid octet '{octet}'")]
    InvalidOctet {
        /// The address with mask as given
        address: String,
        /// The offending octet text
        octet: String,
    },
}

/// Address, gateway and routing table to write into a network file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedRouting {
    /// Address with mask (e.g., "192.168.11.100/24").
    pub address: String,
    /// Gateway (e.g., 192.168.11.1).
    pub gateway: Ipv4Addr,
    /// Policy routing table id, in 100..=355.
    pub table: u16,
}

impl DerivedRouting {
    /// Derives gateway and table from `address`.
    ///
    /// # Errors
    ///
    /// Returns a [`DerivationError`] if the address part is malformed.
    pub fn from_address(address: &str) -> Result<Self, DerivationError> {
        Ok(Self {
            address: address.to_string(),
            gateway: derive_gateway(address)?,
            table: derive_table_id(address)?,
        })
    }
}

impl fmt::Display for DerivedRouting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "address {} via {} table {}",
            self.address, self.gateway, self.table
        )
    }
}

/// Picks the address that is not the previously configured one.
///
/// Returns `first` when `previous` equals `second`, otherwise `second`.
/// When `previous` matches neither candidate (or is absent) the result
/// is still `second`; callers that care should check
/// [`is_known_address`] first.
///
/// # Examples
///
/// ```
/// use renew_ip::derive::select_new_address;
///
/// let first = "192.168.1.5/24";
/// let second = "192.168.1.9/24";
///
/// assert_eq!(select_new_address(Some(first), first, second), second);
/// assert_eq!(select_new_address(Some(second), first, second), first);
/// ```
#[must_use]
pub fn select_new_address<'a>(previous: Option<&str>, first: &'a str, second: &'a str) -> &'a str {
    if previous == Some(second) {
        first
    } else {
        second
    }
}

/// Returns true if `previous` is one of the two candidates.
#[must_use]
pub fn is_known_address(previous: Option<&str>, first: &str, second: &str) -> bool {
    previous.is_some_and(|previous| previous == first || previous == second)
}

/// Replaces the last octet with `1`.
///
/// # Errors
///
/// Returns a [`DerivationError`] if the address part is malformed.
///
/// # Examples
///
/// ```
/// use renew_ip::derive::derive_gateway;
///
/// let gateway = derive_gateway("192.168.11.100/24").unwrap();
/// assert_eq!(gateway.to_string(), "192.168.11.1");
/// ```
pub fn derive_gateway(address: &str) -> Result<Ipv4Addr, DerivationError> {
    let [a, b, c, _] = octets(address)?;
    Ok(Ipv4Addr::new(a, b, c, GATEWAY_HOST))
}

/// Adds [`TABLE_BASE`] to the third octet.
///
/// # Errors
///
/// Returns a [`DerivationError`] if the address part is malformed.
///
/// # Examples
///
/// ```
/// use renew_ip::derive::derive_table_id;
///
/// assert_eq!(derive_table_id("192.168.13.100/24").unwrap(), 113);
/// ```
pub fn derive_table_id(address: &str) -> Result<u16, DerivationError> {
    let [_, _, c, _] = octets(address)?;
    Ok(TABLE_BASE + u16::from(c))
}

fn octets(address: &str) -> Result<[u8; 4], DerivationError> {
    let host = address.split_once('/').map_or(address, |(host, _)| host);
    let parts: Vec<&str> = host.split('.').collect();

    if parts.len() != 4 {
        return Err(DerivationError::OctetCount {
            address: address.to_string(),
            count: parts.len(),
        });
    }

    let mut octets = [0_u8; 4];
    for (slot, part) in octets.iter_mut().zip(&parts) {
        *slot = parse_octet(part).ok_or_else(|| DerivationError::InvalidOctet {
            address: address.to_string(),
            octet: (*part).to_string(),
        })?;
    }
    Ok(octets)
}

fn parse_octet(part: &str) -> Option<u8> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

#[cfg(test)]
#[path = "derive_tests.rs"]
mod tests;
