//! Listing layer for obtaining per-interface IPv4 addresses.
//!
//! This module provides:
//! - Parsing of one-line-per-address listings ([`parse_listing`], [`AddressRecord`])
//! - Listing sources ([`ListingSource`], [`CommandSource`], [`FileSource`])
//! - Error handling ([`ListingError`])

mod error;
mod parser;
mod source;


pub use error::ListingError;
pub use parser::{AddressRecord, parse_listing};
pub use source::{CommandSource, FileSource, ListingSource};
