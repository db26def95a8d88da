//! RENEW-IP: DHCP dual-lease reconciler
//!
//! A library for detecting network interfaces that temporarily hold two
//! IPv4 leases and rewriting their systemd-networkd configuration so the
//! address, gateway and routing table follow the new lease.

pub mod config;
pub mod derive;
pub mod detect;
pub mod document;
pub mod filter;
pub mod listing;
pub mod reconcile;
pub mod store;
