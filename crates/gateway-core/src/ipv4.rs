//! IPv4 address validation

use std::net::Ipv4Addr;

/// Check that `address` is a dotted-quad IPv4 address
///
/// Exactly four decimal octets in 0..=255 with nothing around them. Octets
/// with leading zeros (`010`) are rejected.
pub fn is_valid_ipv4(address: &str) -> bool {
    address.parse::<Ipv4Addr>().is_ok()
}
