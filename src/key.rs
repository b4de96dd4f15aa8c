//! Address key canonicalization.
//!
//! Every interval operation in the crate compares plain `u64` keys. IPv4
//! addresses map to their 32-bit big-endian value widened to 64 bits; IPv6
//! addresses keep only their leading 64 bits (the network prefix), so two
//! IPv6 addresses sharing those bits map to the same key.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// The ordering key used by all interval structures.
pub type AddressKey = u64;

/// Convert an IP address to its address key.
pub fn ip_to_key(ip: IpAddr) -> AddressKey {
    match ip {
        IpAddr::V4(v4) => ipv4_to_key(v4),
        IpAddr::V6(v6) => ipv6_to_key(v6),
    }
}

/// Convert an IPv4 address to its address key.
pub fn ipv4_to_key(ip: Ipv4Addr) -> AddressKey {
    u64::from(u32::from(ip))
}

/// Convert an IPv6 address to its address key (leading 64 bits only).
pub fn ipv6_to_key(ip: Ipv6Addr) -> AddressKey {
    (u128::from(ip) >> 64) as u64
}

/// Last key of the IPv4 block starting at `network` with the given prefix length.
///
/// Computed as `network + 2^(32 - prefix_len) - 1`. Returns `None` for
/// prefix lengths above 32.
pub fn ipv4_block_end(network: Ipv4Addr, prefix_len: u8) -> Option<AddressKey> {
    let host_bits = 32u32.checked_sub(u32::from(prefix_len))?;
    Some(ipv4_to_key(network) + (1u64 << host_bits) - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ipv4_key_is_big_endian_value() {
        let ip: Ipv4Addr = "1.0.16.255".parse().unwrap();
        assert_eq!(ipv4_to_key(ip), 0x0100_10FF);
        assert_eq!(ipv4_to_key(Ipv4Addr::new(255, 255, 255, 255)), 0xFFFF_FFFF);
        assert_eq!(ipv4_to_key(Ipv4Addr::UNSPECIFIED), 0);
    }

    #[test]
    fn test_ipv6_key_uses_leading_bits() {
        let ip: Ipv6Addr = "2001:db8:85a3::8a2e:370:7334".parse().unwrap();
        assert_eq!(ipv6_to_key(ip), 0x2001_0db8_85a3_0000);
    }

    #[test]
    fn test_ipv6_addresses_sharing_prefix_alias() {
        let a: IpAddr = "2001:db8::1".parse().unwrap();
        let b: IpAddr = "2001:db8::ffff:ffff".parse().unwrap();
        assert_eq!(ip_to_key(a), ip_to_key(b));
    }

    #[test]
    fn test_ipv4_block_end() {
        let net = Ipv4Addr::new(10, 0, 0, 0);
        assert_eq!(ipv4_block_end(net, 8), Some(0x0AFF_FFFF));
        assert_eq!(ipv4_block_end(net, 32), Some(0x0A00_0000));
        assert_eq!(ipv4_block_end(Ipv4Addr::UNSPECIFIED, 0), Some(0xFFFF_FFFF));
        assert_eq!(ipv4_block_end(net, 33), None);
    }
}
