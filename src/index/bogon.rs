//! Reserved (bogon) IPv4 range table.
//!
//! The table is built once on first use from a fixed list of IANA
//! reserved networks and never changes afterwards.

use ipnet::Ipv4Net;
use once_cell::sync::Lazy;
use std::net::Ipv4Addr;

use super::interval::IntervalList;
use crate::key::{ipv4_block_end, ipv4_to_key, AddressKey};
use crate::IpInfo;

/// A reserved network and its description.
struct ReservedNetwork {
    address: Ipv4Addr,
    prefix_len: u8,
    description: &'static str,
}

impl ReservedNetwork {
    const fn new(address: Ipv4Addr, prefix_len: u8, description: &'static str) -> Self {
        Self {
            address,
            prefix_len,
            description,
        }
    }
}

// Source: https://ipinfo.io/bogon
// Sorted by address; the table is built with in-order appends.
const RESERVED_NETWORKS: [ReservedNetwork; 14] = [
    ReservedNetwork::new(Ipv4Addr::new(0, 0, 0, 0), 8, "\"This\" network"),
    ReservedNetwork::new(Ipv4Addr::new(10, 0, 0, 0), 8, "Private-use networks"),
    ReservedNetwork::new(Ipv4Addr::new(100, 64, 0, 0), 10, "Carrier-grade NAT"),
    ReservedNetwork::new(Ipv4Addr::new(127, 0, 0, 0), 8, "Loopback"),
    ReservedNetwork::new(Ipv4Addr::new(169, 254, 0, 0), 16, "Link local"),
    ReservedNetwork::new(Ipv4Addr::new(172, 16, 0, 0), 12, "Private-use networks"),
    ReservedNetwork::new(Ipv4Addr::new(192, 0, 0, 0), 24, "IETF protocol assignments"),
    ReservedNetwork::new(Ipv4Addr::new(192, 0, 2, 0), 24, "TEST-NET-1"),
    ReservedNetwork::new(Ipv4Addr::new(192, 168, 0, 0), 16, "Private-use networks"),
    ReservedNetwork::new(
        Ipv4Addr::new(198, 18, 0, 0),
        15,
        "Network interconnect device benchmark testing",
    ),
    ReservedNetwork::new(Ipv4Addr::new(198, 51, 100, 0), 24, "TEST-NET-2"),
    ReservedNetwork::new(Ipv4Addr::new(203, 0, 113, 0), 24, "TEST-NET-3"),
    ReservedNetwork::new(Ipv4Addr::new(224, 0, 0, 0), 4, "Multicast"),
    ReservedNetwork::new(Ipv4Addr::new(240, 0, 0, 0), 4, "Reserved for future use"),
];

static RESERVED_RANGES: Lazy<ReservedRangeTable> = Lazy::new(ReservedRangeTable::build);

/// Get the process-wide reserved range table.
///
/// The first call builds the table; concurrent first calls block until it
/// is ready.
pub fn reserved_ranges() -> &'static ReservedRangeTable {
    &RESERVED_RANGES
}

/// ReservedRangeTable resolves addresses inside reserved IPv4 networks to a
/// description-only [`IpInfo`].
#[derive(Debug)]
pub struct ReservedRangeTable {
    ranges: IntervalList<AddressKey, IpInfo>,
}

impl ReservedRangeTable {
    fn build() -> Self {
        let mut ranges = IntervalList::with_capacity(RESERVED_NETWORKS.len());

        for network in &RESERVED_NETWORKS {
            let start = ipv4_to_key(network.address);
            let Some(end) = ipv4_block_end(network.address, network.prefix_len) else {
                log::error!(
                    "Skipping reserved network {}/{}: invalid prefix length",
                    network.address,
                    network.prefix_len
                );
                continue;
            };

            if let Err(e) = ranges.add(start, end, IpInfo::reserved(network.description)) {
                log::error!(
                    "Skipping reserved network {}/{}: {}",
                    network.address,
                    network.prefix_len,
                    e
                );
            }
        }

        log::debug!("Built reserved range table: {} ranges", ranges.len());

        Self { ranges }
    }

    /// Look up the reserved range containing `key`.
    pub fn try_get(&self, key: AddressKey) -> Option<IpInfo> {
        self.ranges.get(key).cloned()
    }

    /// Check if `key` falls inside a reserved range.
    pub fn contains(&self, key: AddressKey) -> bool {
        self.ranges.get(key).is_some()
    }

    /// Get the number of reserved ranges.
    pub fn range_count(&self) -> usize {
        self.ranges.len()
    }

    /// Iterate over the reserved networks and their descriptions.
    pub fn networks(&self) -> impl Iterator<Item = (Ipv4Net, &'static str)> {
        RESERVED_NETWORKS.iter().filter_map(|network| {
            Ipv4Net::new(network.address, network.prefix_len)
                .ok()
                .map(|net| (net, network.description))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(ip: &str) -> AddressKey {
        ipv4_to_key(ip.parse().unwrap())
    }

    #[test]
    fn test_table_holds_all_networks() {
        assert_eq!(reserved_ranges().range_count(), 14);
        assert_eq!(reserved_ranges().networks().count(), 14);
    }

    #[test]
    fn test_known_reserved_addresses() {
        let table = reserved_ranges();
        for ip in [
            "0.0.0.0",
            "0.0.0.1",
            "10.0.0.0",
            "10.0.1.0",
            "100.64.0.0",
            "127.0.0.0",
            "169.254.0.0",
            "172.16.0.0",
            "192.0.0.0",
            "192.0.2.0",
            "192.168.0.0",
            "198.18.0.0",
            "198.51.100.0",
            "203.0.113.0",
            "224.0.0.0",
            "240.0.0.0",
            "255.255.255.254",
            "255.255.255.255",
        ] {
            let info = table.try_get(key(ip));
            assert!(info.is_some(), "{} should be reserved", ip);
            assert!(!info.unwrap().description().unwrap().is_empty());
        }
    }

    #[test]
    fn test_public_addresses_not_reserved() {
        let table = reserved_ranges();
        for ip in ["8.8.8.8", "1.1.1.1", "100.63.255.255", "100.128.0.0", "172.32.0.0"] {
            assert!(!table.contains(key(ip)), "{} should not be reserved", ip);
        }
    }

    #[test]
    fn test_range_bounds() {
        let table = reserved_ranges();

        assert_eq!(
            table.try_get(key("10.255.255.255")),
            Some(IpInfo::reserved("Private-use networks"))
        );
        assert!(!table.contains(key("11.0.0.0")));

        assert_eq!(
            table.try_get(key("198.19.255.255")),
            Some(IpInfo::reserved(
                "Network interconnect device benchmark testing"
            ))
        );
        assert!(!table.contains(key("198.20.0.0")));

        assert_eq!(
            table.try_get(key("172.31.255.255")),
            Some(IpInfo::reserved("Private-use networks"))
        );
    }

    #[test]
    fn test_networks_listing() {
        let first = reserved_ranges().networks().next().unwrap();
        assert_eq!(first.0.to_string(), "0.0.0.0/8");
        assert_eq!(first.1, "\"This\" network");
    }

    #[test]
    fn test_build_is_deterministic() {
        let table = ReservedRangeTable::build();
        assert_eq!(table.range_count(), reserved_ranges().range_count());
    }
}
