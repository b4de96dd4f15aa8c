//! Lookup service combining the primary range index with the reserved
//! range table.

use std::net::IpAddr;

use crate::index::{reserved_ranges, IpIndex, RangeIndex, ReservedRangeTable};
use crate::key::ip_to_key;
use crate::{GeoInfo, IpInfo, Result};

/// LookupService registers and resolves information for IP ranges.
///
/// Insertions whose start address lies in a reserved (bogon) network are
/// dropped with a warning instead of failing, so a bulk import can proceed
/// past such rows. Lookups that miss the primary index fall back to the
/// reserved range table.
///
/// Building takes `&mut self` and lookups take `&self`: once the service is
/// shared (for example through [`SharedLookup`](crate::SharedLookup)) it can
/// no longer be modified.
///
/// # Examples
/// ```
/// use iplookup::{GeoInfo, LookupService};
///
/// let mut service = LookupService::new();
/// service
///     .add(
///         "1.0.0.0".parse().unwrap(),
///         "1.0.16.255".parse().unwrap(),
///         &GeoInfo::new("South Brisbane", "Queensland", "AU"),
///     )
///     .unwrap();
///
/// let info = service.try_get("1.0.0.5".parse().unwrap()).unwrap();
/// assert_eq!(info.location().unwrap().country, "AU");
///
/// let reserved = service.try_get("10.0.0.5".parse().unwrap()).unwrap();
/// assert_eq!(reserved.description(), Some("Private-use networks"));
/// ```
pub struct LookupService<I = RangeIndex> {
    index: I,
    reserved: &'static ReservedRangeTable,
    dropped: usize,
}

impl LookupService<RangeIndex> {
    /// Create a service backed by an empty [`RangeIndex`].
    pub fn new() -> Self {
        Self::with_index(RangeIndex::new())
    }
}

impl Default for LookupService<RangeIndex> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: IpIndex> LookupService<I> {
    /// Create a service backed by the given index.
    pub fn with_index(index: I) -> Self {
        Self {
            index,
            reserved: reserved_ranges(),
            dropped: 0,
        }
    }

    /// Add the range `[start, end]` with its information.
    ///
    /// Only the start address is checked against the reserved table; a range
    /// starting outside reserved space is accepted even if it extends into it.
    pub fn add(&mut self, start: IpAddr, end: IpAddr, info: &GeoInfo) -> Result<()> {
        let start_key = ip_to_key(start);
        if self.reserved.contains(start_key) {
            log::warn!("Add: reserved IP address ignored, value: {}", start);
            self.dropped += 1;
            return Ok(());
        }

        self.index.add(start_key, ip_to_key(end), info)
    }

    /// Look up the information for an IP address.
    ///
    /// The primary index is consulted first, then the reserved range table.
    pub fn try_get(&self, ip: IpAddr) -> Option<IpInfo> {
        let key = ip_to_key(ip);
        self.index
            .try_get(key)
            .or_else(|| self.reserved.try_get(key))
    }

    /// Check if an IP address lies in a reserved network.
    pub fn is_reserved(&self, ip: IpAddr) -> bool {
        self.reserved.contains(ip_to_key(ip))
    }

    /// Get the underlying index.
    pub fn index(&self) -> &I {
        &self.index
    }

    /// Get the number of ranges in the primary index.
    pub fn range_count(&self) -> usize {
        self.index.range_count()
    }

    /// Get the number of distinct information records in the primary index.
    pub fn info_count(&self) -> usize {
        self.index.info_count()
    }

    /// Get the number of insertions dropped because they started in a
    /// reserved network.
    pub fn dropped_count(&self) -> usize {
        self.dropped
    }
}
