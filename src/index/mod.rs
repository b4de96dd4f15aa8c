//! In-memory range index structures and the index trait.

pub mod bogon;
mod column;
mod interval;
mod packed;
mod range;

pub use bogon::{reserved_ranges, ReservedRangeTable};
pub use column::{DedupKey, MemoryColumn};
pub use interval::IntervalList;
pub use packed::CityRegionCountry;
pub use range::{RangeIndex, DISTINCT_INFO_COUNT_HINT, RANGE_COUNT_HINT};

use crate::key::AddressKey;
use crate::{GeoInfo, IpInfo, Result};

/// IpIndex stores geographic information for address key ranges.
///
/// Implementations are built by a single writer through [`add`](Self::add)
/// and are read-only afterwards; lookups never mutate state.
pub trait IpIndex: Send + Sync {
    /// Add the range `[start, end]` with its information.
    ///
    /// Ranges must arrive in ascending, non-overlapping order.
    fn add(&mut self, start: AddressKey, end: AddressKey, info: &GeoInfo) -> Result<()>;

    /// Look up the information for the range containing `key`.
    fn try_get(&self, key: AddressKey) -> Option<IpInfo>;

    /// Get the number of distinct information records.
    fn info_count(&self) -> usize;

    /// Get the number of ranges.
    fn range_count(&self) -> usize;
}
