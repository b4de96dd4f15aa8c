//! Primary address range table: interval list + deduplicated geo records.

use std::hash::{Hash, Hasher};

use super::column::{DedupKey, MemoryColumn};
use super::interval::IntervalList;
use super::packed::CityRegionCountry;
use super::IpIndex;
use crate::key::AddressKey;
use crate::{GeoInfo, IpInfo, Result};

/// Typical number of ranges in a full city-level IPv4 source.
pub const RANGE_COUNT_HINT: usize = 4_000_000;

/// Typical number of distinct geo records in a full city-level IPv4 source.
pub const DISTINCT_INFO_COUNT_HINT: usize = 400_000;

/// Deduplicated unit of geo information.
///
/// Equality and hashing compare the coordinates by bit pattern, so two
/// records that differ only by float rounding are stored separately.
#[derive(Debug, Clone)]
struct InfoRecord {
    place: CityRegionCountry,
    latitude: f32,
    longitude: f32,
}

impl InfoRecord {
    fn new(info: &GeoInfo) -> Result<Self> {
        Ok(Self {
            place: CityRegionCountry::new(&info.city, &info.region, &info.country)?,
            latitude: info.latitude,
            longitude: info.longitude,
        })
    }

    fn ip_info(&self) -> IpInfo {
        IpInfo::Location(GeoInfo {
            city: self.place.city().to_string(),
            region: self.place.region().to_string(),
            country: self.place.country().to_string(),
            latitude: self.latitude,
            longitude: self.longitude,
        })
    }
}

impl PartialEq for InfoRecord {
    fn eq(&self, other: &Self) -> bool {
        self.place == other.place
            && self.latitude.to_bits() == other.latitude.to_bits()
            && self.longitude.to_bits() == other.longitude.to_bits()
    }
}

impl Eq for InfoRecord {}

impl Hash for InfoRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.place.hash(state);
        self.latitude.to_bits().hash(state);
        self.longitude.to_bits().hash(state);
    }
}

/// RangeIndex maps address ranges to geographic information.
///
/// Ranges must be added in ascending, non-overlapping order. Ranges with
/// identical information share one stored record, so memory grows with the
/// number of distinct records rather than the number of ranges.
///
/// # Examples
/// ```
/// use iplookup::index::{IpIndex, RangeIndex};
/// use iplookup::GeoInfo;
///
/// let mut index = RangeIndex::new();
/// let info = GeoInfo::new("Shinjuku", "Tokyo", "JP");
/// index.add(100, 199, &info).unwrap();
/// index.add(300, 399, &info).unwrap();
///
/// assert_eq!(index.range_count(), 2);
/// assert_eq!(index.info_count(), 1);
/// assert!(index.try_get(150).is_some());
/// assert!(index.try_get(250).is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RangeIndex {
    info_key_by_range: IntervalList<AddressKey, DedupKey>,
    records: MemoryColumn<InfoRecord>,
}

impl RangeIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty index with preallocated storage.
    pub fn with_capacity(ranges: usize, distinct_infos: usize) -> Self {
        Self {
            info_key_by_range: IntervalList::with_capacity(ranges),
            records: MemoryColumn::with_capacity(distinct_infos),
        }
    }
}

impl IpIndex for RangeIndex {
    fn add(&mut self, start: AddressKey, end: AddressKey, info: &GeoInfo) -> Result<()> {
        let record = InfoRecord::new(info)?;

        // Reject before touching the column so a failed insert leaves no
        // orphan record behind.
        self.info_key_by_range.validate_add(start, end)?;

        let key = self.records.add(record)?;
        self.info_key_by_range.add(start, end, key)?;
        Ok(())
    }

    fn try_get(&self, key: AddressKey) -> Option<IpInfo> {
        let &info_key = self.info_key_by_range.get(key)?;
        Some(self.records.get(info_key).ip_info())
    }

    fn info_count(&self) -> usize {
        self.records.len()
    }

    fn range_count(&self) -> usize {
        self.info_key_by_range.len()
    }
}
