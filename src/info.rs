//! Lookup result types.

use serde::Serialize;

/// Geographic information shared by all addresses of a range.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct GeoInfo {
    pub city: String,
    pub region: String,
    pub country: String,
    pub latitude: f32,
    pub longitude: f32,
}

impl GeoInfo {
    /// Create geographic information with zero coordinates.
    pub fn new(city: &str, region: &str, country: &str) -> Self {
        Self {
            city: city.to_string(),
            region: region.to_string(),
            country: country.to_string(),
            latitude: 0.0,
            longitude: 0.0,
        }
    }

    /// Set the coordinates.
    pub fn with_coordinates(mut self, latitude: f32, longitude: f32) -> Self {
        self.latitude = latitude;
        self.longitude = longitude;
        self
    }
}

/// Information associated with an IP address.
///
/// Ordinary ranges carry a [`GeoInfo`]; reserved (bogon) ranges only carry a
/// free-text description since city, region and country mean nothing there.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum IpInfo {
    /// Location of a routable range
    Location(GeoInfo),
    /// Description of a reserved range
    Reserved { description: String },
}

impl IpInfo {
    /// Create a description-only info.
    pub fn reserved(description: &str) -> Self {
        IpInfo::Reserved {
            description: description.to_string(),
        }
    }

    /// Get the location, if this is not a reserved range.
    pub fn location(&self) -> Option<&GeoInfo> {
        match self {
            IpInfo::Location(geo) => Some(geo),
            IpInfo::Reserved { .. } => None,
        }
    }

    /// Get the description, if this is a reserved range.
    pub fn description(&self) -> Option<&str> {
        match self {
            IpInfo::Location(_) => None,
            IpInfo::Reserved { description } => Some(description),
        }
    }

    /// Check if this info describes a reserved range.
    pub fn is_reserved(&self) -> bool {
        matches!(self, IpInfo::Reserved { .. })
    }
}

impl From<GeoInfo> for IpInfo {
    fn from(geo: GeoInfo) -> Self {
        IpInfo::Location(geo)
    }
}
