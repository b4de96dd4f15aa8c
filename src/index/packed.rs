//! Single-buffer encoding of the city, region and country fields.

use crate::error::PackedStringError;

/// Maximum number of characters per field.
const MAX_FIELD_CHARS: usize = u16::MAX as usize;

/// CityRegionCountry packs three text fields into one allocation.
///
/// The buffer holds `city + region + country`; two markers record the city
/// and region lengths in bytes and the country takes the rest. Each field
/// is limited to 65535 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct CityRegionCountry {
    data: Box<str>,
    city_len: u32,
    region_len: u32,
}

impl CityRegionCountry {
    /// Pack the three fields.
    pub fn new(city: &str, region: &str, country: &str) -> Result<Self, PackedStringError> {
        check_field("city", city)?;
        check_field("region", region)?;
        check_field("country", country)?;

        let mut data = String::with_capacity(city.len() + region.len() + country.len());
        data.push_str(city);
        data.push_str(region);
        data.push_str(country);

        // At most 4 bytes per char, so both lengths fit in u32
        Ok(Self {
            data: data.into_boxed_str(),
            city_len: city.len() as u32,
            region_len: region.len() as u32,
        })
    }

    /// The city field.
    pub fn city(&self) -> &str {
        &self.data[..self.region_offset()]
    }

    /// The region field.
    pub fn region(&self) -> &str {
        &self.data[self.region_offset()..self.country_offset()]
    }

    /// The country field.
    pub fn country(&self) -> &str {
        &self.data[self.country_offset()..]
    }

    fn region_offset(&self) -> usize {
        self.city_len as usize
    }

    fn country_offset(&self) -> usize {
        self.city_len as usize + self.region_len as usize
    }
}

fn check_field(field: &'static str, value: &str) -> Result<(), PackedStringError> {
    // Byte length bounds the char count from above
    if value.len() <= MAX_FIELD_CHARS {
        return Ok(());
    }

    let len = value.chars().count();
    if len > MAX_FIELD_CHARS {
        return Err(PackedStringError::FieldTooLong { field, len });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_round_trip() {
        let packed = CityRegionCountry::new("South Brisbane", "Queensland", "AU").unwrap();
        assert_eq!(packed.city(), "South Brisbane");
        assert_eq!(packed.region(), "Queensland");
        assert_eq!(packed.country(), "AU");
    }

    #[test]
    fn test_empty_fields() {
        let packed = CityRegionCountry::new("", "", "JP").unwrap();
        assert_eq!(packed.city(), "");
        assert_eq!(packed.region(), "");
        assert_eq!(packed.country(), "JP");

        let empty = CityRegionCountry::new("", "", "").unwrap();
        assert_eq!(empty, CityRegionCountry::default());
        assert_eq!(empty.country(), "");
    }

    #[test]
    fn test_multibyte_fields() {
        let packed = CityRegionCountry::new("São Paulo", "Île-de-France", "東京").unwrap();
        assert_eq!(packed.city(), "São Paulo");
        assert_eq!(packed.region(), "Île-de-France");
        assert_eq!(packed.country(), "東京");
    }

    #[test]
    fn test_fields_at_length_limit() {
        let long = "x".repeat(MAX_FIELD_CHARS);
        let packed = CityRegionCountry::new(&long, &long, &long).unwrap();
        assert_eq!(packed.city(), long);
        assert_eq!(packed.region(), long);
        assert_eq!(packed.country(), long);
    }

    #[test]
    fn test_multibyte_fields_at_length_limit() {
        let city = "é".repeat(MAX_FIELD_CHARS);
        let region = "東".repeat(MAX_FIELD_CHARS);
        let country = "🌏".repeat(MAX_FIELD_CHARS);
        let packed = CityRegionCountry::new(&city, &region, &country).unwrap();

        assert_eq!(packed.city(), city);
        assert_eq!(packed.region(), region);
        assert_eq!(packed.country(), country);
    }

    #[test]
    fn test_multibyte_field_too_long() {
        let too_long = "é".repeat(MAX_FIELD_CHARS + 1);

        let err = CityRegionCountry::new(&too_long, "", "FR").unwrap_err();
        assert_eq!(
            err,
            PackedStringError::FieldTooLong {
                field: "city",
                len: MAX_FIELD_CHARS + 1
            }
        );
    }

    #[test]
    fn test_field_too_long() {
        let too_long = "x".repeat(MAX_FIELD_CHARS + 1);

        let err = CityRegionCountry::new(&too_long, "", "").unwrap_err();
        assert_eq!(
            err,
            PackedStringError::FieldTooLong {
                field: "city",
                len: MAX_FIELD_CHARS + 1
            }
        );

        assert!(matches!(
            CityRegionCountry::new("", &too_long, ""),
            Err(PackedStringError::FieldTooLong { field: "region", .. })
        ));
        assert!(matches!(
            CityRegionCountry::new("", "", &too_long),
            Err(PackedStringError::FieldTooLong { field: "country", .. })
        ));
    }

    #[test]
    fn test_equal_fields_compare_equal() {
        let a = CityRegionCountry::new("ab", "c", "").unwrap();
        let b = CityRegionCountry::new("ab", "c", "").unwrap();
        let shifted = CityRegionCountry::new("a", "bc", "").unwrap();

        assert_eq!(a, b);
        assert_ne!(a, shifted);
    }
}
