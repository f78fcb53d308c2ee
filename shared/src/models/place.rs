//! Location search results

use serde::{Deserialize, Serialize};

use crate::types::{location_key, Coordinates};

/// A place returned by the provider's location search
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Place {
    pub id: i64,
    pub name: String,
    pub region: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
    pub url: String,
}

impl Place {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lon)
    }

    pub fn key(&self) -> String {
        location_key(self.lat, self.lon)
    }

    /// Human readable label, e.g. "London, City of London, United Kingdom"
    pub fn display_name(&self) -> String {
        [self.name.as_str(), self.region.as_str(), self.country.as_str()]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn london() -> Place {
        Place {
            id: 2801268,
            name: "London".to_string(),
            region: "City of London, Greater London".to_string(),
            country: "United Kingdom".to_string(),
            lat: 51.52,
            lon: -0.11,
            url: "london-city-of-london-greater-london-united-kingdom".to_string(),
        }
    }

    #[test]
    fn test_place_key() {
        assert_eq!(london().key(), "51.52--0.11");
    }

    #[test]
    fn test_display_name_skips_empty_region() {
        let mut place = london();
        place.region = String::new();
        assert_eq!(place.display_name(), "London, United Kingdom");
    }

    #[test]
    fn test_place_rejects_missing_fields() {
        let json = r#"{"id":1,"name":"X","region":"","country":"Y","lat":1.0,"lon":2.0}"#;
        assert!(serde_json::from_str::<Place>(json).is_err());
    }

    #[test]
    fn test_place_rejects_wrong_types() {
        let json = r#"{"id": "1", "name": "X", "region": "", "country": "Y",
                       "lat": 1.0, "lon": 2.0, "url": "x"}"#;
        assert!(serde_json::from_str::<Place>(json).is_err());
    }
}
