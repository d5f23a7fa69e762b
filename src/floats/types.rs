//! Core data types for the float catalog
//!
//! - `Coordinate`: A validated latitude/longitude pair
//! - `FloatRecord`: A static ocean float with its last temperature reading
//! - `RankedFloat`: A float annotated with its distance to a reference point
//! - `TsunamiRiskLocation` and `RiskLevel`: Decorative map annotations

use serde::{Deserialize, Serialize};

use super::error::{GeoError, GeoResult};

/// A point on the Earth's surface in decimal degrees
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinate {
    /// Latitude in degrees, [-90, 90]
    pub lat: f64,
    /// Longitude in degrees, [-180, 180]
    pub lon: f64,
}

impl Coordinate {
    /// Create a coordinate, rejecting out-of-range or non-finite values
    pub fn new(lat: f64, lon: f64) -> GeoResult<Self> {
        let coord = Self { lat, lon };
        coord.validate()?;
        Ok(coord)
    }

    /// Create a coordinate from trusted constants without validation
    pub const fn new_unchecked(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Check that latitude and longitude are within their valid ranges
    pub fn validate(&self) -> GeoResult<()> {
        let lat_ok = self.lat.is_finite() && (-90.0..=90.0).contains(&self.lat);
        let lon_ok = self.lon.is_finite() && (-180.0..=180.0).contains(&self.lon);

        if lat_ok && lon_ok {
            Ok(())
        } else {
            Err(GeoError::InvalidCoordinate {
                lat: self.lat,
                lon: self.lon,
            })
        }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lat, self.lon)
    }
}

/// An oceanographic float with its last known reading
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FloatRecord {
    /// Unique identifier (WMO platform number)
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Last reported position
    pub location: Coordinate,
    /// Last known sea surface temperature in °C
    pub temperature: f64,
    /// Amplitude in °C of the synthetic seasonal cycle
    pub seasonal_offset: f64,
}

impl FloatRecord {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        location: Coordinate,
        temperature: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location,
            temperature,
            seasonal_offset: 0.0,
        }
    }

    /// Builder method: set the seasonal amplitude
    pub fn seasonal_offset(mut self, offset: f64) -> Self {
        self.seasonal_offset = offset;
        self
    }
}

/// A float together with its great-circle distance to a reference point
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RankedFloat {
    #[serde(flatten)]
    pub float: FloatRecord,
    /// Distance in kilometres
    pub distance_km: f64,
}

/// Static tsunami risk classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::High => write!(f, "high"),
        }
    }
}

/// A coastal location annotated on the map
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TsunamiRiskLocation {
    pub name: String,
    pub location: Coordinate,
    pub risk: RiskLevel,
    pub population: u64,
    /// Marker colour as a CSS hex string
    pub color: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_bounds() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
        assert!(Coordinate::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn test_coordinate_rejects_out_of_range() {
        assert_eq!(
            Coordinate::new(90.5, 0.0),
            Err(GeoError::InvalidCoordinate { lat: 90.5, lon: 0.0 })
        );
        assert!(Coordinate::new(0.0, -180.1).is_err());
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_ranked_float_serializes_flat() {
        let ranked = RankedFloat {
            float: FloatRecord::new("1", "Test", Coordinate::new_unchecked(1.0, 2.0), 25.0),
            distance_km: 12.5,
        };
        let json = serde_json::to_value(&ranked).unwrap();
        assert_eq!(json["id"], "1");
        assert_eq!(json["distance_km"], 12.5);
        assert_eq!(json["location"]["lat"], 1.0);
    }

    #[test]
    fn test_risk_level_serde() {
        let json = serde_json::to_string(&RiskLevel::High).unwrap();
        assert_eq!(json, "\"high\"");
        assert_eq!(RiskLevel::Medium.to_string(), "medium");
    }
}
