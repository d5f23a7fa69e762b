//! Static float catalog and map annotations
//!
//! The demo ships a fixed set of floats in the northern Indian Ocean and a
//! handful of coastal tsunami-risk markers. Nothing here is ever mutated.

use super::error::{GeoError, GeoResult};
use super::geo;
use super::types::{Coordinate, FloatRecord, RankedFloat, RiskLevel, TsunamiRiskLocation};

/// Default reference point for nearest-float queries (geographic centre of India)
pub const REFERENCE_POINT: Coordinate = Coordinate::new_unchecked(20.5937, 78.9629);

/// Number of floats returned by the nearest-float query in the demo
pub const DEFAULT_NEAREST_LIMIT: usize = 3;

/// Read-only collection of floats and map annotations
#[derive(Debug, Clone)]
pub struct FloatCatalog {
    floats: Vec<FloatRecord>,
    risk_locations: Vec<TsunamiRiskLocation>,
}

impl FloatCatalog {
    /// Create a catalog from explicit records
    ///
    /// Fails if any coordinate is out of range or a float id is repeated.
    pub fn new(
        floats: Vec<FloatRecord>,
        risk_locations: Vec<TsunamiRiskLocation>,
    ) -> GeoResult<Self> {
        let mut seen = std::collections::HashSet::new();
        for float in &floats {
            float.location.validate()?;
            if !seen.insert(float.id.as_str()) {
                return Err(GeoError::DuplicateFloat(float.id.clone()));
            }
        }
        for location in &risk_locations {
            location.location.validate()?;
        }

        Ok(Self {
            floats,
            risk_locations,
        })
    }

    /// The catalog compiled into the demo
    pub fn builtin() -> Self {
        Self {
            floats: builtin_floats(),
            risk_locations: builtin_risk_locations(),
        }
    }

    pub fn floats(&self) -> &[FloatRecord] {
        &self.floats
    }

    pub fn risk_locations(&self) -> &[TsunamiRiskLocation] {
        &self.risk_locations
    }

    /// Look up a float by id
    pub fn get(&self, id: &str) -> GeoResult<&FloatRecord> {
        self.floats
            .iter()
            .find(|f| f.id == id)
            .ok_or_else(|| GeoError::FloatNotFound(id.to_string()))
    }

    /// The `limit` floats closest to `reference`
    pub fn nearest(&self, reference: Coordinate, limit: usize) -> GeoResult<Vec<RankedFloat>> {
        geo::nearest(reference, &self.floats, limit)
    }
}

impl Default for FloatCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_floats() -> Vec<FloatRecord> {
    vec![
        FloatRecord::new(
            "2902746",
            "Arabian Sea Float",
            Coordinate::new_unchecked(15.0, 65.0),
            28.4,
        )
        .seasonal_offset(1.8),
        FloatRecord::new(
            "2902755",
            "Bay of Bengal Float",
            Coordinate::new_unchecked(13.5, 87.5),
            29.1,
        )
        .seasonal_offset(1.2),
        FloatRecord::new(
            "2902761",
            "Equatorial Indian Ocean Float",
            Coordinate::new_unchecked(-2.0, 80.0),
            28.8,
        )
        .seasonal_offset(0.6),
    ]
}

fn builtin_risk_locations() -> Vec<TsunamiRiskLocation> {
    let location = |name: &str, lat, lon, risk, population, color: &str| TsunamiRiskLocation {
        name: name.to_string(),
        location: Coordinate::new_unchecked(lat, lon),
        risk,
        population,
        color: color.to_string(),
    };

    vec![
        location("Chennai", 13.0827, 80.2707, RiskLevel::High, 7_088_000, "#e53935"),
        location("Port Blair", 11.6234, 92.7265, RiskLevel::High, 108_058, "#e53935"),
        location("Visakhapatnam", 17.6868, 83.2185, RiskLevel::Medium, 2_035_922, "#fb8c00"),
        location("Kochi", 9.9312, 76.2673, RiskLevel::Medium, 677_381, "#fb8c00"),
        location("Mumbai", 19.0760, 72.8777, RiskLevel::Low, 12_442_373, "#43a047"),
    ]
}
