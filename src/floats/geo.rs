//! Great-circle distance and nearest-float ranking

use super::error::GeoResult;
use super::types::{Coordinate, FloatRecord, RankedFloat};

/// Mean Earth radius in kilometres
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two coordinates in kilometres
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    // Clamp guards against h drifting past 1.0 for antipodal points
    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}

/// Sort floats by ascending distance to `reference`
///
/// The sort is stable, so floats at equal distance keep their input order.
/// Every coordinate is validated first.
pub fn rank_by_distance(reference: Coordinate, floats: &[FloatRecord]) -> GeoResult<Vec<RankedFloat>> {
    reference.validate()?;

    let mut ranked = floats
        .iter()
        .map(|float| {
            float.location.validate()?;
            Ok(RankedFloat {
                distance_km: haversine_km(reference, float.location),
                float: float.clone(),
            })
        })
        .collect::<GeoResult<Vec<_>>>()?;

    ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    Ok(ranked)
}

/// The `limit` floats closest to `reference`
pub fn nearest(
    reference: Coordinate,
    floats: &[FloatRecord],
    limit: usize,
) -> GeoResult<Vec<RankedFloat>> {
    let mut ranked = rank_by_distance(reference, floats)?;
    ranked.truncate(limit);
    Ok(ranked)
}
