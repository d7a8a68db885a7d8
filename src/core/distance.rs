use crate::error::Error;
use crate::models::{BoundingBox, Entity, GeoPoint};

/// Earth's radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate the Haversine distance between two points in kilometers
///
/// Symmetric within floating-point tolerance and zero for identical points.
/// The formula is well-behaved across the ±180° longitude seam and near the
/// poles without special-casing.
#[inline]
pub fn haversine_distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat_a_rad = a.latitude().to_radians();
    let lat_b_rad = b.latitude().to_radians();
    let delta_lat = (b.latitude() - a.latitude()).to_radians();
    let delta_lon = (b.longitude() - a.longitude()).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat_a_rad.cos() * lat_b_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Keep the candidates within `radius_km` of the reference point
///
/// The filter is inclusive (`<=`) and stable: surviving entities keep their
/// input order, and no resorting by distance happens here. A zero radius is
/// valid and keeps only entities at the exact reference point.
///
/// # Errors
/// `Error::InvalidRadius` when `radius_km` is negative or non-finite.
pub fn filter_within_radius(
    reference: GeoPoint,
    candidates: &[Entity],
    radius_km: f64,
) -> Result<Vec<Entity>, Error> {
    if !radius_km.is_finite() || radius_km < 0.0 {
        return Err(Error::InvalidRadius(radius_km));
    }

    Ok(candidates
        .iter()
        .filter(|entity| haversine_distance_km(reference, entity.position) <= radius_km)
        .cloned()
        .collect())
}

/// Calculate a bounding box around a center point
///
/// Used for map viewport fitting only, never as a filtering step.
/// 1° latitude ≈ 111km, 1° longitude ≈ 111km * cos(latitude).
pub fn bounding_box(center: GeoPoint, radius_km: f64) -> BoundingBox {
    let lat_delta = radius_km / 111.0;
    let lon_delta = radius_km / (111.0 * center.latitude().to_radians().cos().abs());

    BoundingBox {
        min_lat: center.latitude() - lat_delta,
        max_lat: center.latitude() + lat_delta,
        min_lon: center.longitude() - lon_delta,
        max_lon: center.longitude() + lon_delta,
    }
}
