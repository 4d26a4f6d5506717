/// Earth's radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle (haversine) distance between two points, in kilometers.
///
/// Coordinates are in degrees. This is the only geospatial computation
/// the engine performs; there is no routing.
#[inline]
pub fn great_circle_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// True when the point lies within `radius_km` of the center.
#[inline]
pub fn within_radius(
    center_lat: f64,
    center_lon: f64,
    lat: f64,
    lon: f64,
    radius_km: f64,
) -> bool {
    great_circle_km(center_lat, center_lon, lat, lon) <= radius_km
}
