//! Local tangent-plane projection.
//!
//! Equirectangular approximation around the service origin. The east-west
//! scale shrinks with the cosine of the origin latitude so one planar meter
//! stays roughly one ground meter in both axes. Good for a few kilometers;
//! not a geodesic.

use std::f64::consts::PI;

use hexzone_core::GeoPoint;

/// WGS84 equatorial radius.
pub const EARTH_RADIUS_METERS: f64 = 6_378_137.0;

const DEG_TO_RAD: f64 = PI / 180.0;

/// Meters relative to the origin: `x` grows eastward, `y` northward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanarPoint {
    pub x: f64,
    pub y: f64,
}

/// Project `point` onto the plane tangent at `origin`.
#[must_use]
pub fn project(point: &GeoPoint, origin: &GeoPoint) -> PlanarPoint {
    let lat_scale = (origin.lat * DEG_TO_RAD).cos();
    PlanarPoint {
        x: (point.lng - origin.lng) * DEG_TO_RAD * EARTH_RADIUS_METERS * lat_scale,
        y: (point.lat - origin.lat) * DEG_TO_RAD * EARTH_RADIUS_METERS,
    }
}

/// Inverse of [`project`] for the same origin.
///
/// At the poles the east-west scale is zero, so `x` collapses onto the origin longitude.
#[must_use]
pub fn unproject(planar: &PlanarPoint, origin: &GeoPoint) -> GeoPoint {
    let lat_scale = (origin.lat * DEG_TO_RAD).cos();
    let lng = if lat_scale.abs() < f64::EPSILON {
        origin.lng
    } else {
        origin.lng + planar.x / (DEG_TO_RAD * EARTH_RADIUS_METERS * lat_scale)
    };
    GeoPoint {
        lng,
        lat: origin.lat + planar.y / (DEG_TO_RAD * EARTH_RADIUS_METERS),
    }
}
