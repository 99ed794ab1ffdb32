use serde::{Deserialize, Serialize};

/// A WGS84 position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lng: f64,
    pub lat: f64,
}

impl GeoPoint {
    #[must_use]
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// Returns `true` when both components are finite and inside the degree ranges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lng.is_finite()
            && self.lat.is_finite()
            && (-180.0..=180.0).contains(&self.lng)
            && (-90.0..=90.0).contains(&self.lat)
    }
}

/// Hex orientation carried by stored grid settings.
///
/// Only pointy-top grids exist; the value is kept so stored documents round-trip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Orientation {
    #[default]
    PointyTop,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSettings {
    /// Center-to-corner distance of one hex cell, in meters.
    pub cell_size_meters: f64,
    pub radius_meters: f64,
    #[serde(default)]
    pub orientation: Orientation,
}

impl GridSettings {
    #[must_use]
    pub fn new(cell_size_meters: f64, radius_meters: f64) -> Self {
        Self {
            cell_size_meters,
            radius_meters,
            orientation: Orientation::PointyTop,
        }
    }
}
