use hexzone_core::{GeoPoint, GridSettings};

use crate::axial::{axial_to_pixel, cell_corners, pixel_to_fractional, Axial};
use crate::error::GridError;
use crate::projector::{project, unproject, PlanarPoint};
use crate::ring::{evaluate, ring_ceiling, RingCheck};
use crate::spiral::spiral;
use crate::zone_id::ZoneId;

/// A validated pointy-top grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HexGrid {
    cell_size_meters: f64,
    ring_max: u32,
}

/// Where a point lands on the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellLocation {
    pub planar: PlanarPoint,
    pub cell: Axial,
    pub check: RingCheck,
}

impl HexGrid {
    /// Validate cell size, then radius.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidCellSize`] or [`GridError::InvalidRadius`].
    pub fn new(settings: &GridSettings) -> Result<Self, GridError> {
        let size = settings.cell_size_meters;
        if !size.is_finite() || size <= 0.0 {
            return Err(GridError::InvalidCellSize(size));
        }
        let ring_max = ring_ceiling(settings.radius_meters, size)?;
        Ok(Self {
            cell_size_meters: size,
            ring_max,
        })
    }

    #[must_use]
    pub fn cell_size_meters(&self) -> f64 {
        self.cell_size_meters
    }

    #[must_use]
    pub fn ring_max(&self) -> u32 {
        self.ring_max
    }

    /// Project, snap, and ring-check `point` relative to `origin`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::CoordinateOutOfRange`] for points too far away to address.
    pub fn locate(&self, origin: &GeoPoint, point: &GeoPoint) -> Result<CellLocation, GridError> {
        let planar = project(point, origin);
        let cell = pixel_to_fractional(&planar, self.cell_size_meters)?.round();
        Ok(CellLocation {
            planar,
            cell,
            check: evaluate(cell, self.ring_max),
        })
    }

    #[must_use]
    pub fn cell_center(&self, origin: &GeoPoint, cell: Axial) -> GeoPoint {
        unproject(&axial_to_pixel(cell, self.cell_size_meters), origin)
    }

    #[must_use]
    pub fn cell_boundary(&self, origin: &GeoPoint, cell: Axial) -> [GeoPoint; 6] {
        cell_corners(cell, self.cell_size_meters).map(|corner| unproject(&corner, origin))
    }

    /// Every in-radius zone, in spiral order.
    pub fn zones(&self) -> impl Iterator<Item = (ZoneId, Axial)> {
        spiral(self.ring_max)
            .zip(1u64..)
            .map(|(cell, index)| (ZoneId::from_spiral_position(index), cell))
    }
}
