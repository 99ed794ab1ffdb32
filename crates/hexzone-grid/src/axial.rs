//! Pointy-top axial coordinates.
//!
//! Axial `(q, r)` maps to cube `(x = q, y = -q - r, z = r)`. Rounding always
//! happens in cube space so the snapped cell is the true nearest center.

use serde::{Deserialize, Serialize};

use crate::error::GridError;
use crate::projector::PlanarPoint;

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Largest fractional `|q|` or `|r|` the mapper will round.
///
/// Keeps `-q - r` inside `i32` for every cell it can return.
pub const AXIAL_LIMIT: f64 = 1.0e9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Axial {
    pub q: i32,
    pub r: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cube {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FractionalAxial {
    pub q: f64,
    pub r: f64,
}

impl Axial {
    pub const ORIGIN: Axial = Axial { q: 0, r: 0 };

    #[must_use]
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    #[must_use]
    pub const fn to_cube(self) -> Cube {
        Cube {
            x: self.q,
            y: -self.q - self.r,
            z: self.r,
        }
    }

    /// Cube distance from the origin cell.
    #[must_use]
    pub fn ring(self) -> u32 {
        self.to_cube().max_abs()
    }

    #[must_use]
    pub fn distance(self, other: Axial) -> u32 {
        Axial::new(self.q - other.q, self.r - other.r).ring()
    }

    #[must_use]
    pub const fn offset(self, dq: i32, dr: i32) -> Self {
        Axial {
            q: self.q + dq,
            r: self.r + dr,
        }
    }

    /// Returns `true` when the six cells sharing an edge with `self` include `other`.
    #[must_use]
    pub fn is_neighbor(self, other: Axial) -> bool {
        self.distance(other) == 1
    }
}

impl std::fmt::Display for Axial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

impl Cube {
    #[must_use]
    pub const fn to_axial(self) -> Axial {
        Axial {
            q: self.x,
            r: self.z,
        }
    }

    #[must_use]
    pub fn max_abs(self) -> u32 {
        self.x
            .unsigned_abs()
            .max(self.y.unsigned_abs())
            .max(self.z.unsigned_abs())
    }

    #[must_use]
    pub const fn sum(self) -> i64 {
        self.x as i64 + self.y as i64 + self.z as i64
    }
}

impl FractionalAxial {
    /// Snap to the nearest cell.
    ///
    /// Each cube component is rounded independently, then the one with the
    /// largest rounding error is rebuilt from the other two so `x + y + z == 0`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::many_single_char_names)]
    pub fn round(self) -> Axial {
        let x = self.q;
        let z = self.r;
        let y = -x - z;

        let mut rx = x.round();
        let mut ry = y.round();
        let mut rz = z.round();

        let dx = (rx - x).abs();
        let dy = (ry - y).abs();
        let dz = (rz - z).abs();

        if dx > dy && dx > dz {
            rx = -ry - rz;
        } else if dy > dz {
            ry = -rx - rz;
        } else {
            rz = -rx - ry;
        }

        let cube = Cube {
            x: rx as i32,
            y: ry as i32,
            z: rz as i32,
        };
        debug_assert_eq!(cube.sum(), 0);
        cube.to_axial()
    }
}

/// Convert a planar offset into fractional pointy-top axial coordinates.
///
/// # Errors
///
/// Returns [`GridError::InvalidCellSize`] when `size` is not a finite number
/// above zero, and [`GridError::CoordinateOutOfRange`] when the point falls
/// outside [`AXIAL_LIMIT`].
pub fn pixel_to_fractional(planar: &PlanarPoint, size: f64) -> Result<FractionalAxial, GridError> {
    if !size.is_finite() || size <= 0.0 {
        return Err(GridError::InvalidCellSize(size));
    }

    let q = (SQRT_3 / 3.0 * planar.x - planar.y / 3.0) / size;
    let r = (2.0 / 3.0 * planar.y) / size;

    if !q.is_finite() || !r.is_finite() || q.abs() > AXIAL_LIMIT || r.abs() > AXIAL_LIMIT {
        return Err(GridError::CoordinateOutOfRange {
            x: planar.x,
            y: planar.y,
        });
    }
    Ok(FractionalAxial { q, r })
}

/// Planar center of a cell.
#[must_use]
pub fn axial_to_pixel(axial: Axial, size: f64) -> PlanarPoint {
    let q = f64::from(axial.q);
    let r = f64::from(axial.r);
    PlanarPoint {
        x: size * (SQRT_3 * q + SQRT_3 / 2.0 * r),
        y: size * (1.5 * r),
    }
}

/// The six corners of a pointy-top cell, counter-clockwise from the lower-right.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn cell_corners(axial: Axial, size: f64) -> [PlanarPoint; 6] {
    let center = axial_to_pixel(axial, size);
    std::array::from_fn(|i| {
        let angle = (60.0 * i as f64 - 30.0).to_radians();
        PlanarPoint {
            x: center.x + size * angle.cos(),
            y: center.y + size * angle.sin(),
        }
    })
}
