use crate::axial::Axial;
use crate::error::GridError;

/// Highest ring ceiling a grid may be configured with.
///
/// Keeps every spiral index well inside `u64`.
pub const MAX_RING: u32 = 1_000_000;

/// Ring ceiling for a service radius: `floor(radius / size)`.
///
/// The size is assumed to be validated already.
///
/// # Errors
///
/// Returns [`GridError::InvalidRadius`] when the radius is negative or not
/// finite, or when the ceiling would exceed [`MAX_RING`].
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn ring_ceiling(radius_meters: f64, cell_size_meters: f64) -> Result<u32, GridError> {
    if !radius_meters.is_finite() || radius_meters < 0.0 {
        return Err(GridError::InvalidRadius(radius_meters));
    }
    let ceiling = (radius_meters / cell_size_meters).floor();
    if !ceiling.is_finite() || ceiling < 0.0 || ceiling > f64::from(MAX_RING) {
        return Err(GridError::InvalidRadius(radius_meters));
    }
    Ok(ceiling as u32)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingCheck {
    pub ring: u32,
    pub ring_max: u32,
}

impl RingCheck {
    #[must_use]
    pub fn is_within(&self) -> bool {
        self.ring <= self.ring_max
    }
}

/// Compare a cell's ring against the ceiling.
#[must_use]
pub fn evaluate(cell: Axial, ring_max: u32) -> RingCheck {
    RingCheck {
        ring: cell.ring(),
        ring_max,
    }
}
