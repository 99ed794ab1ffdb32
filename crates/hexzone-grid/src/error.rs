use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    #[error("invalid grid cell size: {0} (must be a finite number > 0)")]
    InvalidCellSize(f64),

    #[error("invalid grid radius: {0} (must be finite, >= 0, and within the ring limit)")]
    InvalidRadius(f64),

    /// The point lies so far from the origin that its cell cannot be addressed.
    #[error("planar offset ({x:.1}, {y:.1}) m is outside the addressable grid")]
    CoordinateOutOfRange { x: f64, y: f64 },

    /// The cell lies past the last indexed ring.
    #[error("cell ({q}, {r}) has no spiral index")]
    IndexNotFound { q: i32, r: i32 },
}
