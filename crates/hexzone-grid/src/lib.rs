//! Pointy-top hex grid math for delivery zones.
//!
//! Projects geographic points onto a plane around a service origin, snaps them
//! to hex cells, measures rings, and numbers cells along a fixed spiral so the
//! same location always yields the same zone id.

pub mod axial;
pub mod error;
pub mod grid;
pub mod projector;
pub mod ring;
pub mod spiral;
pub mod zone_id;

pub use axial::{Axial, Cube, FractionalAxial};
pub use error::GridError;
pub use grid::{CellLocation, HexGrid};
pub use projector::{project, unproject, PlanarPoint, EARTH_RADIUS_METERS};
pub use ring::{ring_ceiling, RingCheck, MAX_RING};
pub use spiral::{axial_at, cells_within, spiral, spiral_index};
pub use zone_id::{hex_id, ZoneId, ZoneIdError, ZoneIdScheme};
