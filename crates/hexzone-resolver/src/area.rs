//! Enumeration of a restaurant's serviceable cells, for map rendering and
//! for operators filling in override tables.

use hexzone_core::{GeoPoint, RestaurantSnapshot, ZonePricing};
use hexzone_grid::{Axial, GridError, HexGrid, ZoneId};
use serde::Serialize;

use crate::error::ResolveError;
use crate::options::ResolverOptions;
use crate::overrides::OverrideIndex;
use crate::reason::RejectReason;

/// Largest ring count a listing will enumerate.
pub const MAX_LISTED_RINGS: u32 = 200;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CellStatus {
    Served(ZonePricing),
    NotConfigured,
    Inactive { zone_name: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaCell {
    pub zone_id: ZoneId,
    pub hex: Axial,
    pub ring: u32,
    pub center: GeoPoint,
    pub boundary: [GeoPoint; 6],
    pub status: CellStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceArea {
    pub restaurant_id: String,
    pub origin: GeoPoint,
    pub cell_size_meters: f64,
    pub ring_max: u32,
    pub cells: Vec<AreaCell>,
}

impl ServiceArea {
    pub fn served(&self) -> impl Iterator<Item = &AreaCell> {
        self.cells
            .iter()
            .filter(|cell| matches!(cell.status, CellStatus::Served(_)))
    }
}

/// List every cell within the restaurant's radius in spiral order.
///
/// Returns `Ok(Err(reason))` when the restaurant cannot deliver at all.
///
/// # Errors
///
/// Returns [`ResolveError::AreaTooLarge`] when the grid has more than
/// [`MAX_LISTED_RINGS`] rings.
pub fn list_service_area(
    restaurant_id: &str,
    snapshot: Option<&RestaurantSnapshot>,
    options: &ResolverOptions,
) -> Result<Result<ServiceArea, RejectReason>, ResolveError> {
    let unavailable =
        |reason: RejectReason| -> Result<Result<ServiceArea, RejectReason>, ResolveError> {
            Ok(Err(reason))
        };

    let Some(restaurant) = snapshot else {
        return unavailable(RejectReason::RestaurantNotFound);
    };
    if !restaurant.is_operational() {
        return unavailable(RejectReason::RestaurantInactive);
    }
    if !restaurant.delivery.enabled {
        return unavailable(RejectReason::DeliveryDisabled);
    }
    let origin = match restaurant.delivery.origin {
        Some(origin) if origin.is_valid() => origin,
        _ => return unavailable(RejectReason::RestaurantLocationMissing),
    };
    let settings = restaurant.delivery.grid.unwrap_or(options.default_grid);
    let grid = match HexGrid::new(&settings) {
        Ok(grid) => grid,
        Err(GridError::InvalidCellSize(_)) => return unavailable(RejectReason::InvalidGridSize),
        Err(GridError::InvalidRadius(_)) => return unavailable(RejectReason::InvalidGridRadius),
        Err(other) => return Err(ResolveError::Computation(other)),
    };
    if grid.ring_max() > MAX_LISTED_RINGS {
        return Err(ResolveError::AreaTooLarge {
            ring_max: grid.ring_max(),
            limit: MAX_LISTED_RINGS,
        });
    }

    let defaults = &restaurant.delivery.defaults;
    let overrides = OverrideIndex::build(
        restaurant_id,
        &restaurant.delivery.zones,
        options.accept_legacy_axial_ids,
    );
    let cells = grid
        .zones()
        .map(|(zone_id, hex)| {
            let status = if overrides.is_explicit() {
                match overrides.get(zone_id) {
                    None => CellStatus::NotConfigured,
                    Some(entry) if !entry.is_active => CellStatus::Inactive {
                        zone_name: entry.name.clone(),
                    },
                    Some(entry) => CellStatus::Served(entry.merge_over(defaults)),
                }
            } else {
                CellStatus::Served(defaults.as_pricing())
            };
            AreaCell {
                zone_id,
                hex,
                ring: hex.ring(),
                center: grid.cell_center(&origin, hex),
                boundary: grid.cell_boundary(&origin, hex),
                status,
            }
        })
        .collect();

    tracing::debug!(
        restaurant_id,
        ring_max = grid.ring_max(),
        "listed service area"
    );
    Ok(Ok(ServiceArea {
        restaurant_id: restaurant_id.to_string(),
        origin,
        cell_size_meters: grid.cell_size_meters(),
        ring_max: grid.ring_max(),
        cells,
    }))
}
