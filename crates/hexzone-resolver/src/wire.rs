//! JSON shape consumed by the HTTP layer.

use hexzone_grid::hex_id;
use serde::{Deserialize, Serialize};

use crate::reason::RejectReason;
use crate::resolution::ZoneResolution;

/// Flat, camelCase view of a [`ZoneResolution`].
///
/// Rejections report `isActive: false` and zero amounts; callers branch on `ok`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneResolutionWire {
    pub ok: bool,
    pub reason: Option<RejectReason>,
    pub hex_id: Option<String>,
    pub zone_id: Option<String>,
    pub is_active: bool,
    pub min_order_amount: f64,
    pub fee_amount: f64,
    pub zone_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ring: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ring_max: Option<u32>,
}

impl From<&ZoneResolution> for ZoneResolutionWire {
    fn from(resolution: &ZoneResolution) -> Self {
        match resolution {
            ZoneResolution::Resolved(zone) => Self {
                ok: true,
                reason: None,
                hex_id: Some(hex_id(zone.hex)),
                zone_id: Some(zone.zone_id.to_string()),
                is_active: zone.pricing.is_active,
                min_order_amount: zone.pricing.min_order_amount,
                fee_amount: zone.pricing.fee_amount,
                zone_name: zone.pricing.zone_name.clone(),
                ring: Some(zone.ring),
                ring_max: Some(zone.ring_max),
            },
            ZoneResolution::Rejected(rejection) => Self {
                ok: false,
                reason: Some(rejection.reason),
                hex_id: rejection.hex.map(hex_id),
                zone_id: rejection.zone_id.map(|id| id.to_string()),
                is_active: false,
                min_order_amount: 0.0,
                fee_amount: 0.0,
                zone_name: rejection.zone_name.clone(),
                ring: rejection.ring,
                ring_max: rejection.ring_max,
            },
        }
    }
}
