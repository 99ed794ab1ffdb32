use hexzone_core::ZonePricing;
use hexzone_grid::{Axial, RingCheck, ZoneId};

use crate::reason::RejectReason;
use crate::stage::ResolveStage;
use crate::wire::ZoneResolutionWire;

/// A customer location assigned to a served zone.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedZone {
    pub zone_id: ZoneId,
    pub hex: Axial,
    pub ring: u32,
    pub ring_max: u32,
    pub pricing: ZonePricing,
}

/// A customer location that cannot be served, with whatever diagnostics were
/// known when resolution stopped.
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    pub reason: RejectReason,
    pub stage: ResolveStage,
    pub ring: Option<u32>,
    pub ring_max: Option<u32>,
    pub hex: Option<Axial>,
    pub zone_id: Option<ZoneId>,
    pub zone_name: Option<String>,
}

impl Rejection {
    #[must_use]
    pub fn new(reason: RejectReason, stage: ResolveStage) -> Self {
        Self {
            reason,
            stage,
            ring: None,
            ring_max: None,
            hex: None,
            zone_id: None,
            zone_name: None,
        }
    }

    #[must_use]
    pub fn with_ring(mut self, check: RingCheck) -> Self {
        self.ring = Some(check.ring);
        self.ring_max = Some(check.ring_max);
        self
    }

    #[must_use]
    pub fn with_hex(mut self, hex: Axial) -> Self {
        self.hex = Some(hex);
        self
    }

    #[must_use]
    pub fn with_zone(mut self, zone_id: ZoneId, zone_name: Option<String>) -> Self {
        self.zone_id = Some(zone_id);
        self.zone_name = zone_name;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ZoneResolution {
    Resolved(ResolvedZone),
    Rejected(Rejection),
}

impl ZoneResolution {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self, ZoneResolution::Resolved(_))
    }

    #[must_use]
    pub fn reason(&self) -> Option<RejectReason> {
        match self {
            ZoneResolution::Resolved(_) => None,
            ZoneResolution::Rejected(rejection) => Some(rejection.reason),
        }
    }

    #[must_use]
    pub fn zone_id(&self) -> Option<ZoneId> {
        match self {
            ZoneResolution::Resolved(zone) => Some(zone.zone_id),
            ZoneResolution::Rejected(rejection) => rejection.zone_id,
        }
    }

    #[must_use]
    pub fn ring(&self) -> Option<u32> {
        match self {
            ZoneResolution::Resolved(zone) => Some(zone.ring),
            ZoneResolution::Rejected(rejection) => rejection.ring,
        }
    }

    #[must_use]
    pub fn ring_max(&self) -> Option<u32> {
        match self {
            ZoneResolution::Resolved(zone) => Some(zone.ring_max),
            ZoneResolution::Rejected(rejection) => rejection.ring_max,
        }
    }

    /// Pricing is only ever present on a served zone.
    #[must_use]
    pub fn pricing(&self) -> Option<&ZonePricing> {
        match self {
            ZoneResolution::Resolved(zone) => Some(&zone.pricing),
            ZoneResolution::Rejected(_) => None,
        }
    }

    #[must_use]
    pub fn stage(&self) -> ResolveStage {
        match self {
            ZoneResolution::Resolved(_) => ResolveStage::Resolved,
            ZoneResolution::Rejected(rejection) => rejection.stage,
        }
    }

    #[must_use]
    pub fn to_wire(&self) -> ZoneResolutionWire {
        ZoneResolutionWire::from(self)
    }
}
