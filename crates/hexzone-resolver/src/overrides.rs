use std::collections::HashMap;

use hexzone_core::ZoneOverride;
use hexzone_grid::{ZoneId, ZoneIdScheme};

/// A restaurant's override entries keyed by canonical zone id.
///
/// `entries` counts every stored entry, including ones whose id did not
/// parse; a table of only broken ids is still an opt-in table that serves nothing.
#[derive(Debug)]
pub(crate) struct OverrideIndex<'a> {
    entries: usize,
    by_zone: HashMap<ZoneId, &'a ZoneOverride>,
}

impl<'a> OverrideIndex<'a> {
    pub(crate) fn build(
        restaurant_id: &str,
        zones: &'a [ZoneOverride],
        accept_legacy_axial_ids: bool,
    ) -> Self {
        let mut by_zone = HashMap::with_capacity(zones.len());
        for entry in zones {
            match ZoneId::parse_with_scheme(&entry.zone_id) {
                Ok((_, ZoneIdScheme::LegacyAxial)) if !accept_legacy_axial_ids => {
                    tracing::warn!(
                        restaurant_id,
                        zone_id = %entry.zone_id,
                        "ignoring legacy axial zone override"
                    );
                }
                Ok((zone_id, _)) => {
                    if by_zone.contains_key(&zone_id) {
                        tracing::warn!(
                            restaurant_id,
                            zone_id = %entry.zone_id,
                            canonical = %zone_id,
                            "duplicate zone override, keeping the first"
                        );
                    } else {
                        by_zone.insert(zone_id, entry);
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        restaurant_id,
                        zone_id = %entry.zone_id,
                        error = %e,
                        "unparseable zone override id"
                    );
                }
            }
        }
        Self {
            entries: zones.len(),
            by_zone,
        }
    }

    /// `true` when the restaurant opted into explicit zones.
    pub(crate) fn is_explicit(&self) -> bool {
        self.entries > 0
    }

    pub(crate) fn get(&self, zone_id: ZoneId) -> Option<&'a ZoneOverride> {
        self.by_zone.get(&zone_id).copied()
    }
}
