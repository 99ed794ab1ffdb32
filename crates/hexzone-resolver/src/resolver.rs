//! Zone resolution.
//!
//! Checks run cheapest first: restaurant flags, origin, customer point, grid
//! settings, then projection, snapping, the ring check, spiral indexing, and
//! finally the override table. The first failing check ends the run with a
//! [`Rejection`]; only infrastructure faults surface as [`ResolveError`].

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use hexzone_core::{GeoPoint, GridSettings, RestaurantSnapshot};
use hexzone_grid::{GridError, HexGrid, ZoneId};

use crate::area::{list_service_area, ServiceArea};
use crate::error::ResolveError;
use crate::options::ResolverOptions;
use crate::overrides::OverrideIndex;
use crate::reason::RejectReason;
use crate::resolution::{Rejection, ResolvedZone, ZoneResolution};
use crate::source::DeliveryConfigSource;
use crate::stage::ResolveStage;

/// One entry of a batch resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolveRequest {
    pub restaurant_id: String,
    pub customer: GeoPoint,
    pub precomputed_zone_id: Option<String>,
}

/// Outcome of re-resolving a previously displayed quote.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteCheck {
    /// The authoritative result. Checkout must use this one.
    pub fresh: ZoneResolution,
    /// `true` when availability, zone, or pricing differ from the displayed result.
    pub changed: bool,
    pub config_updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct ZoneResolver<S> {
    source: S,
    options: ResolverOptions,
}

impl<S: DeliveryConfigSource> ZoneResolver<S> {
    pub fn new(source: S, options: ResolverOptions) -> Self {
        Self { source, options }
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Resolve a customer location for one restaurant.
    ///
    /// `precomputed_zone_id` is advisory: the zone is always recomputed and a
    /// disagreeing hint is only logged.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] if the configuration read fails or times out.
    pub async fn resolve_zone(
        &self,
        restaurant_id: &str,
        customer: &GeoPoint,
        precomputed_zone_id: Option<&str>,
    ) -> Result<ZoneResolution, ResolveError> {
        let snapshot = self.load(restaurant_id).await?;
        resolve_snapshot(
            restaurant_id,
            snapshot.as_ref(),
            customer,
            precomputed_zone_id,
            &self.options,
        )
    }

    /// Resolve many requests with at most `max_concurrent` configuration reads
    /// in flight. Results keep the order of `requests`.
    pub async fn resolve_batch(
        &self,
        requests: &[ResolveRequest],
    ) -> Vec<Result<ZoneResolution, ResolveError>> {
        stream::iter(requests.iter().map(|request| {
            self.resolve_zone(
                &request.restaurant_id,
                &request.customer,
                request.precomputed_zone_id.as_deref(),
            )
        }))
        .buffered(self.options.max_concurrent.max(1))
        .collect()
        .await
    }

    /// Re-resolve against a fresh configuration read before committing an order.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] if the configuration read fails or times out.
    pub async fn revalidate(
        &self,
        restaurant_id: &str,
        customer: &GeoPoint,
        displayed: &ZoneResolution,
    ) -> Result<QuoteCheck, ResolveError> {
        let snapshot = self.load(restaurant_id).await?;
        let hint = displayed.zone_id().map(|id| id.to_string());
        let fresh = resolve_snapshot(
            restaurant_id,
            snapshot.as_ref(),
            customer,
            hint.as_deref(),
            &self.options,
        )?;
        let changed = quote_changed(displayed, &fresh);
        if changed {
            tracing::info!(
                restaurant_id,
                displayed_ok = displayed.is_ok(),
                fresh_ok = fresh.is_ok(),
                fresh_reason = ?fresh.reason(),
                "delivery quote changed since it was displayed"
            );
        }
        Ok(QuoteCheck {
            fresh,
            changed,
            config_updated_at: snapshot.and_then(|s| s.updated_at),
        })
    }

    /// List the restaurant's cells with their effective status.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] if the configuration read fails or times out,
    /// or the area exceeds [`MAX_LISTED_RINGS`](crate::area::MAX_LISTED_RINGS).
    pub async fn service_area(
        &self,
        restaurant_id: &str,
    ) -> Result<Result<ServiceArea, RejectReason>, ResolveError> {
        let snapshot = self.load(restaurant_id).await?;
        list_service_area(restaurant_id, snapshot.as_ref(), &self.options)
    }

    async fn load(
        &self,
        restaurant_id: &str,
    ) -> Result<Option<RestaurantSnapshot>, ResolveError> {
        let read = self.source.load(restaurant_id);
        let loaded = match self.options.source_timeout {
            Some(limit) => tokio::time::timeout(limit, read).await.map_err(|_| {
                let timeout_ms = u64::try_from(limit.as_millis()).unwrap_or(u64::MAX);
                tracing::warn!(
                    restaurant_id,
                    timeout_ms,
                    "delivery configuration read timed out"
                );
                ResolveError::SourceTimeout {
                    restaurant_id: restaurant_id.to_string(),
                    timeout_ms,
                }
            })?,
            None => read.await,
        };
        loaded.map_err(|e| {
            tracing::warn!(restaurant_id, error = %e, "delivery configuration read failed");
            ResolveError::from(e)
        })
    }
}

/// Run the full resolution against an already-loaded snapshot.
///
/// `snapshot` is `None` when the restaurant does not exist.
///
/// # Errors
///
/// Returns [`ResolveError::Computation`] if an in-radius cell cannot be indexed.
pub fn resolve_snapshot(
    restaurant_id: &str,
    snapshot: Option<&RestaurantSnapshot>,
    customer: &GeoPoint,
    precomputed_zone_id: Option<&str>,
    options: &ResolverOptions,
) -> Result<ZoneResolution, ResolveError> {
    let mut run = Run::new(restaurant_id);

    run.enter(ResolveStage::ValidatingSource);
    let Some(restaurant) = snapshot else {
        return Ok(run.reject(RejectReason::RestaurantNotFound, |r| r));
    };
    if !restaurant.is_operational() {
        return Ok(run.reject(RejectReason::RestaurantInactive, |r| r));
    }
    if !restaurant.delivery.enabled {
        return Ok(run.reject(RejectReason::DeliveryDisabled, |r| r));
    }
    let origin = match restaurant.delivery.origin {
        Some(origin) if origin.is_valid() => origin,
        _ => return Ok(run.reject(RejectReason::RestaurantLocationMissing, |r| r)),
    };
    if !customer.is_valid() {
        return Ok(run.reject(RejectReason::InvalidCustomerLocation, |r| r));
    }
    let settings: GridSettings = restaurant.delivery.grid.unwrap_or(options.default_grid);

    // Settings are validated before any point is mapped.
    let grid = match HexGrid::new(&settings) {
        Ok(grid) => grid,
        Err(GridError::InvalidCellSize(_)) => {
            run.enter(ResolveStage::GridMapping);
            return Ok(run.reject(RejectReason::InvalidGridSize, |r| r));
        }
        Err(GridError::InvalidRadius(_)) => {
            run.enter(ResolveStage::RadiusCheck);
            return Ok(run.reject(RejectReason::InvalidGridRadius, |r| r));
        }
        Err(other) => return Err(ResolveError::Computation(other)),
    };

    // `locate` projects and snaps in one step.
    run.enter(ResolveStage::Projecting);
    run.enter(ResolveStage::GridMapping);
    let location = match grid.locate(&origin, customer) {
        Ok(location) => location,
        Err(GridError::CoordinateOutOfRange { .. }) => {
            return Ok(run.reject(RejectReason::OutOfRadius, |r| r));
        }
        Err(other) => return Err(ResolveError::Computation(other)),
    };
    let hex = location.cell;

    run.enter(ResolveStage::RadiusCheck);
    let check = location.check;
    let ring_max = check.ring_max;
    if !check.is_within() {
        return Ok(run.reject(RejectReason::OutOfRadius, |r| {
            r.with_ring(check).with_hex(hex)
        }));
    }

    run.enter(ResolveStage::Indexing);
    let zone_id = ZoneId::from_axial(hex).map_err(|e| {
        tracing::error!(restaurant_id, q = hex.q, r = hex.r, error = %e, "spiral indexing failed");
        ResolveError::Computation(e)
    })?;
    if let Some(hint) = precomputed_zone_id {
        compare_hint(restaurant_id, hint, zone_id);
    }

    run.enter(ResolveStage::OverrideLookup);
    let defaults = &restaurant.delivery.defaults;
    let overrides = OverrideIndex::build(
        restaurant_id,
        &restaurant.delivery.zones,
        options.accept_legacy_axial_ids,
    );
    let pricing = if overrides.is_explicit() {
        match overrides.get(zone_id) {
            None => {
                return Ok(run.reject(RejectReason::ZoneNotConfigured, |r| {
                    r.with_ring(check).with_hex(hex).with_zone(zone_id, None)
                }));
            }
            Some(entry) if !entry.is_active => {
                return Ok(run.reject(RejectReason::ZoneInactive, |r| {
                    r.with_ring(check)
                        .with_hex(hex)
                        .with_zone(zone_id, entry.name.clone())
                }));
            }
            Some(entry) => entry.merge_over(defaults),
        }
    } else {
        defaults.as_pricing()
    };

    run.enter(ResolveStage::Resolved);
    tracing::debug!(
        restaurant_id,
        zone_id = %zone_id,
        ring = check.ring,
        ring_max,
        fee_amount = pricing.fee_amount,
        min_order_amount = pricing.min_order_amount,
        "delivery zone resolved"
    );
    Ok(ZoneResolution::Resolved(ResolvedZone {
        zone_id,
        hex,
        ring: check.ring,
        ring_max,
        pricing,
    }))
}

fn compare_hint(restaurant_id: &str, hint: &str, computed: ZoneId) {
    match hint.parse::<ZoneId>() {
        Ok(hinted) if hinted == computed => {}
        Ok(hinted) => tracing::warn!(
            restaurant_id,
            hinted = %hinted,
            computed = %computed,
            "precomputed zone id disagrees with computed zone, using computed"
        ),
        Err(e) => tracing::debug!(
            restaurant_id,
            hint,
            error = %e,
            "ignoring unparseable precomputed zone id"
        ),
    }
}

fn quote_changed(displayed: &ZoneResolution, fresh: &ZoneResolution) -> bool {
    match (displayed, fresh) {
        (ZoneResolution::Resolved(a), ZoneResolution::Resolved(b)) => {
            a.zone_id != b.zone_id || a.pricing != b.pricing
        }
        (ZoneResolution::Rejected(a), ZoneResolution::Rejected(b)) => a.reason != b.reason,
        _ => true,
    }
}

/// Stage bookkeeping for one resolution.
struct Run<'a> {
    restaurant_id: &'a str,
    stage: ResolveStage,
}

impl<'a> Run<'a> {
    fn new(restaurant_id: &'a str) -> Self {
        Self {
            restaurant_id,
            stage: ResolveStage::NotStarted,
        }
    }

    fn enter(&mut self, next: ResolveStage) {
        debug_assert!(
            !self.stage.is_terminal() && next > self.stage,
            "{} -> {}",
            self.stage,
            next
        );
        tracing::trace!(
            restaurant_id = self.restaurant_id,
            from = %self.stage,
            to = %next,
            "resolve stage"
        );
        self.stage = next;
    }

    fn reject(
        &mut self,
        reason: RejectReason,
        diagnostics: impl FnOnce(Rejection) -> Rejection,
    ) -> ZoneResolution {
        let rejection = diagnostics(Rejection::new(reason, self.stage));
        tracing::debug!(
            restaurant_id = self.restaurant_id,
            reason = %reason,
            stage = %self.stage,
            ring = rejection.ring,
            ring_max = rejection.ring_max,
            "delivery zone rejected"
        );
        self.stage = ResolveStage::Rejected;
        ZoneResolution::Rejected(rejection)
    }
}
