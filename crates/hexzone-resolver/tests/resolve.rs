use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use hexzone_core::{GeoPoint, RestaurantSnapshot};
use hexzone_grid::EARTH_RADIUS_METERS;
use hexzone_resolver::{
    DeliveryConfigSource, InMemorySource, RejectReason, ResolveError, ResolveRequest,
    ResolverOptions, SourceError, SyncSource, ZoneResolution, ZoneResolver,
};

const ORIGIN: GeoPoint = GeoPoint::new(29.0, 41.0);

const RESTAURANTS: &str = r#"[
    {
        "id": "open",
        "isActive": true,
        "status": "active",
        "updatedAt": "2026-03-01T09:30:00Z",
        "delivery": {
            "enabled": true,
            "origin": { "lng": 29.0, "lat": 41.0 },
            "grid": { "cellSizeMeters": 450.0, "radiusMeters": 3000.0 },
            "defaults": { "minOrderAmount": 150.0, "feeAmount": 20.0 }
        }
    },
    {
        "id": "zoned",
        "isActive": true,
        "status": "active",
        "delivery": {
            "enabled": true,
            "origin": { "lng": 29.0, "lat": 41.0 },
            "grid": { "cellSizeMeters": 450.0, "radiusMeters": 3000.0 },
            "defaults": { "minOrderAmount": 150.0, "feeAmount": 20.0 },
            "zones": [
                { "zoneId": "zone-1", "name": "Center", "feeAmount": 0.0 },
                { "zoneId": "axial:1,0", "name": "Harbor", "minOrderAmount": 200.0 },
                { "zoneId": "zone-2", "name": "Hill", "isActive": false }
            ]
        }
    },
    {
        "id": "closed",
        "isActive": true,
        "status": "closed",
        "delivery": { "enabled": true, "origin": { "lng": 29.0, "lat": 41.0 } }
    }
]"#;

fn source() -> InMemorySource {
    InMemorySource::from_json(RESTAURANTS).unwrap()
}

fn resolver() -> ZoneResolver<InMemorySource> {
    ZoneResolver::new(source(), ResolverOptions::default())
}

/// A point `meters` east and `north` meters north of the shared origin.
fn offset(east: f64, north: f64) -> GeoPoint {
    let lng = (east / (EARTH_RADIUS_METERS * ORIGIN.lat.to_radians().cos())).to_degrees();
    let lat = (north / EARTH_RADIUS_METERS).to_degrees();
    GeoPoint::new(ORIGIN.lng + lng, ORIGIN.lat + lat)
}

#[tokio::test]
async fn origin_resolves_to_first_zone_with_defaults() {
    let resolution = resolver().resolve_zone("open", &ORIGIN, None).await.unwrap();
    let wire = serde_json::to_value(resolution.to_wire()).unwrap();
    assert_eq!(wire["ok"], true);
    assert_eq!(wire["zoneId"], "zone-1");
    assert_eq!(wire["hexId"], "axial:0,0");
    assert_eq!(wire["ring"], 0);
    assert_eq!(wire["ringMax"], 6);
    assert_eq!(wire["minOrderAmount"], 150.0);
    assert_eq!(wire["feeAmount"], 20.0);
}

#[tokio::test]
async fn ring_seven_is_rejected_with_ring_diagnostics() {
    let customer = offset(7.0 * 3f64.sqrt() * 450.0, 0.0);
    let resolution = resolver().resolve_zone("open", &customer, None).await.unwrap();
    assert_eq!(resolution.reason(), Some(RejectReason::OutOfRadius));
    let wire = serde_json::to_value(resolution.to_wire()).unwrap();
    assert_eq!(wire["ring"], 7);
    assert_eq!(wire["ringMax"], 6);
    assert_eq!(wire["isActive"], false);
}

#[tokio::test]
async fn unknown_and_closed_restaurants_are_rejected() {
    let resolver = resolver();
    let missing = resolver.resolve_zone("nope", &ORIGIN, None).await.unwrap();
    assert_eq!(missing.reason(), Some(RejectReason::RestaurantNotFound));
    let closed = resolver.resolve_zone("closed", &ORIGIN, None).await.unwrap();
    assert_eq!(closed.reason(), Some(RejectReason::RestaurantInactive));
}

#[tokio::test]
async fn overrides_merge_over_defaults() {
    let resolver = resolver();

    let center = resolver.resolve_zone("zoned", &ORIGIN, None).await.unwrap();
    let pricing = center.pricing().unwrap();
    assert!((pricing.fee_amount - 0.0).abs() < f64::EPSILON);
    assert!((pricing.min_order_amount - 150.0).abs() < f64::EPSILON);
    assert_eq!(pricing.zone_name.as_deref(), Some("Center"));

    // Stored under its legacy axial id.
    let harbor = resolver
        .resolve_zone("zoned", &offset(500.0, 0.0), None)
        .await
        .unwrap();
    assert_eq!(harbor.zone_id().map(|z| z.to_string()).as_deref(), Some("zone-4"));
    let pricing = harbor.pricing().unwrap();
    assert!((pricing.min_order_amount - 200.0).abs() < f64::EPSILON);
    assert!((pricing.fee_amount - 20.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn allow_list_rejects_unlisted_and_inactive_zones() {
    let resolver = resolver();

    // Cell (0, -1) is zone-2, centered 675 m south of the origin.
    let hill = resolver
        .resolve_zone("zoned", &offset(-3f64.sqrt() / 2.0 * 450.0, -675.0), None)
        .await
        .unwrap();
    assert_eq!(hill.reason(), Some(RejectReason::ZoneInactive));
    let wire = hill.to_wire();
    assert_eq!(wire.zone_id.as_deref(), Some("zone-2"));
    assert_eq!(wire.zone_name.as_deref(), Some("Hill"));

    let unlisted = resolver
        .resolve_zone("zoned", &offset(-3f64.sqrt() * 450.0, 0.0), None)
        .await
        .unwrap();
    assert_eq!(unlisted.reason(), Some(RejectReason::ZoneNotConfigured));
    assert_eq!(unlisted.ring(), Some(1));
}

#[tokio::test]
async fn legacy_ids_can_be_switched_off() {
    let options = ResolverOptions {
        accept_legacy_axial_ids: false,
        ..ResolverOptions::default()
    };
    let resolver = ZoneResolver::new(source(), options);
    let harbor = resolver
        .resolve_zone("zoned", &offset(500.0, 0.0), None)
        .await
        .unwrap();
    assert_eq!(harbor.reason(), Some(RejectReason::ZoneNotConfigured));
}

#[tokio::test]
async fn borrowed_source_is_accepted() {
    let source = source();
    let resolver = ZoneResolver::new(&source, ResolverOptions::default());
    let resolution = resolver.resolve_zone("open", &ORIGIN, None).await.unwrap();
    assert!(resolution.is_ok());
}

#[tokio::test]
async fn source_errors_propagate() {
    let failing = SyncSource(
        |_: &str| -> Result<Option<RestaurantSnapshot>, SourceError> {
            Err(SourceError::Unavailable("replica lag".to_string()))
        },
    );
    let resolver = ZoneResolver::new(failing, ResolverOptions::default());
    let err = resolver.resolve_zone("open", &ORIGIN, None).await.unwrap_err();
    assert!(matches!(err, ResolveError::Source(SourceError::Unavailable(_))));
}

struct SlowSource {
    delay: Duration,
}

impl DeliveryConfigSource for SlowSource {
    fn load(
        &self,
        _restaurant_id: &str,
    ) -> impl Future<Output = Result<Option<RestaurantSnapshot>, SourceError>> + Send {
        let delay = self.delay;
        async move {
            tokio::time::sleep(delay).await;
            Ok(None)
        }
    }
}

#[tokio::test]
async fn slow_reads_time_out() {
    let options = ResolverOptions {
        source_timeout: Some(Duration::from_millis(20)),
        ..ResolverOptions::default()
    };
    let resolver = ZoneResolver::new(
        SlowSource {
            delay: Duration::from_secs(5),
        },
        options,
    );
    let err = resolver.resolve_zone("open", &ORIGIN, None).await.unwrap_err();
    assert!(matches!(
        err,
        ResolveError::SourceTimeout { timeout_ms: 20, .. }
    ));
}

#[tokio::test]
async fn unbounded_reads_wait_for_the_source() {
    let options = ResolverOptions {
        source_timeout: None,
        ..ResolverOptions::default()
    };
    let resolver = ZoneResolver::new(
        SlowSource {
            delay: Duration::from_millis(30),
        },
        options,
    );
    let resolution = resolver.resolve_zone("any", &ORIGIN, None).await.unwrap();
    assert_eq!(resolution.reason(), Some(RejectReason::RestaurantNotFound));
}

struct CountingSource {
    inner: InMemorySource,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl DeliveryConfigSource for CountingSource {
    fn load(
        &self,
        restaurant_id: &str,
    ) -> impl Future<Output = Result<Option<RestaurantSnapshot>, SourceError>> + Send {
        async move {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(5)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            self.inner.load(restaurant_id).await
        }
    }
}

#[tokio::test]
async fn batch_keeps_request_order_and_bounds_concurrency() {
    let source = Arc::new(CountingSource {
        inner: source(),
        in_flight: AtomicUsize::new(0),
        peak: AtomicUsize::new(0),
    });
    let options = ResolverOptions {
        max_concurrent: 2,
        ..ResolverOptions::default()
    };
    let resolver = ZoneResolver::new(Arc::clone(&source), options);

    let ids = ["open", "closed", "nope", "zoned", "open", "closed"];
    let requests: Vec<ResolveRequest> = ids
        .iter()
        .map(|id| ResolveRequest {
            restaurant_id: (*id).to_string(),
            customer: ORIGIN,
            precomputed_zone_id: None,
        })
        .collect();

    let results = resolver.resolve_batch(&requests).await;
    let reasons: Vec<Option<RejectReason>> = results
        .into_iter()
        .map(|r| r.unwrap().reason())
        .collect();
    assert_eq!(
        reasons,
        vec![
            None,
            Some(RejectReason::RestaurantInactive),
            Some(RejectReason::RestaurantNotFound),
            None,
            None,
            Some(RejectReason::RestaurantInactive),
        ]
    );
    assert!(source.peak.load(Ordering::SeqCst) <= 2);
}

#[tokio::test]
async fn revalidate_flags_price_changes() {
    let shown = resolver().resolve_zone("open", &ORIGIN, None).await.unwrap();

    let check = resolver().revalidate("open", &ORIGIN, &shown).await.unwrap();
    assert!(!check.changed);
    assert_eq!(check.fresh, shown);
    assert!(check.config_updated_at.is_some());

    let repriced = RESTAURANTS.replacen("\"feeAmount\": 20.0", "\"feeAmount\": 35.0", 1);
    let updated = ZoneResolver::new(
        InMemorySource::from_json(&repriced).unwrap(),
        ResolverOptions::default(),
    );
    let check = updated.revalidate("open", &ORIGIN, &shown).await.unwrap();
    assert!(check.changed);
    let fee = check.fresh.pricing().unwrap().fee_amount;
    assert!((fee - 35.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn revalidate_flags_lost_availability() {
    let shown = resolver().resolve_zone("zoned", &ORIGIN, None).await.unwrap();
    assert!(shown.is_ok());

    let paused = RESTAURANTS.replacen(
        "\"id\": \"zoned\",\n        \"isActive\": true",
        "\"id\": \"zoned\",\n        \"isActive\": false",
        1,
    );
    let updated = ZoneResolver::new(
        InMemorySource::from_json(&paused).unwrap(),
        ResolverOptions::default(),
    );
    let check = updated.revalidate("zoned", &ORIGIN, &shown).await.unwrap();
    assert!(check.changed);
    assert!(matches!(check.fresh, ZoneResolution::Rejected(_)));
    assert_eq!(check.fresh.reason(), Some(RejectReason::RestaurantInactive));
}

#[tokio::test]
async fn service_area_lists_spiral_cells() {
    let area = resolver().service_area("zoned").await.unwrap().unwrap();
    assert_eq!(area.ring_max, 6);
    assert_eq!(area.cells.len(), 127);
    assert_eq!(area.served().count(), 2);

    let closed = resolver().service_area("closed").await.unwrap();
    assert_eq!(closed.unwrap_err(), RejectReason::RestaurantInactive);
}

#[tokio::test]
async fn document_without_status_is_rejected_as_inactive() {
    let source = InMemorySource::from_json(
        r#"[{
            "id": "statusless",
            "isActive": true,
            "delivery": { "enabled": true, "origin": { "lng": 29.0, "lat": 41.0 } }
        }]"#,
    )
    .unwrap();
    let resolver = ZoneResolver::new(source, ResolverOptions::default());
    let resolution = resolver
        .resolve_zone("statusless", &ORIGIN, None)
        .await
        .unwrap();
    assert_eq!(resolution.reason(), Some(RejectReason::RestaurantInactive));
}
