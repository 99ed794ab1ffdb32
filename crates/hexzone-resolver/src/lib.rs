//! Delivery-zone resolution for restaurant orders.
//!
//! A [`ZoneResolver`] reads one restaurant's delivery configuration through a
//! [`DeliveryConfigSource`], snaps the customer onto the restaurant's hex grid
//! and returns either a served zone with effective pricing or a typed
//! rejection.

pub mod area;
pub mod error;
pub mod options;
mod overrides;
pub mod reason;
pub mod resolution;
pub mod resolver;
pub mod source;
pub mod stage;
pub mod telemetry;
pub mod wire;

pub use area::{list_service_area, AreaCell, CellStatus, ServiceArea, MAX_LISTED_RINGS};
pub use error::ResolveError;
pub use options::ResolverOptions;
pub use reason::RejectReason;
pub use resolution::{Rejection, ResolvedZone, ZoneResolution};
pub use resolver::{resolve_snapshot, QuoteCheck, ResolveRequest, ZoneResolver};
pub use source::{DeliveryConfigSource, InMemorySource, SourceError, SyncSource};
pub use stage::ResolveStage;
pub use telemetry::{init_tracing, TelemetryError};
pub use wire::ZoneResolutionWire;
