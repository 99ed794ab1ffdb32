//! Domain records for delivery-zone resolution.
//!
//! Everything here is read from the restaurant configuration store and handed
//! to the grid and resolver crates as plain values. Nothing in this crate
//! performs I/O other than reading the process environment for [`AppConfig`].

pub mod app_config;
pub mod config;
pub mod geo;
pub mod pricing;
pub mod restaurant;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use geo::{GeoPoint, GridSettings, Orientation};
pub use pricing::{PricingDefaults, ZoneOverride, ZonePricing};
pub use restaurant::{DeliverySettings, RestaurantSnapshot, RestaurantStatus};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
