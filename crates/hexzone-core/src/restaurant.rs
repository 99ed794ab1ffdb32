use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::{GeoPoint, GridSettings};
use crate::pricing::{PricingDefaults, ZoneOverride};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RestaurantStatus {
    Active,
    Paused,
    Closed,
    /// Missing or unrecognized in the stored document.
    #[default]
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for RestaurantStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RestaurantStatus::Active => write!(f, "active"),
            RestaurantStatus::Paused => write!(f, "paused"),
            RestaurantStatus::Closed => write!(f, "closed"),
            RestaurantStatus::Unknown => write!(f, "unknown"),
        }
    }
}

/// The `delivery` block of a restaurant document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliverySettings {
    #[serde(default)]
    pub enabled: bool,
    /// Service origin. Usually the storefront's own coordinate.
    #[serde(default)]
    pub origin: Option<GeoPoint>,
    /// Falls back to the process defaults when absent.
    #[serde(default)]
    pub grid: Option<GridSettings>,
    #[serde(default)]
    pub defaults: PricingDefaults,
    /// An empty list opens the whole radius; a non-empty one is an allow-list.
    #[serde(default)]
    pub zones: Vec<ZoneOverride>,
}

/// A read-only snapshot of one restaurant's delivery configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantSnapshot {
    pub id: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub status: RestaurantStatus,
    #[serde(default)]
    pub delivery: DeliverySettings,
    /// When the configuration store last changed this document, if it tracks that.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl RestaurantSnapshot {
    /// Returns `true` when the restaurant is flagged active and in `Active` status.
    #[must_use]
    pub fn is_operational(&self) -> bool {
        self.is_active && self.status == RestaurantStatus::Active
    }
}
