use serde::{Deserialize, Serialize};

/// Restaurant-wide delivery pricing, used wherever a zone does not say otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingDefaults {
    #[serde(default)]
    pub min_order_amount: f64,
    #[serde(default)]
    pub fee_amount: f64,
}

impl PricingDefaults {
    /// Pricing for a cell served under the implicit whole-radius policy.
    #[must_use]
    pub fn as_pricing(&self) -> ZonePricing {
        ZonePricing {
            is_active: true,
            min_order_amount: finite_or_zero(self.min_order_amount),
            fee_amount: finite_or_zero(self.fee_amount),
            zone_name: None,
        }
    }
}

/// Operator-configured settings for one zone.
///
/// `zone_id` is kept as the raw stored string; the resolver canonicalizes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneOverride {
    pub zone_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub min_order_amount: Option<f64>,
    #[serde(default)]
    pub fee_amount: Option<f64>,
}

fn default_active() -> bool {
    true
}

impl ZoneOverride {
    /// Merge this override over the restaurant defaults.
    ///
    /// A field wins only when it holds a finite number.
    #[must_use]
    pub fn merge_over(&self, defaults: &PricingDefaults) -> ZonePricing {
        ZonePricing {
            is_active: self.is_active,
            min_order_amount: pick(self.min_order_amount, defaults.min_order_amount),
            fee_amount: pick(self.fee_amount, defaults.fee_amount),
            zone_name: self.name.clone(),
        }
    }
}

/// Effective pricing and availability for a resolved zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZonePricing {
    pub is_active: bool,
    pub min_order_amount: f64,
    pub fee_amount: f64,
    pub zone_name: Option<String>,
}

fn pick(value: Option<f64>, fallback: f64) -> f64 {
    match value {
        Some(v) if v.is_finite() => v,
        _ => finite_or_zero(fallback),
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
