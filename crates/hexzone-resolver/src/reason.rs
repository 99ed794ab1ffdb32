use serde::{Deserialize, Serialize};

/// Why a customer location cannot be served.
///
/// Every code is an expected business outcome. The HTTP layer maps each one
/// to a user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectReason {
    RestaurantNotFound,
    RestaurantInactive,
    DeliveryDisabled,
    RestaurantLocationMissing,
    InvalidCustomerLocation,
    InvalidGridSize,
    InvalidGridRadius,
    OutOfRadius,
    ZoneNotConfigured,
    ZoneInactive,
}

impl RejectReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            RejectReason::RestaurantNotFound => "RESTAURANT_NOT_FOUND",
            RejectReason::RestaurantInactive => "RESTAURANT_INACTIVE",
            RejectReason::DeliveryDisabled => "DELIVERY_DISABLED",
            RejectReason::RestaurantLocationMissing => "RESTAURANT_LOCATION_MISSING",
            RejectReason::InvalidCustomerLocation => "INVALID_CUSTOMER_LOCATION",
            RejectReason::InvalidGridSize => "INVALID_GRID_SIZE",
            RejectReason::InvalidGridRadius => "INVALID_GRID_RADIUS",
            RejectReason::OutOfRadius => "OUT_OF_RADIUS",
            RejectReason::ZoneNotConfigured => "ZONE_NOT_CONFIGURED",
            RejectReason::ZoneInactive => "ZONE_INACTIVE",
        }
    }
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_name_matches_as_str() {
        for reason in [
            RejectReason::RestaurantNotFound,
            RejectReason::RestaurantInactive,
            RejectReason::DeliveryDisabled,
            RejectReason::RestaurantLocationMissing,
            RejectReason::InvalidCustomerLocation,
            RejectReason::InvalidGridSize,
            RejectReason::InvalidGridRadius,
            RejectReason::OutOfRadius,
            RejectReason::ZoneNotConfigured,
            RejectReason::ZoneInactive,
        ] {
            let json = serde_json::to_string(&reason).unwrap();
            assert_eq!(json, format!("\"{}\"", reason.as_str()));
        }
    }
}
