use std::time::Duration;

use hexzone_core::{AppConfig, GridSettings};

#[derive(Debug, Clone, PartialEq)]
pub struct ResolverOptions {
    /// Used when a restaurant's delivery block carries no grid.
    pub default_grid: GridSettings,
    pub accept_legacy_axial_ids: bool,
    /// `None` leaves the read unbounded.
    pub source_timeout: Option<Duration>,
    pub max_concurrent: usize,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            default_grid: GridSettings::new(450.0, 3000.0),
            accept_legacy_axial_ids: true,
            source_timeout: Some(Duration::from_secs(2)),
            max_concurrent: 16,
        }
    }
}

impl ResolverOptions {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            default_grid: GridSettings::new(
                config.default_cell_size_meters,
                config.default_radius_meters,
            ),
            accept_legacy_axial_ids: config.accept_legacy_axial_ids,
            source_timeout: (config.source_timeout_ms > 0)
                .then(|| Duration::from_millis(config.source_timeout_ms)),
            max_concurrent: config.max_concurrent_resolves.max(1),
        }
    }
}
