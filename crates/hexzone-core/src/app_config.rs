#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Process-level settings for hosts embedding the resolver.
///
/// Per-restaurant grid settings always take precedence over the defaults here;
/// the defaults only apply to restaurants whose delivery block has no grid.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub default_cell_size_meters: f64,
    pub default_radius_meters: f64,
    /// Match override entries still keyed by the raw `axial:<q>,<r>` id.
    pub accept_legacy_axial_ids: bool,
    /// Upper bound on a single configuration read. `0` disables the bound.
    pub source_timeout_ms: u64,
    pub max_concurrent_resolves: usize,
}
