use serde::{Deserialize, Serialize};

/// Steps of one resolution, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResolveStage {
    NotStarted,
    ValidatingSource,
    Projecting,
    GridMapping,
    RadiusCheck,
    Indexing,
    OverrideLookup,
    Resolved,
    Rejected,
}

impl ResolveStage {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ResolveStage::NotStarted => "NOT_STARTED",
            ResolveStage::ValidatingSource => "VALIDATING_SOURCE",
            ResolveStage::Projecting => "PROJECTING",
            ResolveStage::GridMapping => "GRID_MAPPING",
            ResolveStage::RadiusCheck => "RADIUS_CHECK",
            ResolveStage::Indexing => "INDEXING",
            ResolveStage::OverrideLookup => "OVERRIDE_LOOKUP",
            ResolveStage::Resolved => "RESOLVED",
            ResolveStage::Rejected => "REJECTED",
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, ResolveStage::Resolved | ResolveStage::Rejected)
    }
}

impl std::fmt::Display for ResolveStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
