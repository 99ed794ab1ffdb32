use hexzone_grid::GridError;
use thiserror::Error;

use crate::source::SourceError;

/// Infrastructure failures. Business rejections are never reported here.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("failed to read delivery configuration: {0}")]
    Source(#[from] SourceError),

    #[error("delivery configuration read for {restaurant_id} timed out after {timeout_ms}ms")]
    SourceTimeout {
        restaurant_id: String,
        timeout_ms: u64,
    },

    #[error("zone computation failed: {0}")]
    Computation(#[source] GridError),

    #[error("service area of {ring_max} rings exceeds the listing limit of {limit}")]
    AreaTooLarge { ring_max: u32, limit: u32 },
}
