//! Read access to restaurant delivery configuration.
//!
//! The resolver never owns a connection. Hosts hand it anything implementing
//! [`DeliveryConfigSource`] and keep control of pooling, retries and caching.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use hexzone_core::RestaurantSnapshot;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("configuration store unavailable: {0}")]
    Unavailable(String),

    #[error("configuration store error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("invalid restaurant snapshot: {0}")]
    Decode(#[from] serde_json::Error),
}

/// One read of one restaurant's configuration.
///
/// `Ok(None)` means the restaurant does not exist.
pub trait DeliveryConfigSource: Send + Sync {
    fn load(
        &self,
        restaurant_id: &str,
    ) -> impl Future<Output = Result<Option<RestaurantSnapshot>, SourceError>> + Send;
}

impl<T: DeliveryConfigSource> DeliveryConfigSource for &T {
    fn load(
        &self,
        restaurant_id: &str,
    ) -> impl Future<Output = Result<Option<RestaurantSnapshot>, SourceError>> + Send {
        (**self).load(restaurant_id)
    }
}

impl<T: DeliveryConfigSource> DeliveryConfigSource for Arc<T> {
    fn load(
        &self,
        restaurant_id: &str,
    ) -> impl Future<Output = Result<Option<RestaurantSnapshot>, SourceError>> + Send {
        (**self).load(restaurant_id)
    }
}

/// A fixed set of snapshots keyed by restaurant id.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    restaurants: HashMap<String, RestaurantSnapshot>,
}

impl InMemorySource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a snapshot.
    #[must_use]
    pub fn with_restaurant(mut self, snapshot: RestaurantSnapshot) -> Self {
        self.restaurants.insert(snapshot.id.clone(), snapshot);
        self
    }

    /// Build from a JSON array of restaurant documents.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Decode`] if the JSON is not an array of snapshots.
    pub fn from_json(json: &str) -> Result<Self, SourceError> {
        let snapshots: Vec<RestaurantSnapshot> = serde_json::from_str(json)?;
        Ok(snapshots
            .into_iter()
            .fold(Self::new(), Self::with_restaurant))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.restaurants.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.restaurants.is_empty()
    }
}

impl DeliveryConfigSource for InMemorySource {
    fn load(
        &self,
        restaurant_id: &str,
    ) -> impl Future<Output = Result<Option<RestaurantSnapshot>, SourceError>> + Send {
        std::future::ready(Ok(self.restaurants.get(restaurant_id).cloned()))
    }
}

/// Adapts a blocking lookup, e.g. a process-local cache.
///
/// The closure runs inline on the calling task, so it must return quickly.
#[derive(Debug, Clone)]
pub struct SyncSource<F>(pub F);

impl<F> DeliveryConfigSource for SyncSource<F>
where
    F: Fn(&str) -> Result<Option<RestaurantSnapshot>, SourceError> + Send + Sync,
{
    fn load(
        &self,
        restaurant_id: &str,
    ) -> impl Future<Output = Result<Option<RestaurantSnapshot>, SourceError>> + Send {
        std::future::ready((self.0)(restaurant_id))
    }
}
