use async_trait::async_trait;

use crate::trip::{NewSavedTrip, RouteFilter, SavedTrip, TripId};
use crate::CoreResult;

/// Repository trait for saved-trip data access
///
/// Implementations own the native identity type and must reject malformed
/// ids with `CoreError::MalformedId`. They must also refuse a second record
/// with an existing `api_id`, reporting it as `CoreError::ConflictError`.
#[async_trait]
pub trait TripRepository: Send + Sync {
    /// All saved trips in insertion order, restricted to `route` when given.
    async fn find(&self, route: Option<&RouteFilter>) -> CoreResult<Vec<SavedTrip>>;

    async fn find_by_api_id(&self, api_id: &str) -> CoreResult<Option<SavedTrip>>;

    async fn create(&self, trip: &NewSavedTrip) -> CoreResult<SavedTrip>;

    /// Removes the trip and returns its last state, or `None` if absent.
    async fn delete_by_id(&self, id: &TripId) -> CoreResult<Option<SavedTrip>>;
}
