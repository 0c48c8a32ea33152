use std::sync::Arc;

use tracing::{info, warn};

use crate::repository::TripRepository;
use crate::sort::{sort_trips, SortBy};
use crate::trip::{NewSavedTrip, RouteFilter, SavedTrip, TripId};
use crate::{CoreError, CoreResult};

pub const DUPLICATE_API_ID: &str = "a trip with this apiId already exists";
pub const TRIP_NOT_FOUND: &str = "trip not found";

/// Validated listing request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListSavedTrips {
    pub filter: Option<RouteFilter>,
    pub sort_by: Option<SortBy>,
}

/// Saved-trip operations on top of a `TripRepository`.
#[derive(Clone)]
pub struct TripStore {
    repo: Arc<dyn TripRepository>,
}

impl TripStore {
    pub fn new(repo: Arc<dyn TripRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, request: &ListSavedTrips) -> CoreResult<Vec<SavedTrip>> {
        let trips = self.repo.find(request.filter.as_ref()).await?;
        Ok(sort_trips(trips, request.sort_by))
    }

    /// Persists a new trip unless its `api_id` is already taken.
    ///
    /// The lookup gives the common case a clean conflict; the repository's
    /// own uniqueness check covers two saves racing past it.
    pub async fn save(&self, candidate: NewSavedTrip) -> CoreResult<SavedTrip> {
        if self.repo.find_by_api_id(&candidate.api_id).await?.is_some() {
            warn!(api_id = %candidate.api_id, "Rejected duplicate saved trip");
            return Err(CoreError::ConflictError(DUPLICATE_API_ID.to_string()));
        }

        let saved = self.repo.create(&candidate).await?;
        info!(id = %saved.id, api_id = %saved.api_id, "Saved trip");
        Ok(saved)
    }

    pub async fn delete(&self, id: &TripId) -> CoreResult<SavedTrip> {
        match self.repo.delete_by_id(id).await? {
            Some(deleted) => {
                info!(id = %deleted.id, "Deleted saved trip");
                Ok(deleted)
            }
            None => Err(CoreError::NotFoundError(TRIP_NOT_FOUND.to_string())),
        }
    }
}
