use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;
use wayfare_core::repository::TripRepository;
use wayfare_core::store::DUPLICATE_API_ID;
use wayfare_core::{CoreError, CoreResult, NewSavedTrip, RouteFilter, SavedTrip, TripId};

/// Process-local saved-trip store. Records keep insertion order and get
/// UUID identities, matching the Postgres repository.
#[derive(Default)]
pub struct InMemoryTripRepository {
    trips: RwLock<Vec<SavedTrip>>,
}

impl InMemoryTripRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TripRepository for InMemoryTripRepository {
    async fn find(&self, route: Option<&RouteFilter>) -> CoreResult<Vec<SavedTrip>> {
        let trips = self.trips.read().await;
        Ok(trips
            .iter()
            .filter(|trip| route.map_or(true, |r| r.matches(trip)))
            .cloned()
            .collect())
    }

    async fn find_by_api_id(&self, api_id: &str) -> CoreResult<Option<SavedTrip>> {
        let trips = self.trips.read().await;
        Ok(trips.iter().find(|trip| trip.api_id == api_id).cloned())
    }

    async fn create(&self, trip: &NewSavedTrip) -> CoreResult<SavedTrip> {
        // Check and insert under one write lock.
        let mut trips = self.trips.write().await;
        if trips.iter().any(|existing| existing.api_id == trip.api_id) {
            return Err(CoreError::ConflictError(DUPLICATE_API_ID.to_string()));
        }

        let saved = trip.clone().into_saved(TripId::new(Uuid::new_v4().to_string()));
        trips.push(saved.clone());
        Ok(saved)
    }

    async fn delete_by_id(&self, id: &TripId) -> CoreResult<Option<SavedTrip>> {
        let key = Uuid::parse_str(id.as_str()).map_err(|_| CoreError::MalformedId(id.to_string()))?;

        // Same identity as the uuid column: case and braces don't matter.
        let mut trips = self.trips.write().await;
        let position = trips
            .iter()
            .position(|trip| Uuid::parse_str(trip.id.as_str()).ok() == Some(key));
        Ok(position.map(|index| trips.remove(index)))
    }
}
