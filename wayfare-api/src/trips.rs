use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    middleware,
    routing::{delete, get},
    Json, Router,
};
use tracing::info;
use wayfare_core::validation::{
    validate_save_trip, validate_saved_trips_query, validate_search, SaveTripRequest,
    SavedTripsQuery, SearchQuery,
};
use wayfare_core::{SavedTrip, Trip, TripId};

use crate::error::AppError;
use crate::middleware::require_api_key;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/trips",
            // The key gate covers only the provider search.
            get(search_trips)
                .route_layer(middleware::from_fn_with_state(state, require_api_key))
                .post(save_trip),
        )
        .route("/trips/saved", get(list_saved_trips))
        .route("/trips/saved/{id}", delete(delete_saved_trip))
}

/// GET /trips?origin=&destination=&sort_by=
async fn search_trips(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<Vec<Trip>>, AppError> {
    let Query(query) = query.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let criteria = validate_search(&query)?;
    info!(origin = %criteria.origin, destination = %criteria.destination, "Searching trips");

    let trips = state.search.search(&criteria).await?;
    Ok(Json(trips))
}

/// GET /trips/saved?origin=&destination=&sort_by=
async fn list_saved_trips(
    State(state): State<AppState>,
    query: Result<Query<SavedTripsQuery>, QueryRejection>,
) -> Result<Json<Vec<SavedTrip>>, AppError> {
    let Query(query) = query.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let request = validate_saved_trips_query(&query)?;
    let trips = state.trips.list(&request).await?;
    Ok(Json(trips))
}

/// POST /trips
async fn save_trip(
    State(state): State<AppState>,
    payload: Result<Json<SaveTripRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SavedTrip>), AppError> {
    let Json(body) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let candidate = validate_save_trip(&body)?;

    let saved = state.trips.save(candidate).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

/// DELETE /trips/saved/{id}
async fn delete_saved_trip(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<SavedTrip>, AppError> {
    let Path(id) = id.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let deleted = state.trips.delete(&TripId::from(id)).await?;
    Ok(Json(deleted))
}
