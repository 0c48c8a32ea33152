use serde::{Deserialize, Serialize};
use std::fmt;

use crate::iata::AirportCode;

/// Search result as returned by the flight-search provider. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub origin: AirportCode,
    pub destination: AirportCode,
    pub cost: f64,
    pub duration: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// Store-assigned identity of a saved trip. Opaque to the core; each
/// repository maps it to its own native key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TripId(String);

impl TripId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TripId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A validated save request: every SavedTrip field except the identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSavedTrip {
    #[serde(rename = "apiId")]
    pub api_id: String,
    pub origin: AirportCode,
    pub destination: AirportCode,
    pub cost: f64,
    pub duration: f64,
    #[serde(rename = "type")]
    pub kind: String,
    pub display_name: String,
}

impl NewSavedTrip {
    pub fn into_saved(self, id: TripId) -> SavedTrip {
        SavedTrip {
            id,
            api_id: self.api_id,
            origin: self.origin,
            destination: self.destination,
            cost: self.cost,
            duration: self.duration,
            kind: self.kind,
            display_name: self.display_name,
        }
    }
}

/// A trip a user chose to keep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedTrip {
    pub id: TripId,
    #[serde(rename = "apiId")]
    pub api_id: String,
    pub origin: AirportCode,
    pub destination: AirportCode,
    pub cost: f64,
    pub duration: f64,
    #[serde(rename = "type")]
    pub kind: String,
    pub display_name: String,
}

/// Exact origin/destination match used when listing saved trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteFilter {
    pub origin: AirportCode,
    pub destination: AirportCode,
}

impl RouteFilter {
    pub fn matches(&self, trip: &SavedTrip) -> bool {
        trip.origin == self.origin && trip.destination == self.destination
    }
}
