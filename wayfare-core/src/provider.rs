use async_trait::async_trait;

use crate::iata::AirportCode;
use crate::trip::Trip;

/// Failure reported by a trip provider.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The provider answered with a non-success status. `message` is the
    /// provider's own `msg` field when the body carried one.
    #[error("provider responded with status {status}")]
    Status { status: u16, message: Option<String> },
    /// Anything without a status: connect failures, timeouts, bad bodies.
    #[error("provider request failed: {0}")]
    Transport(String),
}

/// Client for the external flight-search API
#[async_trait]
pub trait TripProvider: Send + Sync {
    async fn fetch_trips(
        &self,
        origin: AirportCode,
        destination: AirportCode,
    ) -> Result<Vec<Trip>, ProviderError>;
}
