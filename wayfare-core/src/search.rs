use std::sync::Arc;

use tracing::{debug, warn};

use crate::iata::AirportCode;
use crate::provider::{ProviderError, TripProvider};
use crate::sort::{sort_trips, SortBy};
use crate::trip::Trip;
use crate::{CoreError, CoreResult, INTERNAL_ERROR_MESSAGE};

/// Validated search criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchCriteria {
    pub origin: AirportCode,
    pub destination: AirportCode,
    pub sort_by: SortBy,
}

/// Proxies searches to the external provider and ranks the answer.
#[derive(Clone)]
pub struct SearchGateway {
    provider: Arc<dyn TripProvider>,
}

impl SearchGateway {
    pub fn new(provider: Arc<dyn TripProvider>) -> Self {
        Self { provider }
    }

    /// One provider call, no retries. Provider failures become a single
    /// `CoreError` carrying the provider's status and message.
    pub async fn search(&self, criteria: &SearchCriteria) -> CoreResult<Vec<Trip>> {
        let trips = self
            .provider
            .fetch_trips(criteria.origin, criteria.destination)
            .await
            .map_err(|err| {
                warn!(
                    origin = %criteria.origin,
                    destination = %criteria.destination,
                    "Trip search failed: {}",
                    err
                );
                upstream_error(err)
            })?;

        debug!(count = trips.len(), sort_by = %criteria.sort_by, "Provider returned trips");
        Ok(sort_trips(trips, Some(criteria.sort_by)))
    }
}

fn upstream_error(err: ProviderError) -> CoreError {
    match err {
        ProviderError::Status { status, message } => CoreError::UpstreamError {
            status,
            message: message.unwrap_or_else(|| INTERNAL_ERROR_MESSAGE.to_string()),
        },
        ProviderError::Transport(detail) => CoreError::InternalError(detail),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    fn trip(duration: f64, cost: f64) -> Trip {
        Trip {
            origin: AirportCode::BCN,
            destination: AirportCode::MAD,
            cost,
            duration,
            id: None,
            kind: Some("flight".to_string()),
            display_name: None,
        }
    }

    struct StaticProvider {
        trips: Vec<Trip>,
        calls: Mutex<Vec<(AirportCode, AirportCode)>>,
    }

    #[async_trait]
    impl TripProvider for StaticProvider {
        async fn fetch_trips(
            &self,
            origin: AirportCode,
            destination: AirportCode,
        ) -> Result<Vec<Trip>, ProviderError> {
            self.calls.lock().unwrap().push((origin, destination));
            Ok(self.trips.clone())
        }
    }

    struct FailingProvider(fn() -> ProviderError);

    #[async_trait]
    impl TripProvider for FailingProvider {
        async fn fetch_trips(&self, _: AirportCode, _: AirportCode) -> Result<Vec<Trip>, ProviderError> {
            Err((self.0)())
        }
    }

    fn criteria(sort_by: SortBy) -> SearchCriteria {
        SearchCriteria {
            origin: AirportCode::BCN,
            destination: AirportCode::MAD,
            sort_by,
        }
    }

    #[tokio::test]
    async fn test_search_sorts_provider_results() {
        let provider = Arc::new(StaticProvider {
            trips: vec![trip(3.0, 20.0), trip(1.0, 90.0), trip(2.0, 50.0)],
            calls: Mutex::new(Vec::new()),
        });
        let gateway = SearchGateway::new(provider.clone());

        let fastest = gateway.search(&criteria(SortBy::Fastest)).await.unwrap();
        let durations: Vec<f64> = fastest.iter().map(|t| t.duration).collect();
        assert_eq!(durations, vec![1.0, 2.0, 3.0]);

        let cheapest = gateway.search(&criteria(SortBy::Cheapest)).await.unwrap();
        let costs: Vec<f64> = cheapest.iter().map(|t| t.cost).collect();
        assert_eq!(costs, vec![20.0, 50.0, 90.0]);

        let calls = provider.calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], (AirportCode::BCN, AirportCode::MAD));
    }

    #[tokio::test]
    async fn test_structured_failure_passes_through() {
        let gateway = SearchGateway::new(Arc::new(FailingProvider(|| ProviderError::Status {
            status: 400,
            message: Some("Error: Missing origin or destination query params".to_string()),
        })));

        match gateway.search(&criteria(SortBy::Fastest)).await {
            Err(CoreError::UpstreamError { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "Error: Missing origin or destination query params");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_status_without_message_uses_generic_text() {
        let gateway = SearchGateway::new(Arc::new(FailingProvider(|| ProviderError::Status {
            status: 503,
            message: None,
        })));

        let err = gateway.search(&criteria(SortBy::Cheapest)).await.unwrap_err();
        assert_eq!(err.status(), 503);
        assert_eq!(err.to_string(), "Internal server error");
    }

    #[tokio::test]
    async fn test_unstructured_failure_is_internal() {
        let gateway = SearchGateway::new(Arc::new(FailingProvider(|| {
            ProviderError::Transport("connection refused".to_string())
        })));

        let err = gateway.search(&criteria(SortBy::Fastest)).await.unwrap_err();
        assert!(matches!(err, CoreError::InternalError(_)));
        assert_eq!(err.status(), 500);
    }
}
