//! Thin asynchronous client for the external flight-search API.
//!
//! - One GET per search, `origin`/`destination` as query parameters.
//! - The shared key travels in the `x-api-key` header.
//! - Error bodies of the form `{"msg": "..."}` are surfaced verbatim.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use wayfare_core::provider::{ProviderError, TripProvider};
use wayfare_core::{AirportCode, Trip};

use crate::app_config::ProviderConfig;

const API_KEY_HEADER: &str = "x-api-key";
const USER_AGENT: &str = "wayfare/0.1.0";

#[derive(Debug, Error)]
pub enum ProviderClientError {
    #[error("invalid provider URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    msg: Option<String>,
}

#[derive(Clone)]
pub struct HttpTripProvider {
    http: Client,
    api_url: Url,
    api_key: String,
}

impl HttpTripProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderClientError> {
        let api_url = Url::parse(&config.api_url)?;
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            http,
            api_url,
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl TripProvider for HttpTripProvider {
    async fn fetch_trips(
        &self,
        origin: AirportCode,
        destination: AirportCode,
    ) -> Result<Vec<Trip>, ProviderError> {
        let response = self
            .http
            .get(self.api_url.clone())
            .header(API_KEY_HEADER, &self.api_key)
            .query(&[("origin", origin.as_str()), ("destination", destination.as_str())])
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // A body that is not `{"msg": ...}` still leaves us the status.
            let message = response.json::<ErrorBody>().await.ok().and_then(|body| body.msg);
            return Err(ProviderError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let trips = response
            .json::<Vec<Trip>>()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;
        debug!(%origin, %destination, count = trips.len(), "Provider search completed");
        Ok(trips)
    }
}
