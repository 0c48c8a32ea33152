pub mod iata;
pub mod trip;
pub mod sort;
pub mod validation;
pub mod repository;
pub mod provider;
pub mod search;
pub mod store;

pub use iata::AirportCode;
pub use sort::{sort_trips, SortBy};
pub use trip::{NewSavedTrip, RouteFilter, SavedTrip, Trip, TripId};
pub use validation::FieldError;

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {}", validation::summarize(.0))]
    ValidationError(Vec<FieldError>),
    #[error("Malformed trip id: {0}")]
    MalformedId(String),
    #[error("{0}")]
    ConflictError(String),
    #[error("{0}")]
    NotFoundError(String),
    #[error("{message}")]
    UpstreamError { status: u16, message: String },
    #[error("Internal service error: {0}")]
    InternalError(String),
}

impl CoreError {
    /// HTTP-equivalent status for this error.
    pub fn status(&self) -> u16 {
        match self {
            CoreError::ValidationError(_) | CoreError::MalformedId(_) => 400,
            CoreError::ConflictError(_) => 409,
            CoreError::NotFoundError(_) => 404,
            CoreError::UpstreamError { status, .. } => *status,
            CoreError::InternalError(_) => 500,
        }
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
