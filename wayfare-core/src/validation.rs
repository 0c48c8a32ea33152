//! Explicit request validation.
//!
//! Each `validate_*` function turns a raw, loosely-typed request into the
//! domain value the services expect, or returns every field-level problem it
//! found. Nothing reaches `SearchGateway` or `TripStore` without passing
//! through here first.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::{Uuid, Variant, Version};

use crate::iata::AirportCode;
use crate::search::SearchCriteria;
use crate::sort::SortBy;
use crate::store::ListSavedTrips;
use crate::trip::{NewSavedTrip, RouteFilter};
use crate::CoreError;

const SAME_AIRPORT: &str = "origin and destination cannot be the same";
const BAD_SORT_KEY: &str = "sort_by must be either \"fastest\" or \"cheapest\"";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl From<Vec<FieldError>> for CoreError {
    fn from(errors: Vec<FieldError>) -> Self {
        CoreError::ValidationError(errors)
    }
}

pub(crate) fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

// ============================================================================
// Raw request shapes
// ============================================================================

/// Query string of a provider search.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub sort_by: Option<String>,
}

/// Query string of a saved-trip listing. Every field is optional.
#[derive(Debug, Default, Deserialize)]
pub struct SavedTripsQuery {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub sort_by: Option<String>,
}

/// Body of a save request, kept as raw JSON values so type mismatches are
/// reported per field.
#[derive(Debug, Default, Deserialize)]
pub struct SaveTripRequest {
    pub origin: Option<Value>,
    pub destination: Option<Value>,
    pub cost: Option<Value>,
    pub duration: Option<Value>,
    #[serde(rename = "type")]
    pub kind: Option<Value>,
    #[serde(rename = "apiId")]
    pub api_id: Option<Value>,
    pub display_name: Option<Value>,
}

// ============================================================================
// Validators
// ============================================================================

pub fn validate_search(query: &SearchQuery) -> Result<SearchCriteria, Vec<FieldError>> {
    let mut errors = Vec::new();

    let origin = required_airport("origin", query.origin.as_deref(), &mut errors);
    let destination = required_airport("destination", query.destination.as_deref(), &mut errors);
    check_distinct(origin, destination, &mut errors);

    let sort_by = match query.sort_by.as_deref().map(str::parse::<SortBy>) {
        Some(Ok(key)) => Some(key),
        _ => {
            errors.push(FieldError::new("sort_by", BAD_SORT_KEY));
            None
        }
    };

    match (origin, destination, sort_by) {
        (Some(origin), Some(destination), Some(sort_by)) if errors.is_empty() => Ok(SearchCriteria {
            origin,
            destination,
            sort_by,
        }),
        _ => Err(errors),
    }
}

pub fn validate_saved_trips_query(query: &SavedTripsQuery) -> Result<ListSavedTrips, Vec<FieldError>> {
    let mut errors = Vec::new();

    let origin = query
        .origin
        .as_deref()
        .and_then(|raw| parse_airport("origin", raw, &mut errors));
    let destination = query
        .destination
        .as_deref()
        .and_then(|raw| parse_airport("destination", raw, &mut errors));
    check_distinct(origin, destination, &mut errors);

    let sort_by = match query.sort_by.as_deref() {
        None => None,
        Some(raw) => match raw.parse::<SortBy>() {
            Ok(key) => Some(key),
            Err(_) => {
                errors.push(FieldError::new("sort_by", BAD_SORT_KEY));
                None
            }
        },
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    // The route filter only applies when both ends are given.
    let filter = match (origin, destination) {
        (Some(origin), Some(destination)) => Some(RouteFilter { origin, destination }),
        _ => None,
    };

    Ok(ListSavedTrips { filter, sort_by })
}

pub fn validate_save_trip(request: &SaveTripRequest) -> Result<NewSavedTrip, Vec<FieldError>> {
    let mut errors = Vec::new();

    let origin = required_airport("origin", json_str(&request.origin), &mut errors);
    let destination = required_airport("destination", json_str(&request.destination), &mut errors);
    check_distinct(origin, destination, &mut errors);

    let cost = number("cost", &request.cost, &mut errors);
    let duration = number("duration", &request.duration, &mut errors);
    let kind = string("type", &request.kind, &mut errors);
    let display_name = string("display_name", &request.display_name, &mut errors);

    let api_id = match json_str(&request.api_id) {
        Some(raw) if is_uuid_v4(raw) => Some(raw.to_string()),
        _ => {
            errors.push(FieldError::new("apiId", "apiId must be a UUID"));
            None
        }
    };

    match (origin, destination, cost, duration, kind, display_name, api_id) {
        (
            Some(origin),
            Some(destination),
            Some(cost),
            Some(duration),
            Some(kind),
            Some(display_name),
            Some(api_id),
        ) if errors.is_empty() => Ok(NewSavedTrip {
            api_id,
            origin,
            destination,
            cost,
            duration,
            kind,
            display_name,
        }),
        _ => Err(errors),
    }
}

/// Hyphenated RFC 4122 version-4 UUID, e.g. `a749c866-7928-4d08-9d5c-a6821a583d1a`.
pub fn is_uuid_v4(raw: &str) -> bool {
    raw.len() == 36
        && Uuid::try_parse(raw)
            .map(|id| id.get_version() == Some(Version::Random) && id.get_variant() == Variant::RFC4122)
            .unwrap_or(false)
}

// ============================================================================
// Field helpers
// ============================================================================

fn parse_airport(field: &'static str, raw: &str, errors: &mut Vec<FieldError>) -> Option<AirportCode> {
    match raw.parse::<AirportCode>() {
        Ok(code) => Some(code),
        Err(_) => {
            errors.push(FieldError::new(field, format!("{field} must be an available IATA code")));
            None
        }
    }
}

fn required_airport(
    field: &'static str,
    raw: Option<&str>,
    errors: &mut Vec<FieldError>,
) -> Option<AirportCode> {
    match raw {
        Some(raw) => parse_airport(field, raw, errors),
        None => {
            errors.push(FieldError::new(field, format!("{field} must be an available IATA code")));
            None
        }
    }
}

fn check_distinct(origin: Option<AirportCode>, destination: Option<AirportCode>, errors: &mut Vec<FieldError>) {
    if let (Some(origin), Some(destination)) = (origin, destination) {
        if origin == destination {
            errors.push(FieldError::new("destination", SAME_AIRPORT));
        }
    }
}

fn json_str(value: &Option<Value>) -> Option<&str> {
    value.as_ref().and_then(Value::as_str)
}

fn number(field: &'static str, value: &Option<Value>, errors: &mut Vec<FieldError>) -> Option<f64> {
    match value.as_ref().and_then(Value::as_f64) {
        Some(n) if n.is_finite() => Some(n),
        _ => {
            errors.push(FieldError::new(
                field,
                format!("{field} must be a number conforming to the specified constraints"),
            ));
            None
        }
    }
}

fn string(field: &'static str, value: &Option<Value>, errors: &mut Vec<FieldError>) -> Option<String> {
    match json_str(value) {
        Some(s) => Some(s.to_string()),
        None => {
            errors.push(FieldError::new(field, format!("{field} must be a string")));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(errors: &[FieldError]) -> Vec<&'static str> {
        errors.iter().map(|e| e.field).collect()
    }

    fn save_body(value: Value) -> SaveTripRequest {
        serde_json::from_value(value).expect("Failed to deserialize")
    }

    fn valid_save_body() -> Value {
        json!({
            "origin": "SYD",
            "destination": "GRU",
            "cost": 20,
            "duration": 5,
            "type": "flight",
            "apiId": "a749c866-7928-4d08-9d5c-a6821a583d1a",
            "display_name": "from SYD to GRU by flight"
        })
    }

    #[test]
    fn test_search_query_accepted() {
        let query = SearchQuery {
            origin: Some("CDG".into()),
            destination: Some("BCN".into()),
            sort_by: Some("fastest".into()),
        };
        let criteria = validate_search(&query).unwrap();
        assert_eq!(criteria.origin, AirportCode::CDG);
        assert_eq!(criteria.destination, AirportCode::BCN);
        assert_eq!(criteria.sort_by, SortBy::Fastest);
    }

    #[test]
    fn test_search_query_collects_every_error() {
        let query = SearchQuery {
            origin: Some("XXX".into()),
            destination: None,
            sort_by: Some("slowest".into()),
        };
        let errors = validate_search(&query).unwrap_err();
        assert_eq!(fields(&errors), vec!["origin", "destination", "sort_by"]);
        assert_eq!(errors[0].message, "origin must be an available IATA code");
    }

    #[test]
    fn test_search_query_same_airport() {
        let query = SearchQuery {
            origin: Some("MAD".into()),
            destination: Some("MAD".into()),
            sort_by: Some("cheapest".into()),
        };
        let errors = validate_search(&query).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "origin and destination cannot be the same");
    }

    #[test]
    fn test_saved_query_all_optional() {
        let list = validate_saved_trips_query(&SavedTripsQuery::default()).unwrap();
        assert!(list.filter.is_none());
        assert!(list.sort_by.is_none());
    }

    #[test]
    fn test_saved_query_filter_needs_both_ends() {
        let query = SavedTripsQuery {
            origin: Some("SYD".into()),
            destination: None,
            sort_by: Some("cheapest".into()),
        };
        let list = validate_saved_trips_query(&query).unwrap();
        assert!(list.filter.is_none());
        assert_eq!(list.sort_by, Some(SortBy::Cheapest));

        let query = SavedTripsQuery {
            origin: Some("SYD".into()),
            destination: Some("GRU".into()),
            sort_by: None,
        };
        let list = validate_saved_trips_query(&query).unwrap();
        assert_eq!(
            list.filter,
            Some(RouteFilter {
                origin: AirportCode::SYD,
                destination: AirportCode::GRU
            })
        );
    }

    #[test]
    fn test_saved_query_rejects_bad_values() {
        let query = SavedTripsQuery {
            origin: Some("SYD".into()),
            destination: Some("SYD".into()),
            sort_by: Some("random".into()),
        };
        let errors = validate_saved_trips_query(&query).unwrap_err();
        assert_eq!(fields(&errors), vec!["destination", "sort_by"]);
    }

    #[test]
    fn test_save_request_accepted() {
        let trip = validate_save_trip(&save_body(valid_save_body())).unwrap();
        assert_eq!(trip.origin, AirportCode::SYD);
        assert_eq!(trip.cost, 20.0);
        assert_eq!(trip.kind, "flight");
        assert_eq!(trip.api_id, "a749c866-7928-4d08-9d5c-a6821a583d1a");
    }

    #[test]
    fn test_save_request_type_mismatches() {
        let mut body = valid_save_body();
        body["cost"] = json!("20");
        body["type"] = json!(7);
        body["apiId"] = json!("not-a-uuid");
        let errors = validate_save_trip(&save_body(body)).unwrap_err();
        assert_eq!(fields(&errors), vec!["cost", "type", "apiId"]);
        assert_eq!(errors[2].message, "apiId must be a UUID");
    }

    #[test]
    fn test_save_request_same_airport() {
        let mut body = valid_save_body();
        body["destination"] = json!("SYD");
        let errors = validate_save_trip(&save_body(body)).unwrap_err();
        assert_eq!(fields(&errors), vec!["destination"]);
    }

    #[test]
    fn test_save_request_empty_body() {
        let errors = validate_save_trip(&SaveTripRequest::default()).unwrap_err();
        assert_eq!(errors.len(), 7);
    }

    #[test]
    fn test_uuid_v4_format() {
        assert!(is_uuid_v4("a749c866-7928-4d08-9d5c-a6821a583d1a"));
        assert!(is_uuid_v4(&Uuid::new_v4().to_string()));
        // version 1
        assert!(!is_uuid_v4("a749c866-7928-1d08-9d5c-a6821a583d1a"));
        // simple form
        assert!(!is_uuid_v4("a749c86679284d089d5ca6821a583d1a"));
        assert!(!is_uuid_v4(""));
    }
}
