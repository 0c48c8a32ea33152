use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::{error, warn};
use uuid::Uuid;
use wayfare_core::repository::TripRepository;
use wayfare_core::store::DUPLICATE_API_ID;
use wayfare_core::{AirportCode, CoreError, CoreResult, NewSavedTrip, RouteFilter, SavedTrip, TripId};

const RETURNING: &str = "id, api_id, origin, destination, cost, duration, trip_type, display_name";

pub struct PostgresTripRepository {
    pub pool: PgPool,
}

impl PostgresTripRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SavedTripRow {
    id: Uuid,
    api_id: String,
    origin: String,
    destination: String,
    cost: f64,
    duration: f64,
    trip_type: String,
    display_name: String,
}

impl TryFrom<SavedTripRow> for SavedTrip {
    type Error = CoreError;

    fn try_from(row: SavedTripRow) -> Result<Self, Self::Error> {
        let origin: AirportCode = row
            .origin
            .parse()
            .map_err(|e| CoreError::InternalError(format!("saved trip {}: {}", row.id, e)))?;
        let destination: AirportCode = row
            .destination
            .parse()
            .map_err(|e| CoreError::InternalError(format!("saved trip {}: {}", row.id, e)))?;

        Ok(SavedTrip {
            id: TripId::new(row.id.to_string()),
            api_id: row.api_id,
            origin,
            destination,
            cost: row.cost,
            duration: row.duration,
            kind: row.trip_type,
            display_name: row.display_name,
        })
    }
}

fn db_error(err: sqlx::Error) -> CoreError {
    error!("Saved trip query failed: {}", err);
    CoreError::InternalError(err.to_string())
}

#[async_trait]
impl TripRepository for PostgresTripRepository {
    async fn find(&self, route: Option<&RouteFilter>) -> CoreResult<Vec<SavedTrip>> {
        let sql = format!(
            "SELECT {} FROM saved_trips \
             WHERE ($1::text IS NULL OR origin = $1) AND ($2::text IS NULL OR destination = $2) \
             ORDER BY created_at, id",
            RETURNING
        );

        let rows: Vec<SavedTripRow> = sqlx::query_as(&sql)
            .bind(route.map(|r| r.origin.as_str()))
            .bind(route.map(|r| r.destination.as_str()))
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        rows.into_iter().map(SavedTrip::try_from).collect()
    }

    async fn find_by_api_id(&self, api_id: &str) -> CoreResult<Option<SavedTrip>> {
        let sql = format!("SELECT {} FROM saved_trips WHERE api_id = $1", RETURNING);

        let row: Option<SavedTripRow> = sqlx::query_as(&sql)
            .bind(api_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

        row.map(SavedTrip::try_from).transpose()
    }

    async fn create(&self, trip: &NewSavedTrip) -> CoreResult<SavedTrip> {
        let sql = format!(
            "INSERT INTO saved_trips (api_id, origin, destination, cost, duration, trip_type, display_name) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {}",
            RETURNING
        );

        let result = sqlx::query_as::<_, SavedTripRow>(&sql)
            .bind(&trip.api_id)
            .bind(trip.origin.as_str())
            .bind(trip.destination.as_str())
            .bind(trip.cost)
            .bind(trip.duration)
            .bind(&trip.kind)
            .bind(&trip.display_name)
            .fetch_one(&self.pool)
            .await;

        match result {
            Ok(row) => SavedTrip::try_from(row),
            // Two saves raced past the lookup; the unique index settles it.
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                warn!(api_id = %trip.api_id, "Unique index rejected duplicate saved trip");
                Err(CoreError::ConflictError(DUPLICATE_API_ID.to_string()))
            }
            Err(err) => Err(db_error(err)),
        }
    }

    async fn delete_by_id(&self, id: &TripId) -> CoreResult<Option<SavedTrip>> {
        let key = Uuid::parse_str(id.as_str()).map_err(|_| CoreError::MalformedId(id.to_string()))?;
        let sql = format!("DELETE FROM saved_trips WHERE id = $1 RETURNING {}", RETURNING);

        let row: Option<SavedTripRow> = sqlx::query_as(&sql)
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

        row.map(SavedTrip::try_from).transpose()
    }
}
