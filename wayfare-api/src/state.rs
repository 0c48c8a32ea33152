use wayfare_core::search::SearchGateway;
use wayfare_core::store::TripStore;

#[derive(Clone)]
pub struct AuthConfig {
    pub api_key: String,
}

#[derive(Clone)]
pub struct AppState {
    pub search: SearchGateway,
    pub trips: TripStore,
    pub auth: AuthConfig,
}
