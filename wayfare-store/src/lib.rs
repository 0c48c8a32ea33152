pub mod app_config;
pub mod database;
pub mod trip_repo;
pub mod memory_repo;
pub mod provider_client;

pub use database::DbClient;
pub use memory_repo::InMemoryTripRepository;
pub use provider_client::HttpTripProvider;
pub use trip_repo::PostgresTripRepository;
