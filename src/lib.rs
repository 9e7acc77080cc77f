//! Library entrypoint for dataeng-seed.
//!
//! The binary only wires settings, logging and the seed run together. Everything
//! it calls lives here so integration tests under `tests/` can drive the same
//! code against a throwaway database.

pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use error::SeedError;

#[derive(Clone)]
pub struct AppState {
    pub db: mongodb::Database,
    pub settings: config::Settings,
}

impl AppState {
    /// Builds the driver client and selects the configured database.
    pub async fn connect(settings: config::Settings) -> Result<Self, SeedError> {
        let db = services::db::connect(&settings).await?;
        Ok(Self { db, settings })
    }
}
