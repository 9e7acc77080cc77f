//! Seeds the `users` collection with sample data and a unique username index.
//!
//! Run with:
//! ```
//! cargo run --bin dataeng-seed
//! ```

use dataeng_seed::{config, services::seed_service, AppState, SeedError};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), SeedError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = config::load();
    let state = AppState::connect(settings).await?;

    let report = seed_service::run(&state).await?;
    seed_service::report_completion(&report);

    Ok(())
}
