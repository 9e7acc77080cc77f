use mongodb::{Client, Database};
use tracing::info;

use crate::{config::Settings, SeedError};

/// Creates the client and binds the target database.
///
/// The driver connects lazily: an unreachable server is reported by the first
/// operation that needs a round trip, not here.
pub async fn connect(settings: &Settings) -> Result<Database, SeedError> {
    let client = Client::with_uri_str(&settings.mongodb_uri).await?;
    let db = client.database(&settings.mongodb_db);

    info!(database = %settings.mongodb_db, "selected database");
    Ok(db)
}
