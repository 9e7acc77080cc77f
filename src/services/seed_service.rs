use std::fmt;

use chrono::{DateTime, Utc};
use mongodb::{
    bson::{oid::ObjectId, Bson},
    Collection,
};
use tracing::info;

use crate::{
    models::{Profile, User, USERS_COLLECTION},
    AppState, SeedError,
};

use super::db_init;

/// Outcome of one seed run.
#[derive(Debug, Clone)]
pub struct SeedReport {
    pub database: String,
    pub inserted_ids: Vec<ObjectId>,
    pub index_name: String,
    pub finished_at: DateTime<Utc>,
}

impl fmt::Display for SeedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MongoDB initialized with sample data ({} users in `{}`, index `{}`)",
            self.inserted_ids.len(),
            self.database,
            self.index_name
        )
    }
}

/// The fixed seed batch. `created_at` is stamped when this is called.
pub fn seed_users() -> Vec<User> {
    vec![
        User::new(
            "alice",
            "alice@example.com",
            Some(Profile {
                age: Some(28),
                city: Some("Berlin".into()),
                interests: vec!["python".into(), "data science".into()],
                ..Default::default()
            }),
        ),
        User::new(
            "bob",
            "bob@example.com",
            Some(Profile {
                age: Some(31),
                city: Some("Hamburg".into()),
                interests: vec!["mongodb".into()],
                ..Default::default()
            }),
        ),
    ]
}

/// Ordered bulk insert of the seed batch. Returns the assigned ids in batch order.
pub async fn insert_seed_users(col: &Collection<User>) -> Result<Vec<ObjectId>, SeedError> {
    let users = seed_users();

    let res = col
        .insert_many(&users, None)
        .await
        .map_err(|e| SeedError::on_insert(col.name(), e))?;

    let mut ids: Vec<(usize, ObjectId)> = res
        .inserted_ids
        .into_iter()
        .filter_map(|(i, id)| match id {
            Bson::ObjectId(oid) => Some((i, oid)),
            _ => None,
        })
        .collect();
    ids.sort_by_key(|(i, _)| *i);

    info!(collection = %col.name(), count = ids.len(), "inserted seed users");
    Ok(ids.into_iter().map(|(_, id)| id).collect())
}

/// Inserts the seed batch, then builds the unique username index.
///
/// Uniqueness is only enforced from the index onwards, so a batch that already
/// holds duplicates fails at the index step.
pub async fn run(state: &AppState) -> Result<SeedReport, SeedError> {
    let users = state.db.collection::<User>(USERS_COLLECTION);

    let inserted_ids = insert_seed_users(&users).await?;
    let index_name = db_init::ensure_username_index(&users).await?;

    Ok(SeedReport {
        database: state.db.name().to_string(),
        inserted_ids,
        index_name,
        finished_at: Utc::now(),
    })
}

pub fn report_completion(report: &SeedReport) {
    info!(finished_at = %report.finished_at.to_rfc3339(), "{report}");
}
