use futures_util::TryStreamExt;
use mongodb::{
    bson::doc,
    options::IndexOptions,
    Collection, IndexModel,
};
use tracing::info;

use crate::SeedError;

/// Server-side name of the `{ username: 1 }` index.
pub const USERNAME_INDEX: &str = "username_1";

pub fn username_index_model() -> IndexModel {
    IndexModel::builder()
        .keys(doc! { "username": 1 })
        .options(IndexOptions::builder().unique(true).build())
        .build()
}

/// Creates the unique username index. Recreating an identical index is a no-op
/// on the server.
pub async fn ensure_username_index<T>(col: &Collection<T>) -> Result<String, SeedError>
where
    T: Send + Sync,
{
    let res = col
        .create_index(username_index_model(), None)
        .await
        .map_err(|e| SeedError::on_index(USERNAME_INDEX, e))?;

    info!(collection = %col.name(), index = %res.index_name, "unique index ready");
    Ok(res.index_name)
}

pub async fn username_index_is_unique<T>(col: &Collection<T>) -> Result<bool, SeedError>
where
    T: Send + Sync,
{
    let mut cursor = col.list_indexes(None).await?;

    while let Some(index) = cursor.try_next().await? {
        if index.keys == doc! { "username": 1 } {
            let unique = index.options.and_then(|o| o.unique).unwrap_or(false);
            return Ok(unique);
        }
    }

    Ok(false)
}
