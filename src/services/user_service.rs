use mongodb::bson::{doc, oid::ObjectId, Document};

use crate::{
    models::{NewUser, User, USERS_COLLECTION},
    AppState, SeedError,
};

fn parse_id(user_id: &str) -> Result<ObjectId, SeedError> {
    ObjectId::parse_str(user_id).map_err(|_| SeedError::InvalidId(user_id.to_string()))
}

pub async fn create_user(state: &AppState, new_user: NewUser) -> Result<ObjectId, SeedError> {
    let users = state.db.collection::<User>(USERS_COLLECTION);

    let id = ObjectId::new();
    let mut user = new_user.into_user();
    user.id = Some(id);

    users
        .insert_one(&user, None)
        .await
        .map_err(|e| SeedError::on_insert(USERS_COLLECTION, e))?;

    Ok(id)
}

pub async fn get_user_by_id(state: &AppState, user_id: &str) -> Result<Option<User>, SeedError> {
    let id = parse_id(user_id)?;
    let users = state.db.collection::<User>(USERS_COLLECTION);

    Ok(users.find_one(doc! { "_id": id }, None).await?)
}

pub async fn get_user_by_username(state: &AppState, username: &str) -> Result<Option<User>, SeedError> {
    let users = state.db.collection::<User>(USERS_COLLECTION);

    Ok(users.find_one(doc! { "username": username }, None).await?)
}

/// Returns true when a document was actually modified.
pub async fn update_user_email(state: &AppState, user_id: &str, new_email: &str) -> Result<bool, SeedError> {
    let id = parse_id(user_id)?;
    let users = state.db.collection::<User>(USERS_COLLECTION);

    let res = users
        .update_one(doc! { "_id": id }, doc! { "$set": { "email": new_email } }, None)
        .await?;

    Ok(res.modified_count > 0)
}

/// Returns true when a document was actually modified.
pub async fn increment_user_age(state: &AppState, user_id: &str, amount: i32) -> Result<bool, SeedError> {
    let id = parse_id(user_id)?;
    let users = state.db.collection::<User>(USERS_COLLECTION);

    let res = users
        .update_one(doc! { "_id": id }, doc! { "$inc": { "profile.age": amount } }, None)
        .await?;

    Ok(res.modified_count > 0)
}

/// `$set` for the given profile fields. Empty when nothing is given.
fn profile_update(first_name: Option<&str>, last_name: Option<&str>, age: Option<i32>) -> Document {
    let mut set = Document::new();
    if let Some(first_name) = first_name {
        set.insert("profile.first_name", first_name);
    }
    if let Some(last_name) = last_name {
        set.insert("profile.last_name", last_name);
    }
    if let Some(age) = age {
        set.insert("profile.age", age);
    }
    set
}

/// Sets the given profile fields, creating the profile if the user has none.
/// Returns true when the user exists, even if nothing changed.
pub async fn update_user_profile(
    state: &AppState,
    user_id: &str,
    first_name: Option<&str>,
    last_name: Option<&str>,
    age: Option<i32>,
) -> Result<bool, SeedError> {
    let id = parse_id(user_id)?;
    let users = state.db.collection::<User>(USERS_COLLECTION);

    let set = profile_update(first_name, last_name, age);
    if set.is_empty() {
        // the server rejects an empty $set
        let found = users.count_documents(doc! { "_id": id }, None).await?;
        return Ok(found > 0);
    }

    let res = users
        .update_one(doc! { "_id": id }, doc! { "$set": set }, None)
        .await?;

    Ok(res.matched_count > 0)
}

pub async fn count_users(state: &AppState) -> Result<u64, SeedError> {
    let users = state.db.collection::<User>(USERS_COLLECTION);
    Ok(users.count_documents(doc! {}, None).await?)
}
