//! Most of these need a running MongoDB (`MONGODB_URI` or the docker defaults).
//! Run with `cargo test -- --ignored`.

use dataeng_seed::{
    config,
    models::{NewUser, User, USERS_COLLECTION},
    services::{db_init, user_service},
    AppState, SeedError,
};
use mongodb::bson::oid::ObjectId;

async fn test_state() -> AppState {
    let mut settings = config::load();
    settings.mongodb_db = format!("dataeng_test_{}", ObjectId::new().to_hex());

    AppState::connect(settings).await.expect("mongodb client")
}

fn david() -> NewUser {
    let mut new = NewUser::new("david", "david@example.com");
    new.first_name = Some("David".into());
    new.age = Some(35);
    new
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn create_then_fetch_by_id_and_username() {
    let state = test_state().await;

    let id = user_service::create_user(&state, david()).await.unwrap();

    let by_id = user_service::get_user_by_id(&state, &id.to_hex())
        .await
        .unwrap()
        .expect("user by id");
    assert_eq!(by_id.id, Some(id));
    assert_eq!(by_id.username, "david");

    let profile = by_id.profile.expect("profile stored");
    assert_eq!(profile.first_name.as_deref(), Some("David"));
    assert_eq!(profile.age, Some(35));

    let by_name = user_service::get_user_by_username(&state, "david")
        .await
        .unwrap()
        .expect("user by username");
    assert_eq!(by_name.id, Some(id));

    state.db.drop(None).await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn missing_user_is_none() {
    let state = test_state().await;

    let by_id = user_service::get_user_by_id(&state, &ObjectId::new().to_hex())
        .await
        .unwrap();
    assert!(by_id.is_none());

    let by_name = user_service::get_user_by_username(&state, "nobody").await.unwrap();
    assert!(by_name.is_none());

    state.db.drop(None).await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn update_email_and_increment_age() {
    let state = test_state().await;
    let id = user_service::create_user(&state, david()).await.unwrap().to_hex();

    assert!(user_service::update_user_email(&state, &id, "dave@example.com").await.unwrap());
    // same value again: matched but not modified
    assert!(!user_service::update_user_email(&state, &id, "dave@example.com").await.unwrap());

    assert!(user_service::increment_user_age(&state, &id, 2).await.unwrap());

    let user = user_service::get_user_by_id(&state, &id).await.unwrap().unwrap();
    assert_eq!(user.email, "dave@example.com");
    assert_eq!(user.profile.and_then(|p| p.age), Some(37));

    let unknown = ObjectId::new().to_hex();
    assert!(!user_service::increment_user_age(&state, &unknown, 1).await.unwrap());

    state.db.drop(None).await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn update_profile_creates_missing_profile() {
    let state = test_state().await;
    let id = user_service::create_user(&state, NewUser::new("frank", "frank@example.com"))
        .await
        .unwrap()
        .to_hex();

    let before = user_service::get_user_by_id(&state, &id).await.unwrap().unwrap();
    assert!(before.profile.is_none());

    assert!(user_service::update_user_profile(&state, &id, Some("Frank"), None, Some(40)).await.unwrap());

    let profile = user_service::get_user_by_id(&state, &id)
        .await
        .unwrap()
        .unwrap()
        .profile
        .expect("profile created");
    assert_eq!(profile.first_name.as_deref(), Some("Frank"));
    assert!(profile.last_name.is_none());
    assert_eq!(profile.age, Some(40));

    state.db.drop(None).await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn update_profile_keeps_untouched_fields() {
    let state = test_state().await;
    let id = user_service::create_user(&state, david()).await.unwrap().to_hex();

    assert!(user_service::update_user_profile(&state, &id, None, Some("Miller"), None).await.unwrap());
    // nothing to set still reports an existing user
    assert!(user_service::update_user_profile(&state, &id, None, None, None).await.unwrap());

    let profile = user_service::get_user_by_id(&state, &id)
        .await
        .unwrap()
        .unwrap()
        .profile
        .unwrap();
    assert_eq!(profile.first_name.as_deref(), Some("David"));
    assert_eq!(profile.last_name.as_deref(), Some("Miller"));
    assert_eq!(profile.age, Some(35));

    let unknown = ObjectId::new().to_hex();
    assert!(!user_service::update_user_profile(&state, &unknown, Some("X"), None, None).await.unwrap());
    assert!(!user_service::update_user_profile(&state, &unknown, None, None, None).await.unwrap());

    state.db.drop(None).await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn created_id_matches_stored_document() {
    let state = test_state().await;

    let id = user_service::create_user(&state, david()).await.unwrap();
    let stored = user_service::get_user_by_username(&state, "david")
        .await
        .unwrap()
        .expect("user stored");
    assert_eq!(stored.id, Some(id));

    state.db.drop(None).await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn duplicate_create_with_index_is_duplicate_key() {
    let state = test_state().await;
    let users = state.db.collection::<User>(USERS_COLLECTION);
    db_init::ensure_username_index(&users).await.unwrap();

    user_service::create_user(&state, david()).await.unwrap();
    let err = user_service::create_user(&state, david()).await.unwrap_err();
    assert!(matches!(err, SeedError::DuplicateKey { .. }), "got {err:?}");

    state.db.drop(None).await.unwrap();
}

#[tokio::test]
async fn malformed_id_is_rejected_before_any_query() {
    let settings = config::Settings {
        mongodb_uri: "mongodb://127.0.0.1:1".to_string(),
        mongodb_db: "dataeng".to_string(),
    };
    let state = AppState::connect(settings).await.expect("client builds lazily");

    let err = user_service::get_user_by_id(&state, "xyz").await.unwrap_err();
    assert!(matches!(err, SeedError::InvalidId(ref raw) if raw == "xyz"));

    let err = user_service::update_user_email(&state, "xyz", "a@b.c").await.unwrap_err();
    assert!(matches!(err, SeedError::InvalidId(_)));

    let err = user_service::update_user_profile(&state, "xyz", Some("A"), None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, SeedError::InvalidId(_)));
}
