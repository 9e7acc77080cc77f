pub mod user;

pub use user::{NewUser, Profile, User, USERS_COLLECTION};
