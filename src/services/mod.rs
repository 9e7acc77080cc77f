pub mod db;
pub mod db_init;

pub mod seed_service;
pub mod user_service;
