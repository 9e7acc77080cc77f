use std::env;

#[derive(Debug, Clone)]
pub struct Settings {
    pub mongodb_uri: String,
    pub mongodb_db: String,
}

pub fn load() -> Settings {
    // Loads .env if present (no crash if missing)
    dotenvy::dotenv().ok();

    from_lookup(|key| env::var(key).ok())
}

/// Resolves settings through `lookup`, falling back to the local docker defaults.
pub fn from_lookup<F>(lookup: F) -> Settings
where
    F: Fn(&str) -> Option<String>,
{
    let mongodb_uri = lookup("MONGODB_URI").unwrap_or_else(|| {
        let host = lookup("MONGO_HOST").unwrap_or_else(|| "localhost".to_string());
        let port = lookup("MONGO_PORT")
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(27017);
        let user = lookup("MONGO_INITDB_ROOT_USERNAME").unwrap_or_else(|| "admin".to_string());
        let password =
            lookup("MONGO_INITDB_ROOT_PASSWORD").unwrap_or_else(|| "adminpassword".to_string());

        compose_uri(&host, port, &user, &password)
    });

    let mongodb_db = lookup("MONGODB_DB")
        .or_else(|| lookup("MONGO_DB"))
        .unwrap_or_else(|| "dataeng".to_string());

    Settings {
        mongodb_uri,
        mongodb_db,
    }
}

fn compose_uri(host: &str, port: u16, user: &str, password: &str) -> String {
    // credentials may contain URI-reserved characters
    let user = urlencoding::encode(user);
    let password = urlencoding::encode(password);

    format!("mongodb://{user}:{password}@{host}:{port}/?authSource=admin")
}
