use std::env;
use std::path::Path;

// Default configuration constants
pub const DEFAULT_MONGO_URI: &str = "mongodb://localhost:27017";
pub const DEFAULT_DB_NAME: &str = "medicaldb";
pub const DEFAULT_COLLECTION_NAME: &str = "patients";
pub const DEFAULT_DATA_FILE: &str = "data/healthcare_dataset.csv";

pub fn load_env_file(env_file: Option<&str>) {
    if let Some(path) = env_file {
        dotenvy::from_path(Path::new(path)).ok();
    } else {
        dotenvy::dotenv().ok();
    }
}

pub fn get_mongo_uri() -> String {
    sanitize_mongo_uri(&env::var("MONGO_URI").unwrap_or_else(|_| DEFAULT_MONGO_URI.to_string()))
}

pub fn get_db_name() -> String {
    env::var("DB_NAME").unwrap_or_else(|_| DEFAULT_DB_NAME.to_string())
}

pub fn get_collection_name() -> String {
    env::var("COLLECTION_NAME").unwrap_or_else(|_| DEFAULT_COLLECTION_NAME.to_string())
}

pub fn get_data_file() -> String {
    env::var("DATA_FILE").unwrap_or_else(|_| DEFAULT_DATA_FILE.to_string())
}

pub fn sanitize_mongo_uri(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_MONGO_URI.to_string()
    } else {
        trimmed.to_string()
    }
}
