use std::env;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::core::repository::RepositoryStore;

// Identifiable defines common traits that can be shared by persistent objects
pub trait Identifiable: Sync + Send {
    fn id(&self) -> String;
    fn version(&self) -> i64;
}

// ServeVia selects how the router is exposed: a plain listener or the lambda runtime
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub enum ServeVia {
    Http,
    Lambda,
}

impl From<String> for ServeVia {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "lambda" => ServeVia::Lambda,
            _ => ServeVia::Http,
        }
    }
}

// Configuration abstracts config options for the book catalog
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Configuration {
    pub env: String,
    pub store: RepositoryStore,
    pub table_name: String,
    pub ddb_endpoint: String,
    pub base_path: String,
    pub page_length: usize,
    pub seed_data: bool,
    pub serve_via: ServeVia,
    pub bind_addr: String,
    pub log_level: String,
}

impl Configuration {
    pub fn new(env: &str) -> Self {
        Configuration {
            env: env.to_string(),
            store: RepositoryStore::Memory,
            table_name: "bookdata".to_string(),
            ddb_endpoint: "http://localhost:8000".to_string(),
            base_path: "/books".to_string(),
            page_length: 10,
            seed_data: true,
            serve_via: ServeVia::Http,
            bind_addr: "0.0.0.0:8080".to_string(),
            log_level: "info".to_string(),
        }
    }

    pub fn from_env() -> Self {
        let mut config = Configuration::new(var_or("BOOKS_ENV", "dev").as_str());
        config.store = RepositoryStore::from(var_or("BOOKS_STORE", "memory"));
        config.table_name = var_or("BOOKS_TABLE", config.table_name.as_str());
        config.ddb_endpoint = var_or("BOOKS_DDB_ENDPOINT", config.ddb_endpoint.as_str());
        config.base_path = normalize_base_path(var_or("BOOKS_BASE_PATH", config.base_path.as_str()).as_str());
        config.page_length = parse_or("BOOKS_PAGE_LENGTH", config.page_length);
        config.seed_data = parse_or("BOOKS_SEED", config.seed_data);
        config.serve_via = ServeVia::from(var_or("BOOKS_SERVE", "http"));
        config.bind_addr = var_or("BOOKS_BIND", config.bind_addr.as_str());
        config.log_level = var_or("BOOKS_LOG_LEVEL", config.log_level.as_str());
        config
    }

    // path of the read endpoint returning every book as a bare json array
    pub fn list_path(&self) -> String {
        format!("{}/get/all", self.base_path)
    }

    pub fn edit_path(&self) -> String {
        format!("{}/updateBook", self.base_path)
    }
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).ok().filter(|v| !v.trim().is_empty()).unwrap_or_else(|| default.to_string())
}

fn parse_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name).ok().and_then(|v| v.trim().parse::<T>().ok()).unwrap_or(default)
}

// "/books/" and "books" both become "/books"; "/" becomes ""
fn normalize_base_path(path: &str) -> String {
    let trimmed = path.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}
