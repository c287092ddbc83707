use async_trait::async_trait;
use core::option::Option;
use serde::{Deserialize, Serialize};
use crate::core::errors::CatalogResult;

#[async_trait]
pub trait Repository<Entity>: Sync + Send {
    // create an entity
    async fn create(&self, entity: &Entity) -> CatalogResult<usize>;

    // updates an entity
    async fn update(&self, entity: &Entity) -> CatalogResult<usize>;

    // get an entity
    async fn get(&self, id: &str) -> CatalogResult<Entity>;

    // delete an entity
    async fn delete(&self, id: &str) -> CatalogResult<usize>;

    // one page of entities, page is the opaque token returned as next_page
    async fn scan(&self, page: Option<&str>, page_size: usize) -> CatalogResult<PaginatedResult<Entity>>;
}

// It defines abstraction for paginated result
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    // The page number or token
    pub page: Option<String>,
    // page size
    pub page_size: usize,
    // Next page if available
    pub next_page: Option<String>,
    // list of records
    pub records: Vec<T>,
}

impl<T> PaginatedResult<T> {
    pub(crate) fn new(page: Option<&str>, page_size: usize,
                      next_page: Option<String>, records: Vec<T>) -> Self {
        PaginatedResult {
            page: page.map(str::to_string),
            page_size,
            next_page,
            records,
        }
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub enum RepositoryStore {
    DynamoDB,
    LocalDynamoDB,
    Memory,
}

impl From<String> for RepositoryStore {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "dynamodb" => RepositoryStore::DynamoDB,
            "local" | "localdynamodb" => RepositoryStore::LocalDynamoDB,
            _ => RepositoryStore::Memory,
        }
    }
}
