use std::collections::BTreeMap;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use crate::books::domain::model::BookEntity;
use crate::books::repository::BookRepository;
use crate::core::errors::{CatalogError, CatalogResult};
use crate::core::repository::{PaginatedResult, Repository};

// In-process store keyed by book_id. Scan pages walk keys in order and the
// page token is the last key of the previous page.
#[derive(Debug, Default)]
pub struct MemoryBookRepository {
    books: RwLock<BTreeMap<String, BookEntity>>,
}

impl MemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository<BookEntity> for MemoryBookRepository {
    async fn create(&self, entity: &BookEntity) -> CatalogResult<usize> {
        let mut books = self.books.write().await;
        if books.contains_key(entity.book_id.as_str()) {
            return Err(CatalogError::duplicate_key(format!("book already exists {}", entity.book_id).as_str()));
        }
        books.insert(entity.book_id.to_string(), entity.clone());
        Ok(1)
    }

    async fn update(&self, entity: &BookEntity) -> CatalogResult<usize> {
        let mut books = self.books.write().await;
        match books.get_mut(entity.book_id.as_str()) {
            Some(existing) => {
                existing.version += 1;
                existing.isbn = entity.isbn.to_string();
                existing.title = entity.title.to_string();
                existing.title_key = entity.title_key.to_string();
                existing.author = entity.author.to_string();
                existing.price = entity.price;
                existing.updated_at = Utc::now().naive_utc();
                Ok(1)
            }
            None => Err(CatalogError::not_found(format!("book not found for {}", entity.book_id).as_str())),
        }
    }

    async fn get(&self, id: &str) -> CatalogResult<BookEntity> {
        self.books.read().await.get(id).cloned()
            .ok_or_else(|| CatalogError::not_found(format!("book not found for {}", id).as_str()))
    }

    async fn delete(&self, id: &str) -> CatalogResult<usize> {
        self.books.write().await.remove(id).map(|_| 1)
            .ok_or_else(|| CatalogError::not_found(format!("book not found for {}", id).as_str()))
    }

    async fn scan(&self, page: Option<&str>, page_size: usize) -> CatalogResult<PaginatedResult<BookEntity>> {
        let books = self.books.read().await;
        let mut remaining = books.values()
            .filter(|b| page.map_or(true, |after| b.book_id.as_str() > after));
        let records: Vec<BookEntity> = remaining.by_ref().take(page_size.max(1)).cloned().collect();
        let next_page = if remaining.next().is_some() {
            records.last().map(|b| b.book_id.to_string())
        } else {
            None
        };
        Ok(PaginatedResult::new(page, page_size, next_page, records))
    }
}

#[async_trait]
impl BookRepository for MemoryBookRepository {}
