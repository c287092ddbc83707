pub mod service;
pub mod status;

use async_trait::async_trait;
use crate::books::dto::BookDto;
use crate::core::errors::CatalogResult;

#[async_trait]
pub trait CatalogService: Sync + Send {
    async fn add_book(&self, book: &BookDto) -> CatalogResult<BookDto>;
    async fn update_book(&self, book: &BookDto) -> CatalogResult<BookDto>;
    async fn remove_book(&self, id: &str) -> CatalogResult<()>;
    async fn remove_all(&self) -> CatalogResult<usize>;
    async fn find_book_by_id(&self, id: &str) -> CatalogResult<BookDto>;
    async fn find_books(&self) -> CatalogResult<Vec<BookDto>>;
    // adds the demo books, returns how many were stored
    async fn load_seed_data(&self) -> usize;
}
