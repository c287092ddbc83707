pub mod ddb_book_repository;
pub mod memory_book_repository;

use async_trait::async_trait;
use crate::books::domain::title_key;
use crate::books::domain::model::BookEntity;
use crate::core::errors::CatalogResult;
use crate::core::repository::Repository;

const SCAN_PAGE_SIZE: usize = 100;

#[async_trait]
pub trait BookRepository: Repository<BookEntity> {
    // every stored book, following scan pages until the store is exhausted
    async fn find_all(&self) -> CatalogResult<Vec<BookEntity>> {
        let mut books = vec![];
        let mut page: Option<String> = None;
        loop {
            let res = self.scan(page.as_deref(), SCAN_PAGE_SIZE).await?;
            books.extend(res.records);
            match res.next_page {
                Some(next) => page = Some(next),
                None => break,
            }
        }
        Ok(books)
    }

    // books sharing the isbn, or whose title equals the given one ignoring case
    async fn find_matching(&self, isbn: &str, title: &str) -> CatalogResult<Vec<BookEntity>> {
        let key = title_key(title);
        let books = self.find_all().await?;
        Ok(books.into_iter().filter(|b| b.isbn == isbn || b.title_key == key).collect())
    }

    async fn delete_all(&self) -> CatalogResult<usize> {
        let mut deleted = 0;
        for book in self.find_all().await? {
            deleted += self.delete(book.book_id.as_str()).await?;
        }
        Ok(deleted)
    }
}
