use async_trait::async_trait;
use tracing::{info, warn};
use crate::books::domain::Book;
use crate::books::domain::model::BookEntity;
use crate::books::dto::{generate_id, BookDto};
use crate::books::repository::BookRepository;
use crate::catalog::domain::CatalogService;
use crate::catalog::domain::status::Status;
use crate::core::domain::Configuration;
use crate::core::errors::{CatalogError, CatalogResult};

const SEED_BOOKS: [(&str, &str, &str, f64); 9] = [
    ("9781501151774", "The Woman in Cabin 10", "Ruth Ware", 41.0),
    ("9780385514231", "Origin", "Dan Brown", 35.0),
    ("9780735253308", "The Handmaid's Tale", "Margaret Atwood", 36.0),
    ("9781101967683", "The Whistler", "John Grisham", 55.0),
    ("9780062654199", "The Alice Network", "Kate Quinn", 60.0),
    ("9780385689632", "Into the Water", "Paula Hawkins", 47.0),
    ("9780385543026", "Camino Island", "John Grisham", 35.0),
    ("9780525954972", "A Column of Fire", "Ken Follett", 43.0),
    ("9781250080400", "The Nightingale", "Kristin Hannah", 39.0),
];

pub(crate) struct CatalogServiceImpl {
    book_repository: Box<dyn BookRepository>,
}

impl CatalogServiceImpl {
    pub(crate) fn new(_config: &Configuration, book_repository: Box<dyn BookRepository>) -> Self {
        Self {
            book_repository,
        }
    }

    fn validate(book: &BookDto) -> CatalogResult<()> {
        match book.empty_field() {
            Some(field) => Err(CatalogError::validation(
                Status::Empty.message(field).as_str(), Some(field.to_string()))),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn add_book(&self, book: &BookDto) -> CatalogResult<BookDto> {
        Self::validate(book)?;
        let existing = self.book_repository.find_matching(book.isbn.as_str(), book.title.as_str()).await?;
        if !existing.is_empty() {
            return Err(CatalogError::duplicate_key(Status::Exists.message("").as_str()));
        }
        let mut stored = book.clone();
        if stored.id.trim().is_empty() {
            stored.id = generate_id();
        }
        self.book_repository.create(&BookEntity::from(&stored)).await?;
        info!("added book {} isbn {}", stored.id, stored.isbn);
        Ok(stored)
    }

    async fn update_book(&self, book: &BookDto) -> CatalogResult<BookDto> {
        Self::validate(book)?;
        self.book_repository.update(&BookEntity::from(book)).await?;
        info!("updated book {}", book.id);
        Ok(book.clone())
    }

    async fn remove_book(&self, id: &str) -> CatalogResult<()> {
        self.book_repository.delete(id).await?;
        info!("removed book {}", id);
        Ok(())
    }

    async fn remove_all(&self) -> CatalogResult<usize> {
        let deleted = self.book_repository.delete_all().await?;
        info!("removed {} books", deleted);
        Ok(deleted)
    }

    async fn find_book_by_id(&self, id: &str) -> CatalogResult<BookDto> {
        self.book_repository.get(id).await.map(|b| BookDto::from(&b))
    }

    async fn find_books(&self) -> CatalogResult<Vec<BookDto>> {
        let books = self.book_repository.find_all().await?;
        Ok(books.iter().map(BookDto::from).collect())
    }

    async fn load_seed_data(&self) -> usize {
        let mut loaded = 0;
        for (isbn, title, author, price) in SEED_BOOKS {
            match self.add_book(&BookDto::new(isbn, title, author, price)).await {
                Ok(_) => loaded += 1,
                Err(err) => warn!("seed book {} skipped: {}", isbn, err),
            }
        }
        info!("books data has been loaded, {} added", loaded);
        loaded
    }
}
