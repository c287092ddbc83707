use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::books::domain::{title_key, Book};
use crate::core::domain::Identifiable;
use crate::utils::date::serializer;

// BookEntity is the stored form of a book record. Only the five catalog fields
// leave the service; version and timestamps are storage bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookEntity {
    pub book_id: String,
    pub version: i64,
    pub isbn: String,
    pub title: String,
    pub title_key: String,
    pub author: String,
    pub price: f64,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl BookEntity {
    pub fn new(book_id: &str, isbn: &str, title: &str, author: &str, price: f64) -> Self {
        Self {
            book_id: book_id.to_string(),
            version: 0,
            isbn: isbn.to_string(),
            title: title.to_string(),
            title_key: title_key(title),
            author: author.to_string(),
            price,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl Identifiable for BookEntity {
    fn id(&self) -> String {
        self.book_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

impl Book for BookEntity {
    fn isbn(&self) -> &str {
        self.isbn.as_str()
    }

    fn title(&self) -> &str {
        self.title.as_str()
    }

    fn author(&self) -> &str {
        self.author.as_str()
    }

    fn price(&self) -> f64 {
        self.price
    }
}
