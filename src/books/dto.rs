use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::books::domain::Book;
use crate::books::domain::model::BookEntity;
use crate::core::domain::Identifiable;

// BookDto is the wire form of a book: exactly the fields the list endpoint returns
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BookDto {
    pub id: String,
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub price: f64,
}

impl BookDto {
    pub fn new(isbn: &str, title: &str, author: &str, price: f64) -> BookDto {
        BookDto {
            id: generate_id(),
            isbn: isbn.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            price,
        }
    }
}

/// Short record id: the first group of a random v4 uuid, e.g. `9b2f61c0`.
pub fn generate_id() -> String {
    let uuid = Uuid::new_v4().to_string();
    uuid.split('-').next().unwrap_or_default().to_string()
}

impl Identifiable for BookDto {
    fn id(&self) -> String {
        self.id.to_string()
    }

    fn version(&self) -> i64 {
        0
    }
}

impl Book for BookDto {
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

impl From<&BookEntity> for BookDto {
    fn from(other: &BookEntity) -> Self {
        Self {
            id: other.book_id.to_string(),
            isbn: other.isbn.to_string(),
            title: other.title.to_string(),
            author: other.author.to_string(),
            price: other.price,
        }
    }
}

impl From<&BookDto> for BookEntity {
    fn from(other: &BookDto) -> Self {
        BookEntity::new(other.id.as_str(), other.isbn.as_str(), other.title.as_str(),
                        other.author.as_str(), other.price)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use crate::books::dto::{generate_id, BookDto};

    #[tokio::test]
    async fn test_should_build_books() {
        let book = BookDto::new("isbn", "title", "author", 41.0);
        assert_eq!("isbn", book.isbn.as_str());
        assert_eq!("title", book.title.as_str());
        assert_eq!(8, book.id.len());
    }

    #[tokio::test]
    async fn test_should_generate_short_hex_ids() {
        let id = generate_id();
        assert_eq!(8, id.len());
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(id, generate_id());
    }

    #[tokio::test]
    async fn test_should_serialize_only_catalog_fields() {
        let book = BookDto { id: "abc".to_string(), isbn: "9780385514231".to_string(),
            title: "Origin".to_string(), author: "Dan Brown".to_string(), price: 35.0 };
        let value = serde_json::to_value(&book).expect("should serialize");
        assert_eq!(json!({"id": "abc", "isbn": "9780385514231", "title": "Origin",
            "author": "Dan Brown", "price": 35.0}), value);
    }

    #[tokio::test]
    async fn test_should_default_missing_fields() {
        let book: BookDto = serde_json::from_value(json!({"isbn": "1", "title": "t", "author": "a"}))
            .expect("should deserialize");
        assert!(book.id.is_empty());
        assert_eq!(0.0, book.price);
    }
}
