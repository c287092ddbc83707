use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub struct AddBookCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl AddBookCommand {
    pub fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

// id is optional; the catalog assigns one when it is blank
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AddBookCommandRequest {
    pub id: String,
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub price: f64,
}

impl AddBookCommandRequest {
    pub fn new(isbn: &str, title: &str, author: &str, price: f64) -> Self {
        Self {
            id: String::new(),
            isbn: isbn.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            price,
        }
    }

    pub fn build_book(&self) -> BookDto {
        BookDto {
            id: self.id.trim().to_string(),
            isbn: self.isbn.to_string(),
            title: self.title.to_string(),
            author: self.author.to_string(),
            price: self.price,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AddBookCommandResponse {
    pub book: BookDto,
}

impl AddBookCommandResponse {
    pub fn new(book: BookDto) -> Self {
        Self {
            book,
        }
    }
}

#[async_trait]
impl Command<AddBookCommandRequest, AddBookCommandResponse> for AddBookCommand {
    async fn execute(&self, req: AddBookCommandRequest) -> Result<AddBookCommandResponse, CommandError> {
        let book = req.build_book();
        self.catalog_service.add_book(&book).await.map_err(CommandError::from).map(AddBookCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest};
    use crate::catalog::factory;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;

    #[tokio::test]
    async fn test_should_run_add_book() {
        let svc = Arc::from(factory::create_catalog_service(&Configuration::new("test")).await);
        let cmd = AddBookCommand::new(svc);

        let res = cmd.execute(AddBookCommandRequest::new("isbn", "test book", "author", 10.0))
            .await.expect("should add book");
        assert!(!res.book.id.is_empty());
        assert_eq!("test book", res.book.title.as_str());
    }

    #[tokio::test]
    async fn test_should_fail_add_book_without_author() {
        let svc = Arc::from(factory::create_catalog_service(&Configuration::new("test")).await);
        let cmd = AddBookCommand::new(svc);

        let res = cmd.execute(AddBookCommandRequest::new("isbn", "test book", "", 10.0)).await;
        assert!(matches!(res, Err(CommandError::Validation { .. })));
    }
}
