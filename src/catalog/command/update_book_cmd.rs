use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub struct UpdateBookCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl UpdateBookCommand {
    pub fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateBookCommandRequest {
    pub id: String,
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub price: f64,
}

impl UpdateBookCommandRequest {
    pub fn new(id: &str, isbn: &str, title: &str, author: &str, price: f64) -> Self {
        Self {
            id: id.to_string(),
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
pub struct UpdateBookCommandResponse {
    pub book: BookDto,
}

impl UpdateBookCommandResponse {
    pub fn new(book: BookDto) -> Self {
        Self {
            book,
        }
    }
}

#[async_trait]
impl Command<UpdateBookCommandRequest, UpdateBookCommandResponse> for UpdateBookCommand {
    async fn execute(&self, req: UpdateBookCommandRequest) -> Result<UpdateBookCommandResponse, CommandError> {
        let book = req.build_book();
        self.catalog_service.update_book(&book).await.map_err(CommandError::from).map(UpdateBookCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest};
    use crate::catalog::command::update_book_cmd::{UpdateBookCommand, UpdateBookCommandRequest};
    use crate::catalog::domain::CatalogService;
    use crate::catalog::factory;
    use crate::core::command::Command;
    use crate::core::domain::Configuration;

    #[tokio::test]
    async fn test_should_run_update_book() {
        let svc: Arc<dyn CatalogService> = Arc::from(factory::create_catalog_service(&Configuration::new("test")).await);
        let add_cmd = AddBookCommand::new(svc.clone());
        let update_cmd = UpdateBookCommand::new(svc.clone());

        let res = add_cmd.execute(AddBookCommandRequest::new("isbn", "test book", "author", 1.0))
            .await.expect("should add book");
        let req = UpdateBookCommandRequest::new(res.book.id.as_str(), "isbn", "renamed", "author", 2.5);
        update_cmd.execute(req).await.expect("should update book");

        let loaded = svc.find_book_by_id(res.book.id.as_str()).await.expect("should get book");
        assert_eq!("renamed", loaded.title.as_str());
        assert_eq!(2.5, loaded.price);
    }
}
