use std::cmp;
use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;
use chrono::Utc;

use crate::books::domain::title_key;
use crate::books::domain::model::BookEntity;
use crate::books::repository::BookRepository;
use crate::core::errors::{CatalogError, CatalogResult};
use crate::core::repository::{PaginatedResult, Repository};
use crate::utils::ddb::{from_ddb, parse_date_attribute, parse_float_attribute, parse_item, parse_number_attribute, parse_string_attribute, string_date, to_ddb_page};

#[derive(Debug)]
pub struct DDBBookRepository {
    client: Client,
    table_name: String,
}

impl DDBBookRepository {
    pub(crate) fn new(client: Client, table_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
        }
    }
}

#[async_trait]
impl Repository<BookEntity> for DDBBookRepository {
    async fn create(&self, entity: &BookEntity) -> CatalogResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        let val = serde_json::to_value(entity)?;
        self.client
            .put_item()
            .table_name(table_name)
            .condition_expression("attribute_not_exists(book_id)")
            .set_item(Some(parse_item(val)?))
            .send()
            .await.map(|_| 1).map_err(CatalogError::from)
    }

    async fn update(&self, entity: &BookEntity) -> CatalogResult<usize> {
        let now = Utc::now().naive_utc();
        let table_name: &str = self.table_name.as_ref();

        self.client
            .update_item()
            .table_name(table_name)
            .key("book_id", AttributeValue::S(entity.book_id.clone()))
            .update_expression("SET version = version + :one, isbn = :isbn, title = :title, title_key = :title_key, author = :author, price = :price, updated_at = :updated_at")
            .expression_attribute_values(":one", AttributeValue::N("1".to_string()))
            .expression_attribute_values(":isbn", AttributeValue::S(entity.isbn.to_string()))
            .expression_attribute_values(":title", AttributeValue::S(entity.title.to_string()))
            .expression_attribute_values(":title_key", AttributeValue::S(title_key(entity.title.as_str())))
            .expression_attribute_values(":author", AttributeValue::S(entity.author.to_string()))
            .expression_attribute_values(":price", AttributeValue::N(entity.price.to_string()))
            .expression_attribute_values(":updated_at", string_date(now))
            .condition_expression("attribute_exists(book_id)")
            .send()
            .await.map(|_| 1).map_err(CatalogError::from)
    }

    async fn get(&self, id: &str) -> CatalogResult<BookEntity> {
        let table_name: &str = self.table_name.as_ref();
        let out = self.client
            .get_item()
            .table_name(table_name)
            .key("book_id", AttributeValue::S(id.to_string()))
            .consistent_read(true)
            .send()
            .await?;
        out.item().map(map_to_book)
            .ok_or_else(|| CatalogError::not_found(format!("book not found for {}", id).as_str()))
    }

    async fn delete(&self, id: &str) -> CatalogResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        self.client.delete_item()
            .table_name(table_name)
            .key("book_id", AttributeValue::S(id.to_string()))
            .condition_expression("attribute_exists(book_id)")
            .send()
            .await.map(|_| 1).map_err(CatalogError::from)
    }

    async fn scan(&self, page: Option<&str>, page_size: usize) -> CatalogResult<PaginatedResult<BookEntity>> {
        let table_name: &str = self.table_name.as_ref();
        self.client
            .scan()
            .table_name(table_name)
            .consistent_read(false)
            .set_exclusive_start_key(to_ddb_page(page))
            .limit(cmp::min(page_size, 500) as i32)
            .send()
            .await.map_err(CatalogError::from).map(|req| {
            let records = req.items().unwrap_or_default().iter().map(map_to_book).collect();
            from_ddb(page, page_size, req.last_evaluated_key(), records)
        })
    }
}

#[async_trait]
impl BookRepository for DDBBookRepository {
    // filtered scan; a page may come back empty while the scan is not finished
    async fn find_matching(&self, isbn: &str, title: &str) -> CatalogResult<Vec<BookEntity>> {
        let table_name: &str = self.table_name.as_ref();
        let mut books = vec![];
        let mut start_key: Option<HashMap<String, AttributeValue>> = None;
        loop {
            let out = self.client
                .scan()
                .table_name(table_name)
                .filter_expression("isbn = :isbn OR title_key = :title_key")
                .expression_attribute_values(":isbn", AttributeValue::S(isbn.to_string()))
                .expression_attribute_values(":title_key", AttributeValue::S(title_key(title)))
                .set_exclusive_start_key(start_key)
                .send()
                .await?;
            books.extend(out.items().unwrap_or_default().iter().map(map_to_book));
            start_key = out.last_evaluated_key().cloned();
            if start_key.is_none() {
                break;
            }
        }
        Ok(books)
    }
}

fn map_to_book(map: &HashMap<String, AttributeValue>) -> BookEntity {
    let title = parse_string_attribute("title", map).unwrap_or_default();
    BookEntity {
        book_id: parse_string_attribute("book_id", map).unwrap_or_default(),
        version: parse_number_attribute("version", map),
        isbn: parse_string_attribute("isbn", map).unwrap_or_default(),
        title_key: parse_string_attribute("title_key", map).unwrap_or_else(|| title_key(title.as_str())),
        title,
        author: parse_string_attribute("author", map).unwrap_or_default(),
        price: parse_float_attribute("price", map),
        created_at: parse_date_attribute("created_at", map).unwrap_or(Utc::now().naive_utc()),
        updated_at: parse_date_attribute("updated_at", map).unwrap_or(Utc::now().naive_utc()),
    }
}
