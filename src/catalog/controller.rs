use axum::{
    body::HttpBody,
    extract::{Form, Path, Query, State},
    http::header,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    BoxError, Json, Router,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::error;
use crate::books::dto::BookDto;
use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest, AddBookCommandResponse};
use crate::catalog::command::get_book_cmd::{GetBookCommand, GetBookCommandRequest, GetBookCommandResponse};
use crate::catalog::command::list_books_cmd::{ListBooksCommand, ListBooksCommandRequest};
use crate::catalog::command::remove_book_cmd::{RemoveBookCommand, RemoveBookCommandRequest, RemoveBookCommandResponse};
use crate::catalog::command::update_book_cmd::{UpdateBookCommand, UpdateBookCommandRequest, UpdateBookCommandResponse};
use crate::catalog::domain::status::ResultData;
use crate::catalog::view;
use crate::core::command::{Command, CommandError};
use crate::core::controller::{AppState, json_to_server_error, ServerError};

const NO_DATA: &str = "No data available";

// generic over the request body so the same routes serve hyper and lambda events
pub fn routes<B>(state: AppState) -> Router<(), B>
    where B: HttpBody + Send + 'static, B::Data: Send, B::Error: Into<BoxError> {
    let base = state.config.base_path.clone();
    let mut router = Router::new()
        .route(format!("{}/", base).as_str(), get(show_books));
    if !base.is_empty() {
        router = router.route(base.as_str(), get(show_books));
    }
    router
        .route(format!("{}/get/all", base).as_str(), get(get_books))
        .route(format!("{}/get", base).as_str(), get(get_book))
        .route(format!("{}/js/datatable.js", base).as_str(), get(datatable_script))
        .route(format!("{}/addBook", base).as_str(), get(add_book_view))
        .route(format!("{}/add", base).as_str(), post(insert_book))
        .route(format!("{}/updateBook", base).as_str(), get(update_book_view))
        .route(format!("{}/update", base).as_str(), post(update_book))
        .route(format!("{}/delete", base).as_str(), post(delete_book))
        .route(format!("{}/catalog", base).as_str(), post(add_book))
        .route(format!("{}/catalog/:id", base).as_str(),
               get(find_book_by_id).put(replace_book).delete(remove_book))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct IdParams {
    #[serde(default)]
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub page: Option<usize>,
}

// Form posts carry every field as text; price is parsed here.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BookForm {
    pub id: String,
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub price: String,
}

impl BookForm {
    fn price(&self) -> Result<f64, CommandError> {
        let price = self.price.trim();
        if price.is_empty() {
            return Ok(0.0);
        }
        price.parse::<f64>().ok().filter(|p| p.is_finite()).ok_or_else(|| CommandError::Validation {
            message: "Price field must be a number.".to_string(),
            reason_code: None,
        })
    }
}

async fn list_records(state: &AppState) -> Result<Vec<BookDto>, CommandError> {
    ListBooksCommand::new(state.catalog.clone())
        .execute(ListBooksCommandRequest::default()).await.map(|res| res.books)
}

pub async fn show_books(
    State(state): State<AppState>,
    Query(params): Query<PageParams>) -> Html<String> {
    let table_html = match list_records(&state).await {
        Ok(books) => {
            let records: Vec<Value> = books.iter().filter_map(|b| serde_json::to_value(b).ok()).collect();
            let rows = state.table.rows(&records);
            match params.page {
                Some(page) => state.table.render_html(state.table.page(&rows, page)),
                None => state.table.render_html(&rows),
            }
        }
        Err(err) => {
            error!("failed to load books for table: {:?}", err);
            state.table.render_message(NO_DATA)
        }
    };
    Html(view::books_page(state.config.base_path.as_str(), table_html.as_str()))
}

pub async fn get_books(
    State(state): State<AppState>) -> Result<Json<Vec<BookDto>>, ServerError> {
    let books = list_records(&state).await?;
    Ok(Json(books))
}

pub async fn get_book(
    State(state): State<AppState>,
    Query(params): Query<IdParams>) -> Result<Json<BookDto>, ServerError> {
    let res = GetBookCommand::new(state.catalog.clone())
        .execute(GetBookCommandRequest::new(params.id)).await?;
    Ok(Json(res.book))
}

pub async fn datatable_script(State(state): State<AppState>) -> Response {
    ([(header::CONTENT_TYPE, "application/javascript")], state.table.to_script()).into_response()
}

pub async fn add_book_view(State(state): State<AppState>) -> Html<String> {
    Html(view::add_book_page(state.config.base_path.as_str()))
}

pub async fn insert_book(
    State(state): State<AppState>,
    Form(form): Form<BookForm>) -> Html<String> {
    let res = match form.price() {
        Ok(price) => {
            let mut req = AddBookCommandRequest::new(form.isbn.as_str(), form.title.as_str(), form.author.as_str(), price);
            req.id = form.id.to_string();
            AddBookCommand::new(state.catalog.clone()).execute(req).await
        }
        Err(err) => Err(err),
    };
    Html(view::status_page(state.config.base_path.as_str(), &ResultData::added(&res)))
}

pub async fn update_book_view(
    State(state): State<AppState>,
    Query(params): Query<IdParams>) -> Response {
    let base = state.config.base_path.as_str();
    match GetBookCommand::new(state.catalog.clone())
        .execute(GetBookCommandRequest::new(params.id.to_string())).await {
        Ok(res) => Html(view::update_book_page(base, &res.book)).into_response(),
        Err(err) => {
            let (status, _): ServerError = err.into();
            let result = ResultData::of(true, format!("Book record with ID: {} was not found.", params.id));
            (status, Html(view::status_page(base, &result))).into_response()
        }
    }
}

pub async fn update_book(
    State(state): State<AppState>,
    Form(form): Form<BookForm>) -> Html<String> {
    let res = match form.price() {
        Ok(price) => {
            let req = UpdateBookCommandRequest::new(form.id.as_str(), form.isbn.as_str(),
                                                    form.title.as_str(), form.author.as_str(), price);
            UpdateBookCommand::new(state.catalog.clone()).execute(req).await
        }
        Err(err) => Err(err),
    };
    Html(view::status_page(state.config.base_path.as_str(), &ResultData::updated(form.id.as_str(), &res)))
}

pub async fn delete_book(
    State(state): State<AppState>,
    Form(params): Form<IdParams>) -> Html<String> {
    let res = RemoveBookCommand::new(state.catalog.clone())
        .execute(RemoveBookCommandRequest::new(params.id.to_string())).await;
    Html(view::status_page(state.config.base_path.as_str(), &ResultData::deleted(params.id.as_str(), &res)))
}

pub async fn add_book(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<AddBookCommandResponse>, ServerError> {
    let req: AddBookCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let res = AddBookCommand::new(state.catalog.clone()).execute(req).await?;
    Ok(Json(res))
}

pub async fn find_book_by_id(
    State(state): State<AppState>,
    Path(book_id): Path<String>) -> Result<Json<GetBookCommandResponse>, ServerError> {
    let req = GetBookCommandRequest { book_id };
    let res = GetBookCommand::new(state.catalog.clone()).execute(req).await?;
    Ok(Json(res))
}

pub async fn replace_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
    json: Json<Value>) -> Result<Json<UpdateBookCommandResponse>, ServerError> {
    let mut req: UpdateBookCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    req.id = book_id;
    let res = UpdateBookCommand::new(state.catalog.clone()).execute(req).await?;
    Ok(Json(res))
}

pub async fn remove_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>) -> Result<Json<RemoveBookCommandResponse>, ServerError> {
    let req = RemoveBookCommandRequest { book_id };
    let res = RemoveBookCommand::new(state.catalog.clone()).execute(req).await?;
    Ok(Json(res))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use crate::catalog::controller::routes;
    use crate::catalog::domain::CatalogService;
    use crate::catalog::factory;
    use crate::core::controller::AppState;
    use crate::core::domain::Configuration;
    use crate::table::parse_records;

    async fn app(seed: bool) -> (Router, AppState) {
        let config = Configuration::new("test");
        let svc = factory::create_catalog_service(&config).await;
        if seed {
            svc.load_seed_data().await;
        }
        let state = AppState::new(config, svc);
        (routes(state.clone()), state)
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, String) {
        let res = app.oneshot(req).await.expect("should respond");
        let status = res.status();
        let bytes = hyper::body::to_bytes(res.into_body()).await.expect("should read body");
        (status, String::from_utf8(bytes.to_vec()).expect("should be utf8"))
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).expect("should build request")
    }

    fn post_form(uri: &str, body: &str) -> Request<Body> {
        Request::builder().method(Method::POST).uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string())).expect("should build request")
    }

    #[tokio::test]
    async fn test_should_list_books_as_root_array() {
        let (app, _) = app(true).await;
        let (status, body) = send(app, get("/books/get/all")).await;
        assert_eq!(StatusCode::OK, status);
        let records = parse_records(body.as_bytes(), "").expect("should be an array");
        assert_eq!(9, records.len());
        for record in records {
            let fields: Vec<&String> = record.as_object().expect("should be object").keys().collect();
            assert_eq!(5, fields.len());
        }
    }

    #[tokio::test]
    async fn test_should_list_empty_array() {
        let (app, _) = app(false).await;
        let (status, body) = send(app, get("/books/get/all")).await;
        assert_eq!(StatusCode::OK, status);
        assert_eq!("[]", body.as_str());
    }

    #[tokio::test]
    async fn test_should_get_book_by_query() {
        let (app, state) = app(true).await;
        let book = state.catalog.find_books().await.expect("should list").remove(0);
        let (status, body) = send(app.clone(), get(format!("/books/get?id={}", book.id).as_str())).await;
        assert_eq!(StatusCode::OK, status);
        let loaded: Value = serde_json::from_str(body.as_str()).expect("should be json");
        assert_eq!(book.isbn.as_str(), loaded["isbn"]);

        let (status, _) = send(app, get("/books/get?id=missing")).await;
        assert_eq!(StatusCode::NOT_FOUND, status);
    }

    #[tokio::test]
    async fn test_should_render_books_page_sorted_by_id() {
        let (app, state) = app(true).await;
        let mut ids: Vec<String> = state.catalog.find_books().await.expect("should list")
            .into_iter().map(|b| b.id).collect();
        ids.sort();
        let (status, body) = send(app, get("/books/")).await;
        assert_eq!(StatusCode::OK, status);
        assert_eq!(9, body.matches("<a href=\"/books/updateBook?id=").count());
        let positions: Vec<usize> = ids.iter()
            .map(|id| body.find(format!("?id={}\">{}</a>", id, id).as_str()).expect("should link id"))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[tokio::test]
    async fn test_should_page_books_page() {
        let (app, _) = app(true).await;
        let (_, body) = send(app.clone(), get("/books?page=0")).await;
        assert_eq!(9, body.matches("<tr><td>").count());
        let (_, body) = send(app, get("/books/?page=1")).await;
        assert_eq!(0, body.matches("<tr><td>").count());
    }

    #[tokio::test]
    async fn test_should_serve_initializer_script() {
        let (app, _) = app(false).await;
        let res = app.oneshot(get("/books/js/datatable.js")).await.expect("should respond");
        assert_eq!(StatusCode::OK, res.status());
        assert_eq!("application/javascript", res.headers()[header::CONTENT_TYPE]);
        let bytes = hyper::body::to_bytes(res.into_body()).await.expect("should read body");
        let script = String::from_utf8(bytes.to_vec()).expect("should be utf8");
        assert!(script.contains("\"sAjaxSource\":\"/books/get/all\""));
        assert!(script.contains("\"order\":[[0,\"asc\"]]"));
    }

    #[tokio::test]
    async fn test_should_add_update_delete_through_forms() {
        let (app, state) = app(false).await;

        let (_, body) = send(app.clone(), post_form("/books/add", "isbn=111&title=Some+Title&author=Someone&price=12.5")).await;
        assert!(body.contains("Book record has been successfully added."));
        let book = state.catalog.find_books().await.expect("should list").remove(0);
        assert_eq!(12.5, book.price);

        let (_, body) = send(app.clone(), post_form("/books/add", "isbn=111&title=Other&author=Someone")).await;
        assert!(body.contains("Book&#x27;s ISBN and/or Title matches") || body.contains("Book's ISBN and/or Title matches"));

        let (_, body) = send(app.clone(), post_form("/books/add", "isbn=222&title=&author=Someone")).await;
        assert!(body.contains("Title field cannot be empty."));

        let (_, body) = send(app.clone(), post_form("/books/add", "isbn=222&title=T&author=A&price=abc")).await;
        assert!(body.contains("Price field must be a number."));

        let (status, body) = send(app.clone(), get(format!("/books/updateBook?id={}", book.id).as_str())).await;
        assert_eq!(StatusCode::OK, status);
        assert!(body.contains("value=\"Some Title\""));

        let form = format!("id={}&isbn=111&title=New+Title&author=Someone&price=13", book.id);
        let (_, body) = send(app.clone(), post_form("/books/update", form.as_str())).await;
        assert!(body.contains(format!("Book record with ID: {} has been successfully updated.", book.id).as_str()));
        assert_eq!("New Title", state.catalog.find_book_by_id(book.id.as_str()).await.expect("should get").title.as_str());

        let (_, body) = send(app.clone(), post_form("/books/delete", format!("id={}", book.id).as_str())).await;
        assert!(body.contains(format!("Book record with ID: {} has been successfully deleted.", book.id).as_str()));

        let (_, body) = send(app.clone(), post_form("/books/delete", format!("id={}", book.id).as_str())).await;
        assert!(body.contains(format!("Error deleting book record with ID: {}", book.id).as_str()));

        let (status, _) = send(app, get(format!("/books/updateBook?id={}", book.id).as_str())).await;
        assert_eq!(StatusCode::NOT_FOUND, status);
    }

    #[tokio::test]
    async fn test_should_manage_books_through_json() {
        let (app, _) = app(false).await;

        let req = Request::builder().method(Method::POST).uri("/books/catalog")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({"isbn": "9", "title": "Json Book", "author": "Writer", "price": 5}).to_string()))
            .expect("should build request");
        let (status, body) = send(app.clone(), req).await;
        assert_eq!(StatusCode::OK, status);
        let added: Value = serde_json::from_str(body.as_str()).expect("should be json");
        let id = added["book"]["id"].as_str().expect("should have id").to_string();

        let req = Request::builder().method(Method::POST).uri("/books/catalog")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({"isbn": "9", "title": "Dup", "author": "Writer"}).to_string()))
            .expect("should build request");
        let (status, _) = send(app.clone(), req).await;
        assert_eq!(StatusCode::CONFLICT, status);

        let req = Request::builder().method(Method::PUT).uri(format!("/books/catalog/{}", id))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({"isbn": "9", "title": "Renamed", "author": "Writer", "price": 6}).to_string()))
            .expect("should build request");
        let (status, _) = send(app.clone(), req).await;
        assert_eq!(StatusCode::OK, status);

        let (status, body) = send(app.clone(), get(format!("/books/catalog/{}", id).as_str())).await;
        assert_eq!(StatusCode::OK, status);
        assert!(body.contains("Renamed"));

        let req = Request::builder().method(Method::DELETE).uri(format!("/books/catalog/{}", id))
            .body(Body::empty()).expect("should build request");
        let (status, _) = send(app.clone(), req).await;
        assert_eq!(StatusCode::OK, status);

        let (status, _) = send(app, get(format!("/books/catalog/{}", id).as_str())).await;
        assert_eq!(StatusCode::NOT_FOUND, status);
    }

    #[tokio::test]
    async fn test_should_serve_lambda_event_bodies() {
        let (_, state) = app(true).await;
        let lambda_app: Router<(), lambda_http::Body> = routes(state);
        let req = Request::builder().uri("/books/get/all")
            .body(lambda_http::Body::Empty).expect("should build request");
        let res = lambda_app.oneshot(req).await.expect("should respond");
        assert_eq!(StatusCode::OK, res.status());
        let bytes = hyper::body::to_bytes(res.into_body()).await.expect("should read body");
        assert_eq!(9, parse_records(&bytes, "").expect("should be an array").len());
    }
}
