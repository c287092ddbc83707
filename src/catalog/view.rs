use html_escape::{encode_double_quoted_attribute, encode_text};
use crate::books::dto::BookDto;
use crate::catalog::domain::status::ResultData;

const STYLESHEETS: [&str; 1] = ["https://cdn.datatables.net/1.13.6/css/jquery.dataTables.min.css"];
const SCRIPTS: [&str; 2] = [
    "https://code.jquery.com/jquery-3.7.1.min.js",
    "https://cdn.datatables.net/1.13.6/js/jquery.dataTables.min.js",
];

fn layout(title: &str, body: &str, scripts: &[String]) -> String {
    let mut html = String::from("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(format!("<title>{}</title>\n", encode_text(title)).as_str());
    for href in STYLESHEETS {
        html.push_str(format!("<link rel=\"stylesheet\" href=\"{}\">\n", href).as_str());
    }
    html.push_str("</head>\n<body>\n");
    html.push_str(body);
    for src in scripts {
        html.push_str(format!("<script src=\"{}\"></script>\n", src).as_str());
    }
    html.push_str("</body>\n</html>\n");
    html
}

/// Book list page: the server-rendered table plus the widget scripts that
/// take it over in the browser.
pub fn books_page(base_path: &str, table_html: &str) -> String {
    let body = format!("<h1>Books</h1>\n<p><a href=\"{}/addBook\">Add book</a></p>\n{}",
                       base_path, table_html);
    let mut scripts: Vec<String> = SCRIPTS.iter().map(|s| s.to_string()).collect();
    scripts.push(format!("{}/js/datatable.js", base_path));
    layout("Books", body.as_str(), &scripts)
}

pub fn add_book_page(base_path: &str) -> String {
    let form = book_form(format!("{}/add", base_path).as_str(), &BookDto::default(), "Add");
    layout("Add Book", format!("<h1>Add Book</h1>\n{}", form).as_str(), &[])
}

pub fn update_book_page(base_path: &str, book: &BookDto) -> String {
    let mut body = format!("<h1>Update Book {}</h1>\n", encode_text(book.id.as_str()));
    body.push_str(book_form(format!("{}/update", base_path).as_str(), book, "Update").as_str());
    body.push_str(format!(
        "<form method=\"post\" action=\"{}/delete\">\n<input type=\"hidden\" name=\"id\" value=\"{}\">\n<button type=\"submit\">Delete</button>\n</form>\n",
        base_path, encode_double_quoted_attribute(book.id.as_str())).as_str());
    layout("Update Book", body.as_str(), &[])
}

pub fn status_page(base_path: &str, result: &ResultData) -> String {
    let class = if result.error { "error" } else { "success" };
    let body = format!("<p class=\"{}\">{}</p>\n<p><a href=\"{}/\">Back to books</a></p>\n",
                       class, encode_text(result.message.as_str()), base_path);
    layout("Status", body.as_str(), &[])
}

fn book_form(action: &str, book: &BookDto, submit: &str) -> String {
    let mut form = format!("<form method=\"post\" action=\"{}\">\n", action);
    if !book.id.is_empty() {
        form.push_str(format!("<input type=\"hidden\" name=\"id\" value=\"{}\">\n",
                              encode_double_quoted_attribute(book.id.as_str())).as_str());
    }
    let price = if book.id.is_empty() && book.price == 0.0 { String::new() } else { book.price.to_string() };
    for (name, label, value) in [
        ("isbn", "ISBN", book.isbn.as_str()),
        ("title", "Title", book.title.as_str()),
        ("author", "Author", book.author.as_str()),
        ("price", "Price", price.as_str()),
    ] {
        form.push_str(format!("<label>{} <input type=\"text\" name=\"{}\" value=\"{}\"></label><br>\n",
                              label, name, encode_double_quoted_attribute(value)).as_str());
    }
    form.push_str(format!("<button type=\"submit\">{}</button>\n</form>\n", submit).as_str());
    form
}
