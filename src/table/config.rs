use serde::Serialize;
use serde_json::{json, Value};
use crate::core::domain::Configuration;

pub const BOOKS_TABLE_ID: &str = "booksTable";

#[derive(Debug, PartialEq, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub struct SortSpec {
    pub column: usize,
    pub direction: SortDirection,
}

#[derive(Debug, PartialEq, Clone)]
pub enum CellRenderer {
    /// `<a href="{path}?id={value}">{value}</a>`, concatenated without escaping.
    EditLink { path: String },
}

impl CellRenderer {
    pub fn render(&self, raw: &str) -> String {
        match self {
            CellRenderer::EditLink { path } => format!("<a href=\"{}?id={}\">{}</a>", path, raw, raw),
        }
    }

    // the same renderer as a browser-side function(data, type, full, meta)
    fn to_js(&self) -> String {
        match self {
            CellRenderer::EditLink { path } => format!(
                "function (data, type, full, meta) {{ return '<a href=\"{}?id=' + data + '\">' + data + '</a>'; }}",
                path),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Column {
    pub data: String,
    pub title: String,
    pub render: Option<CellRenderer>,
}

impl Column {
    pub fn new(data: &str, title: &str) -> Self {
        Self { data: data.to_string(), title: title.to_string(), render: None }
    }

    pub fn with_renderer(mut self, render: CellRenderer) -> Self {
        self.render = Some(render);
        self
    }
}

/// Everything the page needs to bind the table widget to its element.
#[derive(Debug, PartialEq, Clone)]
pub struct TableConfig {
    pub element_id: String,
    /// Read endpoint returning the records.
    pub source: String,
    /// Property holding the record array; empty means the response root.
    pub data_prop: String,
    pub order: Vec<SortSpec>,
    pub columns: Vec<Column>,
    pub page_length: usize,
}

/// The book list: id (linked to the edit page), isbn, title, author, price,
/// ascending by id.
pub fn books_table(config: &Configuration) -> TableConfig {
    TableConfig {
        element_id: BOOKS_TABLE_ID.to_string(),
        source: config.list_path(),
        data_prop: String::new(),
        order: vec![SortSpec { column: 0, direction: SortDirection::Asc }],
        columns: vec![
            Column::new("id", "ID").with_renderer(CellRenderer::EditLink { path: config.edit_path() }),
            Column::new("isbn", "ISBN"),
            Column::new("title", "Title"),
            Column::new("author", "Author"),
            Column::new("price", "Price"),
        ],
        page_length: config.page_length.max(1),
    }
}

impl TableConfig {
    /// Widget options in the shape the browser table plugin reads.
    pub fn options(&self) -> Value {
        let order: Vec<Value> = self.order.iter()
            .map(|s| json!([s.column, s.direction]))
            .collect();
        let columns: Vec<Value> = self.columns.iter()
            .map(|c| json!({"data": c.data}))
            .collect();
        json!({
            "sAjaxSource": self.source,
            "sAjaxDataProp": self.data_prop,
            "order": order,
            "pageLength": self.page_length,
            "aoColumns": columns,
        })
    }

    /// Page-ready script binding the widget to `#{element_id}`. Renderers are
    /// functions, so they are attached after the JSON options are parsed.
    pub fn to_script(&self) -> String {
        let mut script = String::new();
        script.push_str("$(document).ready(function () {\n");
        script.push_str(format!("    var options = {};\n", self.options()).as_str());
        for (i, column) in self.columns.iter().enumerate() {
            if let Some(render) = &column.render {
                script.push_str(format!("    options.aoColumns[{}].render = {};\n", i, render.to_js()).as_str());
            }
        }
        script.push_str(format!("    var table = $('#{}').DataTable(options);\n", self.element_id).as_str());
        script.push_str("});\n");
        script
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use crate::core::domain::Configuration;
    use crate::table::config::{books_table, CellRenderer, SortDirection, SortSpec};

    #[tokio::test]
    async fn test_should_build_books_table() {
        let table = books_table(&Configuration::new("test"));
        assert_eq!("booksTable", table.element_id.as_str());
        assert_eq!("/books/get/all", table.source.as_str());
        assert_eq!("", table.data_prop.as_str());
        assert_eq!(vec![SortSpec { column: 0, direction: SortDirection::Asc }], table.order);
        let fields: Vec<&str> = table.columns.iter().map(|c| c.data.as_str()).collect();
        assert_eq!(vec!["id", "isbn", "title", "author", "price"], fields);
        assert!(table.columns[0].render.is_some());
        assert!(table.columns[1..].iter().all(|c| c.render.is_none()));
    }

    #[tokio::test]
    async fn test_should_render_edit_link() {
        let render = CellRenderer::EditLink { path: "/books/updateBook".to_string() };
        assert_eq!("<a href=\"/books/updateBook?id=ab12\">ab12</a>", render.render("ab12"));
    }

    #[tokio::test]
    async fn test_should_follow_base_path() {
        let mut config = Configuration::new("test");
        config.base_path = "/shop".to_string();
        let table = books_table(&config);
        assert_eq!("/shop/get/all", table.source.as_str());
        assert_eq!(Some(CellRenderer::EditLink { path: "/shop/updateBook".to_string() }), table.columns[0].render);
    }

    #[tokio::test]
    async fn test_should_build_widget_options() {
        let table = books_table(&Configuration::new("test"));
        assert_eq!(json!({
            "sAjaxSource": "/books/get/all",
            "sAjaxDataProp": "",
            "order": [[0, "asc"]],
            "pageLength": 10,
            "aoColumns": [{"data": "id"}, {"data": "isbn"}, {"data": "title"}, {"data": "author"}, {"data": "price"}],
        }), table.options());
    }

    #[tokio::test]
    async fn test_should_emit_initializer_script() {
        let script = books_table(&Configuration::new("test")).to_script();
        assert!(script.starts_with("$(document).ready("));
        assert!(script.contains("$('#booksTable').DataTable(options)"));
        assert!(script.contains("options.aoColumns[0].render = function (data, type, full, meta)"));
        assert!(script.contains("'<a href=\"/books/updateBook?id=' + data + '\">' + data + '</a>'"));
        assert!(!script.contains("aoColumns[1].render"));
    }
}
