use std::cmp::Ordering;
use serde_json::Value;
use crate::table::config::{Column, SortDirection, TableConfig};

#[derive(Debug, PartialEq, Clone)]
pub enum Cell {
    Text(String),
    // renderer output, emitted as-is
    Html(String),
}

impl Cell {
    pub fn as_str(&self) -> &str {
        match self {
            Cell::Text(s) => s.as_str(),
            Cell::Html(s) => s.as_str(),
        }
    }

    fn to_html(&self) -> String {
        match self {
            Cell::Text(s) => html_escape::encode_text(s).to_string(),
            Cell::Html(s) => s.to_string(),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Row {
    pub cells: Vec<Cell>,
}

// How a column's values are compared; numeric only when every non-empty value is a number.
enum SortKind {
    Numeric,
    Text,
}

impl TableConfig {
    /// Orders the records by the configured sort, then renders one row per
    /// record. Missing or null fields become empty cells.
    pub fn rows(&self, records: &[Value]) -> Vec<Row> {
        let mut ordered: Vec<&Value> = records.iter().collect();
        let kinds: Vec<(usize, SortDirection, SortKind)> = self.order.iter()
            .filter(|s| s.column < self.columns.len())
            .map(|s| (s.column, s.direction, sort_kind(&self.columns[s.column], records)))
            .collect();
        // stable: equal keys keep response order
        ordered.sort_by(|a, b| {
            for (column, direction, kind) in &kinds {
                let field = self.columns[*column].data.as_str();
                let ord = compare(field_value(a, field), field_value(b, field), kind);
                let ord = match direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            Ordering::Equal
        });
        ordered.into_iter().map(|record| self.row(record)).collect()
    }

    fn row(&self, record: &Value) -> Row {
        let cells = self.columns.iter().map(|column| {
            let raw = display_value(field_value(record, column.data.as_str()));
            match &column.render {
                Some(render) => Cell::Html(render.render(raw.as_str())),
                None => Cell::Text(raw),
            }
        }).collect();
        Row { cells }
    }

    /// Rows of the zero-based `page`, `page_length` per page.
    pub fn page<'a>(&self, rows: &'a [Row], page: usize) -> &'a [Row] {
        let start = page.saturating_mul(self.page_length).min(rows.len());
        let end = start.saturating_add(self.page_length).min(rows.len());
        &rows[start..end]
    }

    pub fn render_html(&self, rows: &[Row]) -> String {
        let mut body = String::new();
        for row in rows {
            body.push_str("<tr>");
            for cell in &row.cells {
                body.push_str(format!("<td>{}</td>", cell.to_html()).as_str());
            }
            body.push_str("</tr>\n");
        }
        self.render_table(body.as_str())
    }

    /// Table with a single full-width row carrying `message`, used when the
    /// records could not be loaded.
    pub fn render_message(&self, message: &str) -> String {
        let body = format!("<tr><td colspan=\"{}\">{}</td></tr>\n",
                           self.columns.len(), html_escape::encode_text(message));
        self.render_table(body.as_str())
    }

    fn render_table(&self, body: &str) -> String {
        let mut html = format!("<table id=\"{}\" class=\"display\">\n<thead><tr>", self.element_id);
        for column in &self.columns {
            html.push_str(format!("<th>{}</th>", html_escape::encode_text(column.title.as_str())).as_str());
        }
        html.push_str("</tr></thead>\n<tbody>\n");
        html.push_str(body);
        html.push_str("</tbody>\n</table>\n");
        html
    }
}

fn field_value<'a>(record: &'a Value, field: &str) -> Option<&'a Value> {
    record.as_object().and_then(|o| o.get(field)).filter(|v| !v.is_null())
}

// integral numbers print without a fraction, the way a browser shows 41.0
fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.to_string(),
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else {
                match n.as_f64() {
                    Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
                    _ => n.to_string(),
                }
            }
        }
        Some(other) => other.to_string(),
    }
}

fn numeric_value(value: Option<&Value>) -> Option<f64> {
    match value {
        Some(Value::Number(n)) => n.as_f64(),
        // "inf" and "nan" parse as floats but a browser treats them as text
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

fn sort_kind(column: &Column, records: &[Value]) -> SortKind {
    let numeric = records.iter()
        .map(|r| field_value(r, column.data.as_str()))
        .filter(|v| !display_value(*v).trim().is_empty())
        .all(|v| numeric_value(v).is_some());
    if numeric { SortKind::Numeric } else { SortKind::Text }
}

fn compare(a: Option<&Value>, b: Option<&Value>, kind: &SortKind) -> Ordering {
    match kind {
        // blanks sort before every number
        SortKind::Numeric => match (numeric_value(a), numeric_value(b)) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        SortKind::Text => display_value(a).to_lowercase().cmp(&display_value(b).to_lowercase()),
    }
}
