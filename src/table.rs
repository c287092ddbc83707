//! Book list table: column layout, default ordering and cell rendering for the
//! `booksTable` element, plus the client-side initializer that drives the same
//! configuration in the browser.

pub mod config;
pub mod render;
pub mod source;

pub use config::{books_table, CellRenderer, Column, SortDirection, SortSpec, TableConfig};
pub use render::{Cell, Row};
pub use source::parse_records;
