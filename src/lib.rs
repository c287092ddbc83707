pub mod books;
pub mod catalog;
pub mod core;
pub mod table;
pub mod utils;
