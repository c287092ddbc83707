use crate::core::domain::Identifiable;

pub mod model;

// Book is the catalog record shared by the storage entity and the wire dto
pub trait Book: Identifiable {
    fn isbn(&self) -> &str;
    fn title(&self) -> &str;
    fn author(&self) -> &str;
    fn price(&self) -> f64;

    // first blank required field, checked in display order
    fn empty_field(&self) -> Option<&'static str> {
        if self.isbn().trim().is_empty() {
            Some("ISBN")
        } else if self.title().trim().is_empty() {
            Some("Title")
        } else if self.author().trim().is_empty() {
            Some("Author")
        } else {
            None
        }
    }
}

// Normalized title used for duplicate detection.
pub fn title_key(title: &str) -> String {
    title.trim().to_lowercase()
}
