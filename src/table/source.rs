use serde_json::Value;
use crate::core::errors::{CatalogError, CatalogResult};

/// Extracts the record array from a read-endpoint response. With an empty
/// `data_prop` the array must be the response root; otherwise it is looked
/// up under that property.
pub fn parse_records(body: &[u8], data_prop: &str) -> CatalogResult<Vec<Value>> {
    let root: Value = serde_json::from_slice(body)?;
    let data = if data_prop.is_empty() {
        root
    } else {
        root.get(data_prop).cloned().unwrap_or(Value::Null)
    };
    match data {
        Value::Array(records) => Ok(records),
        other => Err(CatalogError::serialization(
            format!("expected an array of records, got {}", kind(&other)).as_str())),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use crate::core::errors::CatalogError;
    use crate::table::source::parse_records;

    #[tokio::test]
    async fn test_should_parse_root_array() {
        let body = br#"[{"id":"a1","isbn":"1"},{"id":"b2"}]"#;
        let records = parse_records(body, "").expect("should parse");
        assert_eq!(2, records.len());
        assert_eq!("a1", records[0]["id"]);
    }

    #[tokio::test]
    async fn test_should_parse_empty_array() {
        assert!(parse_records(b"[]", "").expect("should parse").is_empty());
    }

    #[tokio::test]
    async fn test_should_read_named_property() {
        let records = parse_records(br#"{"data":[{"id":"a1"}]}"#, "data").expect("should parse");
        assert_eq!(1, records.len());
    }

    #[tokio::test]
    async fn test_should_reject_enveloped_or_malformed_body() {
        assert!(matches!(parse_records(br#"{"data":[]}"#, ""), Err(CatalogError::Serialization { .. })));
        assert!(matches!(parse_records(b"[{", ""), Err(CatalogError::Serialization { .. })));
        assert!(matches!(parse_records(b"[]", "data"), Err(CatalogError::Serialization { .. })));
    }
}
